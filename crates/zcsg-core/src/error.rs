//! CSG 操作错误定义

use thiserror::Error;

/// CSG 对象模型错误
///
/// 两种错误都表示调用方的编程错误，不应重试。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CsgError {
    #[error("Unsupported face: {0:#04x} is not a single face")]
    UnsupportedFace(u8),

    #[error("Unsupported node variant: {0}")]
    UnsupportedVariant(String),
}
