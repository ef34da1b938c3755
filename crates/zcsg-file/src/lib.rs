//! ZCSG 场景文件格式处理
//!
//! 支持：
//! - `.zcsg` / `.json` 场景文件（JSON）

pub mod error;
pub mod json;
pub mod scene;

pub use error::FileError;
pub use scene::{Scene, SceneMetadata};
