//! ZCSG 场景文件格式（JSON）
//!
//! 共享实例在每个出现位置各写一份，因此读回的场景总是树结构。
//! 自定义实体无法持久化，保存时返回 JSON 错误。

use crate::error::FileError;
use crate::scene::{Scene, SceneMetadata};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use zcsg_core::node::CsgRef;

/// 当前文件格式版本
pub const FORMAT_VERSION: u32 = 1;

#[derive(Serialize)]
struct SceneFileRef<'a> {
    metadata: &'a SceneMetadata,
    root: Option<&'a CsgRef>,
}

#[derive(Deserialize)]
struct SceneFile {
    metadata: SceneMetadata,
    root: Option<CsgRef>,
}

/// 序列化为 JSON 字符串
pub fn to_string(scene: &Scene) -> Result<String, FileError> {
    let file = SceneFileRef {
        metadata: &scene.metadata,
        root: scene.root(),
    };
    Ok(serde_json::to_string_pretty(&file)?)
}

/// 从 JSON 字符串解析
///
/// 不限制嵌套深度，写得出的场景都能读回；深层嵌套时在堆上扩展栈。
pub fn from_str(text: &str) -> Result<Scene, FileError> {
    let mut json = serde_json::Deserializer::from_str(text);
    json.disable_recursion_limit();
    let file = SceneFile::deserialize(serde_stacker::Deserializer::new(&mut json))?;
    json.end()?;
    if file.metadata.format_version > FORMAT_VERSION {
        return Err(FileError::UnsupportedVersion(file.metadata.format_version));
    }
    Ok(Scene::from_parts(file.metadata, file.root))
}

/// 保存场景到文件
pub fn save(scene: &Scene, path: &Path) -> Result<(), FileError> {
    let text = to_string(scene)?;
    fs::write(path, text)?;

    tracing::info!(
        path = %path.display(),
        nodes = scene.node_count(),
        shared_instances = scene.shared_instance_count(),
        "saved scene"
    );
    Ok(())
}

/// 从文件加载场景
pub fn load(path: &Path) -> Result<Scene, FileError> {
    let text = fs::read_to_string(path)?;
    let scene = from_str(&text)?;

    tracing::info!(
        path = %path.display(),
        title = %scene.metadata.title,
        nodes = scene.node_count(),
        "loaded scene"
    );
    Ok(scene)
}
