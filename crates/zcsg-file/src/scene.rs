//! CSG 场景数据模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use uuid::Uuid;
use zcsg_core::flatten::{flatten, node_count, shared_nodes};
use zcsg_core::math::BoundingBox3;
use zcsg_core::node::CsgRef;
use zcsg_core::ops::combine_union;

/// 场景元数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneMetadata {
    /// 场景唯一标识
    pub id: Uuid,

    /// 场景标题
    pub title: String,

    /// 作者
    pub author: String,

    /// 创建时间
    pub created_at: DateTime<Utc>,

    /// 最后修改时间
    pub modified_at: DateTime<Utc>,

    /// 文件格式版本
    pub format_version: u32,

    /// 单位（mm, cm, m, inch）
    pub units: String,

    /// 自定义属性
    pub custom_properties: HashMap<String, String>,
}

impl Default for SceneMetadata {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            title: "Untitled".to_string(),
            author: String::new(),
            created_at: Utc::now(),
            modified_at: Utc::now(),
            format_version: crate::json::FORMAT_VERSION,
            units: "mm".to_string(),
            custom_properties: HashMap::new(),
        }
    }
}

/// CSG 场景
#[derive(Debug, Clone, Default)]
pub struct Scene {
    /// 元数据
    pub metadata: SceneMetadata,

    /// 根节点，空场景为 `None`
    root: Option<CsgRef>,

    /// 是否已修改
    modified: bool,

    /// 文件路径（如果已保存）
    file_path: Option<PathBuf>,
}

impl Scene {
    /// 创建新场景
    pub fn new(title: &str) -> Self {
        Self {
            metadata: SceneMetadata {
                title: title.to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn with_root(mut self, root: CsgRef) -> Self {
        self.root = Some(root);
        self
    }

    pub(crate) fn from_parts(metadata: SceneMetadata, root: Option<CsgRef>) -> Self {
        Self {
            metadata,
            root,
            modified: false,
            file_path: None,
        }
    }

    /// 从文件加载
    pub fn open(path: impl AsRef<Path>) -> Result<Self, crate::FileError> {
        let path = path.as_ref();
        check_extension(path)?;

        let mut scene = crate::json::load(path)?;
        scene.file_path = Some(path.to_path_buf());
        Ok(scene)
    }

    /// 保存文件
    pub fn save(&mut self) -> Result<(), crate::FileError> {
        if let Some(path) = &self.file_path.clone() {
            self.save_as(path)
        } else {
            Err(crate::FileError::InvalidFormat(
                "No file path set".to_string(),
            ))
        }
    }

    /// 另存为
    pub fn save_as(&mut self, path: impl AsRef<Path>) -> Result<(), crate::FileError> {
        let path = path.as_ref();
        check_extension(path)?;

        self.metadata.modified_at = Utc::now();
        crate::json::save(self, path)?;

        self.file_path = Some(path.to_path_buf());
        self.modified = false;

        Ok(())
    }

    pub fn root(&self) -> Option<&CsgRef> {
        self.root.as_ref()
    }

    /// 替换根节点
    pub fn set_root(&mut self, root: Option<CsgRef>) {
        self.root = root;
        self.modified = true;
    }

    /// 把节点并入根节点
    pub fn add(&mut self, node: CsgRef) {
        self.root = combine_union(self.root.take(), Some(node));
        self.modified = true;
    }

    /// 场景包围盒，空场景为 `None`
    pub fn bounding_box(&self) -> Option<BoundingBox3> {
        self.root
            .as_ref()
            .map(|root| root.bounding_box())
            .filter(|bbox| !bbox.is_empty())
    }

    /// 节点位置总数
    pub fn node_count(&self) -> usize {
        self.root.as_ref().map(node_count).unwrap_or(0)
    }

    /// 被多个位置引用的实例数
    pub fn shared_instance_count(&self) -> usize {
        self.root
            .as_ref()
            .map(|root| shared_nodes(root).len())
            .unwrap_or(0)
    }

    /// 返回根节点展平后的场景副本
    pub fn flattened(&self) -> Result<Scene, crate::FileError> {
        let root = self.root.as_ref().map(flatten).transpose()?;
        Ok(Scene {
            metadata: self.metadata.clone(),
            root,
            modified: true,
            file_path: None,
        })
    }

    /// 是否已修改
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// 获取文件路径
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }
}

fn check_extension(path: &Path) -> Result<(), crate::FileError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("zcsg") | Some("json") => Ok(()),
        _ => Err(crate::FileError::InvalidFormat(
            "Unknown file extension".to_string(),
        )),
    }
}
