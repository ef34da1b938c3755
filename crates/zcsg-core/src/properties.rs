//! 节点属性定义
//!
//! 每个 CSG 节点携带一组字符串键值属性，其中 `name` 键作为显示名称。

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 名称属性的键
pub const NAME_KEY: &str = "name";

/// 节点的键值属性
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Properties {
    values: BTreeMap<String, String>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建带有指定名称的属性，空名称不写入
    pub fn with_name(name: &str) -> Self {
        let mut properties = Self::new();
        properties.set_name(name);
        properties
    }

    /// 显示名称，未设置时为空字符串
    pub fn name(&self) -> &str {
        self.get(NAME_KEY).unwrap_or("")
    }

    /// 设置显示名称，空名称不写入
    pub fn set_name(&mut self, name: &str) {
        if !name.is_empty() {
            self.insert(NAME_KEY, name);
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// 写入属性，返回旧值
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.values.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}
