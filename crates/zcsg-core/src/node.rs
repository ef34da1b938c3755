//! CSG 节点
//!
//! 节点由属性和 [`NodeKind`] 组成。子节点通过 [`CsgRef`] 共享持有，
//! 因此同一实例可以被多个父节点引用，整体构成有向无环图（DAG）。
//! 节点包装进 `CsgRef` 后不可变，不会出现环。

use crate::math::{BoundingBox3, Point3, Vector3};
use crate::primitive::{CustomSolid, Primitive};
use crate::properties::Properties;
use crate::transform::Transform3D;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// 共享的节点句柄
///
/// 克隆句柄共享同一实例；`==` 比较结构，`ptr_eq` 比较实例。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CsgRef(Arc<CsgNode>);

impl CsgRef {
    pub fn new(node: CsgNode) -> Self {
        Self(Arc::new(node))
    }

    /// 是否为同一实例
    pub fn ptr_eq(&self, other: &CsgRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// 实例地址，用于按实例去重
    pub fn instance_id(&self) -> usize {
        Arc::as_ptr(&self.0) as usize
    }
}

impl Deref for CsgRef {
    type Target = CsgNode;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<CsgNode> for CsgRef {
    fn from(node: CsgNode) -> Self {
        Self::new(node)
    }
}

/// 节点类型
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeKind {
    Primitive(Primitive),
    /// 自定义实体，不参与序列化
    #[serde(skip)]
    Custom(Arc<dyn CustomSolid>),
    Transform {
        child: CsgRef,
        transform: Transform3D,
    },
    Scale {
        child: CsgRef,
        factor: Vector3,
    },
    Translate {
        child: CsgRef,
        offset: Vector3,
    },
    Union {
        children: Vec<CsgRef>,
    },
    Difference {
        base: CsgRef,
        subtracted: Vec<CsgRef>,
    },
    Intersection {
        children: Vec<CsgRef>,
    },
}

/// CSG 节点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsgNode {
    #[serde(default, skip_serializing_if = "Properties::is_empty")]
    properties: Properties,
    kind: NodeKind,
}

impl CsgNode {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            properties: Properties::new(),
            kind,
        }
    }

    pub fn primitive(primitive: Primitive) -> Self {
        Self::new(NodeKind::Primitive(primitive))
    }

    pub fn custom(solid: Arc<dyn CustomSolid>) -> Self {
        Self::new(NodeKind::Custom(solid))
    }

    pub fn transform(child: CsgRef, transform: Transform3D) -> Self {
        Self::new(NodeKind::Transform { child, transform })
    }

    pub fn scale(child: CsgRef, factor: Vector3) -> Self {
        Self::new(NodeKind::Scale { child, factor })
    }

    pub fn translate(child: CsgRef, offset: Vector3) -> Self {
        Self::new(NodeKind::Translate { child, offset })
    }

    pub fn union(children: Vec<CsgRef>) -> Self {
        Self::new(NodeKind::Union { children })
    }

    pub fn difference(base: CsgRef, subtracted: Vec<CsgRef>) -> Self {
        Self::new(NodeKind::Difference { base, subtracted })
    }

    pub fn intersection(children: Vec<CsgRef>) -> Self {
        Self::new(NodeKind::Intersection { children })
    }

    /// 设置名称，空名称忽略
    pub fn with_name(mut self, name: &str) -> Self {
        self.properties.set_name(name);
        self
    }

    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = properties;
        self
    }

    pub fn into_ref(self) -> CsgRef {
        CsgRef::new(self)
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// 仅在包装进 `CsgRef` 之前可写
    pub fn properties_mut(&mut self) -> &mut Properties {
        &mut self.properties
    }

    pub fn name(&self) -> &str {
        self.properties.name()
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// 直接子节点，按存储顺序（差集为基体在前）
    pub fn children(&self) -> Vec<&CsgRef> {
        match &self.kind {
            NodeKind::Primitive(_) | NodeKind::Custom(_) => Vec::new(),
            NodeKind::Transform { child, .. }
            | NodeKind::Scale { child, .. }
            | NodeKind::Translate { child, .. } => vec![child],
            NodeKind::Union { children } | NodeKind::Intersection { children } => {
                children.iter().collect()
            }
            NodeKind::Difference { base, subtracted } => {
                std::iter::once(base).chain(subtracted.iter()).collect()
            }
        }
    }

    pub fn type_name(&self) -> &str {
        match &self.kind {
            NodeKind::Primitive(p) => p.type_name(),
            NodeKind::Custom(solid) => solid.type_name(),
            NodeKind::Transform { .. } => "Transform",
            NodeKind::Scale { .. } => "Scale",
            NodeKind::Translate { .. } => "Translate",
            NodeKind::Union { .. } => "Union",
            NodeKind::Difference { .. } => "Difference",
            NodeKind::Intersection { .. } => "Intersection",
        }
    }

    /// 获取轴对齐包围盒
    pub fn bounding_box(&self) -> BoundingBox3 {
        match &self.kind {
            NodeKind::Primitive(p) => p.bounding_box(),
            NodeKind::Custom(solid) => solid.bounding_box(),
            NodeKind::Transform { child, transform } => {
                transform.transform_bounding_box(&child.bounding_box())
            }
            NodeKind::Scale { child, factor } => {
                let bbox = child.bounding_box();
                if bbox.is_empty() {
                    return bbox;
                }
                let a = Point3::from(bbox.min.coords.component_mul(factor));
                let b = Point3::from(bbox.max.coords.component_mul(factor));
                BoundingBox3::new(a.inf(&b), a.sup(&b))
            }
            NodeKind::Translate { child, offset } => {
                let bbox = child.bounding_box();
                if bbox.is_empty() {
                    return bbox;
                }
                BoundingBox3::new(bbox.min + offset, bbox.max + offset)
            }
            NodeKind::Union { children } => children
                .iter()
                .fold(BoundingBox3::empty(), |acc, c| acc.union(&c.bounding_box())),
            NodeKind::Difference { base, .. } => base.bounding_box(),
            NodeKind::Intersection { children } => {
                let mut iter = children.iter();
                match iter.next() {
                    Some(first) => iter.fold(first.bounding_box(), |acc, c| {
                        acc.intersection(&c.bounding_box())
                    }),
                    None => BoundingBox3::empty(),
                }
            }
        }
    }

    /// 包围盒中心
    pub fn center(&self) -> Point3 {
        self.bounding_box().center()
    }

    /// 包围盒尺寸
    pub fn size(&self) -> Vector3 {
        self.bounding_box().size()
    }

    pub fn x_size(&self) -> f64 {
        self.size().x
    }

    pub fn y_size(&self) -> f64 {
        self.size().y
    }

    pub fn z_size(&self) -> f64 {
        self.size().z
    }

    fn write_outline(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        write!(f, "{:indent$}{}", "", self.type_name(), indent = depth * 2)?;
        if !self.name().is_empty() {
            write!(f, " \"{}\"", self.name())?;
        }
        writeln!(f)?;
        for child in self.children() {
            child.write_outline(f, depth + 1)?;
        }
        Ok(())
    }
}

/// 以缩进树形式输出节点结构
impl fmt::Display for CsgNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_outline(f, 0)
    }
}

impl fmt::Display for CsgRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.write_outline(f, 0)
    }
}
