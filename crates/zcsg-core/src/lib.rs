//! ZCSG 核心对象模型
//!
//! 用构造实体几何（CSG）描述实体：图元、变换和布尔组合构成节点图，
//! 每个节点都能推导出轴对齐包围盒。
//!
//! # 架构设计
//!
//! - `CsgNode`: 属性 + 节点类型（图元、变换、并集、差集、交集）
//! - `CsgRef`: 共享句柄，同一实例可被多个父节点引用（DAG）
//! - `ops`: 纯函数组合，`+` / `-` 运算符总是返回新节点
//! - `flatten`: 把 DAG 复制成没有共享实例的树
//!
//! # 示例
//!
//! ```rust
//! use zcsg_core::prelude::*;
//!
//! let a = CsgNode::primitive(Primitive::cuboid_at_origin(Vector3::repeat(1.0))).into_ref();
//! let b = translate(&a, Vector3::new(2.0, 0.0, 0.0), "b");
//!
//! let both = &a + &b;
//! assert_eq!(both.x_size(), 3.0);
//!
//! let tree = flatten(&both).unwrap();
//! assert!(is_tree(&tree));
//! ```

pub mod error;
pub mod face;
pub mod flatten;
pub mod math;
pub mod node;
pub mod ops;
pub mod primitive;
pub mod properties;
pub mod transform;

pub mod prelude {
    //! 常用类型的便捷导入
    pub use crate::error::CsgError;
    pub use crate::face::{get_opposite, Alignment, Edge, Face};
    pub use crate::flatten::{flatten, is_tree, node_count, shared_nodes};
    pub use crate::math::{BoundingBox3, Point3, Vector3};
    pub use crate::node::{CsgNode, CsgRef, NodeKind};
    pub use crate::ops::{
        combine_difference, combine_union, difference_all, intersect_all, mirror_across_x,
        mirror_across_y, rotate, scale, translate, union_all, DifferenceBuilder, UnionBuilder,
    };
    pub use crate::primitive::{CustomSolid, Primitive};
    pub use crate::properties::Properties;
    pub use crate::transform::Transform3D;
}
