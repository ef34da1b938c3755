//! 组合与变换操作
//!
//! 所有组合函数都返回新节点，不修改操作数。左操作数已是并集（或差集）时，
//! 其子节点会被拼接进新节点，避免并集嵌套。需要原地累积时使用
//! [`UnionBuilder`] / [`DifferenceBuilder`]。

use crate::math::Vector3;
use crate::node::{CsgNode, CsgRef, NodeKind};
use crate::properties::Properties;
use crate::transform::Transform3D;
use std::ops::{Add, Sub};

fn union_parts(node: &CsgRef) -> Option<&[CsgRef]> {
    match node.kind() {
        NodeKind::Union { children } => Some(children),
        _ => None,
    }
}

/// 并集组合
///
/// 任一侧为空时原样返回另一侧。
pub fn combine_union(left: Option<CsgRef>, right: Option<CsgRef>) -> Option<CsgRef> {
    match (left, right) {
        (None, right) => right,
        (left, None) => left,
        (Some(left), Some(right)) => Some(union_pair(&left, &right)),
    }
}

fn union_pair(left: &CsgRef, right: &CsgRef) -> CsgRef {
    let mut children = Vec::new();
    match union_parts(left) {
        Some(parts) => children.extend(parts.iter().cloned()),
        None => children.push(left.clone()),
    }
    match union_parts(right) {
        Some(parts) if right.properties().is_empty() => children.extend(parts.iter().cloned()),
        _ => children.push(right.clone()),
    }

    let properties = if union_parts(left).is_some() {
        left.properties().clone()
    } else {
        Properties::new()
    };
    CsgNode::union(children).with_properties(properties).into_ref()
}

/// 从左到右依次并入
pub fn union_all(nodes: impl IntoIterator<Item = CsgRef>) -> Option<CsgRef> {
    nodes
        .into_iter()
        .fold(None, |acc, node| combine_union(acc, Some(node)))
}

/// 差集组合
///
/// `base` 已是差集时，结果沿用其基体并在减去列表末尾追加 `subtracted`。
pub fn combine_difference(base: &CsgRef, subtracted: &CsgRef) -> CsgRef {
    match base.kind() {
        NodeKind::Difference {
            base: inner,
            subtracted: existing,
        } => {
            let mut list = existing.clone();
            list.push(subtracted.clone());
            CsgNode::difference(inner.clone(), list)
                .with_properties(base.properties().clone())
                .into_ref()
        }
        _ => CsgNode::difference(base.clone(), vec![subtracted.clone()]).into_ref(),
    }
}

/// 依次减去多个节点
pub fn difference_all(base: &CsgRef, subtracted: impl IntoIterator<Item = CsgRef>) -> CsgRef {
    subtracted
        .into_iter()
        .fold(base.clone(), |acc, node| combine_difference(&acc, &node))
}

/// 交集，空输入返回 `None`，单个节点原样返回
pub fn intersect_all(nodes: impl IntoIterator<Item = CsgRef>) -> Option<CsgRef> {
    let mut children: Vec<CsgRef> = nodes.into_iter().collect();
    match children.len() {
        0 => None,
        1 => children.pop(),
        _ => Some(CsgNode::intersection(children).into_ref()),
    }
}

/// 平移
pub fn translate(node: &CsgRef, offset: Vector3, name: &str) -> CsgRef {
    CsgNode::translate(node.clone(), offset)
        .with_name(name)
        .into_ref()
}

/// 按轴缩放
pub fn scale(node: &CsgRef, factor: Vector3, name: &str) -> CsgRef {
    CsgNode::scale(node.clone(), factor).with_name(name).into_ref()
}

/// 按角度依次绕X、Y、Z轴旋转
pub fn rotate(node: &CsgRef, degrees: Vector3, name: &str) -> CsgRef {
    transform(node, Transform3D::rotation_euler_degrees(degrees), name)
}

/// 任意仿射变换
pub fn transform(node: &CsgRef, transform: Transform3D, name: &str) -> CsgRef {
    CsgNode::transform(node.clone(), transform)
        .with_name(name)
        .into_ref()
}

/// 关于 `x = offset` 平面的镜像副本
///
/// 偏移为零时只有缩放节点；否则外层再包一个沿X轴 `2 * offset` 的平移。
/// 名称写在最外层节点上。
pub fn mirror_across_x(node: &CsgRef, offset_from_origin: f64, name: &str) -> CsgRef {
    mirror(node, Vector3::x(), offset_from_origin, name)
}

/// 关于 `y = offset` 平面的镜像副本
pub fn mirror_across_y(node: &CsgRef, offset_from_origin: f64, name: &str) -> CsgRef {
    mirror(node, Vector3::y(), offset_from_origin, name)
}

fn mirror(node: &CsgRef, axis: Vector3, offset_from_origin: f64, name: &str) -> CsgRef {
    let factor = Vector3::repeat(1.0) - axis * 2.0;
    if offset_from_origin == 0.0 {
        return scale(node, factor, name);
    }
    let mirrored = scale(node, factor, "");
    translate(&mirrored, axis * (offset_from_origin * 2.0), name)
}

impl Add for CsgRef {
    type Output = CsgRef;

    fn add(self, rhs: CsgRef) -> CsgRef {
        union_pair(&self, &rhs)
    }
}

impl Add for &CsgRef {
    type Output = CsgRef;

    fn add(self, rhs: &CsgRef) -> CsgRef {
        union_pair(self, rhs)
    }
}

impl Add<Option<CsgRef>> for CsgRef {
    type Output = CsgRef;

    fn add(self, rhs: Option<CsgRef>) -> CsgRef {
        match rhs {
            Some(rhs) => union_pair(&self, &rhs),
            None => self,
        }
    }
}

impl Add<CsgRef> for Option<CsgRef> {
    type Output = CsgRef;

    fn add(self, rhs: CsgRef) -> CsgRef {
        match self {
            Some(lhs) => union_pair(&lhs, &rhs),
            None => rhs,
        }
    }
}

impl Sub for CsgRef {
    type Output = CsgRef;

    fn sub(self, rhs: CsgRef) -> CsgRef {
        combine_difference(&self, &rhs)
    }
}

impl Sub for &CsgRef {
    type Output = CsgRef;

    fn sub(self, rhs: &CsgRef) -> CsgRef {
        combine_difference(self, rhs)
    }
}

/// 原地累积的并集构建器
#[derive(Debug, Default)]
pub struct UnionBuilder {
    properties: Properties,
    children: Vec<CsgRef>,
}

impl UnionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(name: &str) -> Self {
        Self {
            properties: Properties::with_name(name),
            children: Vec::new(),
        }
    }

    /// 追加子节点
    pub fn add(&mut self, child: CsgRef) -> &mut Self {
        self.children.push(child);
        self
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn build(self) -> CsgRef {
        CsgNode::union(self.children)
            .with_properties(self.properties)
            .into_ref()
    }
}

/// 原地累积的差集构建器
#[derive(Debug)]
pub struct DifferenceBuilder {
    base: CsgRef,
    subtracted: Vec<CsgRef>,
    name: String,
}

impl DifferenceBuilder {
    pub fn new(base: CsgRef) -> Self {
        Self {
            base,
            subtracted: Vec::new(),
            name: String::new(),
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// 追加到减去列表
    pub fn add_to_subtract_list(&mut self, node: CsgRef) -> &mut Self {
        self.subtracted.push(node);
        self
    }

    pub fn build(self) -> CsgRef {
        CsgNode::difference(self.base, self.subtracted)
            .with_name(&self.name)
            .into_ref()
    }
}
