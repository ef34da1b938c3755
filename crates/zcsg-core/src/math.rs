//! 数学基础类型
//!
//! 基于 nalgebra 提供的向量和点类型的别名，以及三维轴对齐包围盒。

use nalgebra as na;
use serde::{Deserialize, Serialize};

/// 3D点类型
pub type Point3 = na::Point3<f64>;

/// 3D向量类型
pub type Vector3 = na::Vector3<f64>;

/// 3D齐次变换矩阵
pub type Matrix4 = na::Matrix4<f64>;

/// 数值容差，用于几何比较
pub const EPSILON: f64 = 1e-10;

/// 判断两个浮点数是否近似相等
#[inline]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// 判断两个3D点是否近似相等
#[inline]
pub fn points_approx_eq(a: &Point3, b: &Point3) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z)
}

/// 3D轴对齐包围盒
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox3 {
    pub min: Point3,
    pub max: Point3,
}

impl BoundingBox3 {
    /// 创建新的包围盒
    pub fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    /// 创建空的包围盒（无效状态）
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::MAX, f64::MAX, f64::MAX),
            max: Point3::new(f64::MIN, f64::MIN, f64::MIN),
        }
    }

    /// 是否为空包围盒
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// 从点集创建包围盒
    pub fn from_points(points: impl IntoIterator<Item = Point3>) -> Self {
        let mut bbox = Self::empty();
        for p in points {
            bbox.expand_to_include(&p);
        }
        bbox
    }

    /// 扩展包围盒以包含指定点
    pub fn expand_to_include(&mut self, point: &Point3) {
        self.min = self.min.inf(point);
        self.max = self.max.sup(point);
    }

    /// 合并两个包围盒
    pub fn union(&self, other: &Self) -> Self {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        Self {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    /// 两个包围盒的交集，不相交时返回空包围盒
    pub fn intersection(&self, other: &Self) -> Self {
        let result = Self {
            min: self.min.sup(&other.min),
            max: self.max.inf(&other.max),
        };
        if result.is_empty() {
            Self::empty()
        } else {
            result
        }
    }

    /// 检查是否与另一个包围盒相交
    pub fn intersects(&self, other: &Self) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// 检查是否包含指定点
    pub fn contains(&self, point: &Point3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// 获取中心点
    pub fn center(&self) -> Point3 {
        na::center(&self.min, &self.max)
    }

    /// 获取三个方向上的尺寸，空包围盒为零
    pub fn size(&self) -> Vector3 {
        if self.is_empty() {
            return Vector3::zeros();
        }
        self.max - self.min
    }

    /// 八个角点
    pub fn corners(&self) -> [Point3; 8] {
        let (a, b) = (self.min, self.max);
        [
            Point3::new(a.x, a.y, a.z),
            Point3::new(b.x, a.y, a.z),
            Point3::new(a.x, b.y, a.z),
            Point3::new(b.x, b.y, a.z),
            Point3::new(a.x, a.y, b.z),
            Point3::new(b.x, a.y, b.z),
            Point3::new(a.x, b.y, b.z),
            Point3::new(b.x, b.y, b.z),
        ]
    }

    /// 经过仿射变换后的包围盒（变换八个角点后重新求包围）
    pub fn transformed(&self, matrix: &Matrix4) -> Self {
        if self.is_empty() {
            return *self;
        }
        Self::from_points(
            self.corners()
                .iter()
                .map(|p| matrix.transform_point(p)),
        )
    }
}

impl Default for BoundingBox3 {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box() {
        let bbox = BoundingBox3::from_points([
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(10.0, 5.0, -2.0),
            Point3::new(-5.0, 8.0, 0.0),
        ]);

        assert!(approx_eq(bbox.min.x, -5.0));
        assert!(approx_eq(bbox.min.y, 0.0));
        assert!(approx_eq(bbox.min.z, -2.0));
        assert!(approx_eq(bbox.max.x, 10.0));
        assert!(approx_eq(bbox.max.y, 8.0));
        assert!(approx_eq(bbox.max.z, 1.0));
        assert!(bbox.contains(&Point3::new(0.0, 4.0, 0.0)));
        assert!(!bbox.contains(&Point3::new(20.0, 4.0, 0.0)));
    }

    #[test]
    fn test_union_with_empty() {
        let bbox = BoundingBox3::new(Point3::new(1.0, 1.0, 1.0), Point3::new(2.0, 2.0, 2.0));
        assert_eq!(bbox.union(&BoundingBox3::empty()), bbox);
        assert_eq!(BoundingBox3::empty().union(&bbox), bbox);
        assert!(BoundingBox3::empty().is_empty());
        assert_eq!(BoundingBox3::empty().size(), Vector3::zeros());
    }

    #[test]
    fn test_intersection() {
        let a = BoundingBox3::new(Point3::origin(), Point3::new(2.0, 2.0, 2.0));
        let b = BoundingBox3::new(Point3::new(1.0, 1.0, 1.0), Point3::new(3.0, 3.0, 3.0));
        let c = BoundingBox3::new(Point3::new(5.0, 5.0, 5.0), Point3::new(6.0, 6.0, 6.0));

        let ab = a.intersection(&b);
        assert!(points_approx_eq(&ab.min, &Point3::new(1.0, 1.0, 1.0)));
        assert!(points_approx_eq(&ab.max, &Point3::new(2.0, 2.0, 2.0)));
        assert!(a.intersects(&b));

        assert!(a.intersection(&c).is_empty());
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_transformed() {
        let bbox = BoundingBox3::new(Point3::origin(), Point3::new(1.0, 2.0, 3.0));
        let m = Matrix4::new_translation(&Vector3::new(10.0, 0.0, 0.0))
            * Matrix4::new_nonuniform_scaling(&Vector3::new(-1.0, 1.0, 1.0));
        let t = bbox.transformed(&m);

        assert!(points_approx_eq(&t.min, &Point3::new(9.0, 0.0, 0.0)));
        assert!(points_approx_eq(&t.max, &Point3::new(10.0, 2.0, 3.0)));
        assert!(points_approx_eq(&t.center(), &Point3::new(9.5, 1.0, 1.5)));
    }
}
