//! CSG 图元
//!
//! 内置长方体、球体和圆柱体；其他形状通过 [`CustomSolid`] 扩展。

use crate::face::Alignment;
use crate::math::{BoundingBox3, Point3, Vector3};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::sync::Arc;

/// 内置图元
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Primitive {
    /// 长方体，`centered` 为假时最小角位于原点
    Cuboid { size: Vector3, centered: bool },
    /// 以原点为中心的球体
    Sphere { radius: f64 },
    /// 以原点为中心、沿 `alignment` 轴的圆柱（两端半径不同时为圆台）
    Cylinder {
        radius_bottom: f64,
        radius_top: f64,
        height: f64,
        alignment: Alignment,
    },
}

impl Primitive {
    pub fn cuboid(size: Vector3) -> Self {
        Primitive::Cuboid {
            size,
            centered: true,
        }
    }

    pub fn cuboid_at_origin(size: Vector3) -> Self {
        Primitive::Cuboid {
            size,
            centered: false,
        }
    }

    pub fn sphere(radius: f64) -> Self {
        Primitive::Sphere { radius }
    }

    pub fn cylinder(radius: f64, height: f64, alignment: Alignment) -> Self {
        Primitive::Cylinder {
            radius_bottom: radius,
            radius_top: radius,
            height,
            alignment,
        }
    }

    pub fn cone(radius_bottom: f64, radius_top: f64, height: f64, alignment: Alignment) -> Self {
        Primitive::Cylinder {
            radius_bottom,
            radius_top,
            height,
            alignment,
        }
    }

    /// 获取图元的包围盒
    pub fn bounding_box(&self) -> BoundingBox3 {
        match self {
            Primitive::Cuboid { size, centered } => {
                if *centered {
                    let half = size / 2.0;
                    BoundingBox3::new(Point3::from(-half), Point3::from(half))
                } else {
                    BoundingBox3::new(Point3::origin(), Point3::from(*size))
                }
            }
            Primitive::Sphere { radius } => {
                let r = Vector3::repeat(*radius);
                BoundingBox3::new(Point3::from(-r), Point3::from(r))
            }
            Primitive::Cylinder {
                radius_bottom,
                radius_top,
                height,
                alignment,
            } => {
                let r = radius_bottom.max(*radius_top);
                let mut half = Vector3::repeat(r);
                half[alignment.axis_index()] = height / 2.0;
                BoundingBox3::new(Point3::from(-half), Point3::from(half))
            }
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Primitive::Cuboid { .. } => "Cuboid",
            Primitive::Sphere { .. } => "Sphere",
            Primitive::Cylinder { .. } => "Cylinder",
        }
    }
}

/// 用户自定义实体
///
/// 展平时通过 `duplicate` 复制；返回 `None` 的实现无法参与展平。
pub trait CustomSolid: Debug + Send + Sync {
    fn type_name(&self) -> &str;

    fn bounding_box(&self) -> BoundingBox3;

    fn duplicate(&self) -> Option<Arc<dyn CustomSolid>> {
        None
    }
}

impl PartialEq for dyn CustomSolid {
    fn eq(&self, other: &Self) -> bool {
        self.type_name() == other.type_name() && self.bounding_box() == other.bounding_box()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::points_approx_eq;

    #[test]
    fn test_cuboid_bounds() {
        let centered = Primitive::cuboid(Vector3::new(2.0, 4.0, 6.0)).bounding_box();
        assert!(points_approx_eq(&centered.min, &Point3::new(-1.0, -2.0, -3.0)));
        assert!(points_approx_eq(&centered.max, &Point3::new(1.0, 2.0, 3.0)));

        let corner = Primitive::cuboid_at_origin(Vector3::new(1.0, 1.0, 1.0)).bounding_box();
        assert!(points_approx_eq(&corner.min, &Point3::origin()));
        assert!(points_approx_eq(&corner.max, &Point3::new(1.0, 1.0, 1.0)));
    }

    #[test]
    fn test_cylinder_bounds_follow_alignment() {
        let bbox = Primitive::cone(2.0, 1.0, 10.0, Alignment::NegX).bounding_box();
        assert!(points_approx_eq(&bbox.min, &Point3::new(-5.0, -2.0, -2.0)));
        assert!(points_approx_eq(&bbox.max, &Point3::new(5.0, 2.0, 2.0)));
    }

    #[test]
    fn test_sphere_bounds() {
        let bbox = Primitive::sphere(3.0).bounding_box();
        assert!(points_approx_eq(&bbox.center(), &Point3::origin()));
        assert_eq!(bbox.size(), Vector3::repeat(6.0));
    }
}
