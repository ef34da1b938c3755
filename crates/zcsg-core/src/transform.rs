//! 3D变换操作
//!
//! 支持平移、旋转、缩放、镜像等仿射变换。

use crate::math::{BoundingBox3, Matrix4, Point3, Vector3};
use nalgebra as na;
use serde::{Deserialize, Serialize};

/// 3D仿射变换
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform3D {
    matrix: Matrix4,
}

impl Transform3D {
    /// 创建单位变换
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// 创建平移变换
    pub fn translation(offset: Vector3) -> Self {
        Self {
            matrix: Matrix4::new_translation(&offset),
        }
    }

    /// 创建缩放变换（绕原点），负值表示镜像
    pub fn scale(factor: Vector3) -> Self {
        Self {
            matrix: Matrix4::new_nonuniform_scaling(&factor),
        }
    }

    /// 创建均匀缩放变换
    pub fn uniform_scale(s: f64) -> Self {
        Self::scale(Vector3::new(s, s, s))
    }

    /// 绕X轴旋转（弧度）
    pub fn rotation_x(angle: f64) -> Self {
        Self::rotation_axis(Vector3::x_axis(), angle)
    }

    /// 绕Y轴旋转（弧度）
    pub fn rotation_y(angle: f64) -> Self {
        Self::rotation_axis(Vector3::y_axis(), angle)
    }

    /// 绕Z轴旋转（弧度）
    pub fn rotation_z(angle: f64) -> Self {
        Self::rotation_axis(Vector3::z_axis(), angle)
    }

    fn rotation_axis(axis: na::Unit<Vector3>, angle: f64) -> Self {
        Self {
            matrix: na::Rotation3::from_axis_angle(&axis, angle).to_homogeneous(),
        }
    }

    /// 按角度依次绕X、Y、Z轴旋转
    pub fn rotation_euler_degrees(degrees: Vector3) -> Self {
        Self::rotation_z(degrees.z.to_radians())
            .then(&Self::rotation_y(degrees.y.to_radians()))
            .then(&Self::rotation_x(degrees.x.to_radians()))
    }

    /// 组合两个变换（self 在后，other 在前）
    pub fn then(&self, other: &Transform3D) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// 变换一个点
    pub fn transform_point(&self, point: &Point3) -> Point3 {
        self.matrix.transform_point(point)
    }

    /// 变换一个向量（不受平移影响）
    pub fn transform_vector(&self, vector: &Vector3) -> Vector3 {
        self.matrix.transform_vector(vector)
    }

    /// 变换包围盒
    pub fn transform_bounding_box(&self, bbox: &BoundingBox3) -> BoundingBox3 {
        bbox.transformed(&self.matrix)
    }

    /// 获取逆变换
    pub fn inverse(&self) -> Option<Self> {
        self.matrix.try_inverse().map(|m| Self { matrix: m })
    }

    /// 获取变换矩阵
    pub fn matrix(&self) -> &Matrix4 {
        &self.matrix
    }

    /// 从矩阵创建变换
    pub fn from_matrix(matrix: Matrix4) -> Self {
        Self { matrix }
    }

    /// 提取平移分量
    pub fn translation_component(&self) -> Vector3 {
        Vector3::new(
            self.matrix[(0, 3)],
            self.matrix[(1, 3)],
            self.matrix[(2, 3)],
        )
    }

    /// 是否包含镜像（线性部分行列式为负）
    pub fn is_mirroring(&self) -> bool {
        self.matrix.fixed_view::<3, 3>(0, 0).determinant() < 0.0
    }
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for Transform3D {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self {
            matrix: self.matrix * rhs.matrix,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{approx_eq, points_approx_eq};

    #[test]
    fn test_translation() {
        let t = Transform3D::translation(Vector3::new(10.0, 20.0, 30.0));
        let p = Point3::new(5.0, 5.0, 5.0);
        let result = t.transform_point(&p);

        assert!(points_approx_eq(&result, &Point3::new(15.0, 25.0, 35.0)));
        assert!(approx_eq(t.translation_component().z, 30.0));
        // 向量不受平移影响
        let v = t.transform_vector(&Vector3::new(1.0, 0.0, 0.0));
        assert!(approx_eq(v.x, 1.0));
    }

    #[test]
    fn test_rotation() {
        let t = Transform3D::rotation_z(std::f64::consts::PI / 2.0);
        let result = t.transform_point(&Point3::new(1.0, 0.0, 0.0));

        assert!(points_approx_eq(&result, &Point3::new(0.0, 1.0, 0.0)));

        let t = Transform3D::rotation_euler_degrees(Vector3::new(90.0, 0.0, 0.0));
        let result = t.transform_point(&Point3::new(0.0, 1.0, 0.0));
        assert!(points_approx_eq(&result, &Point3::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_scale_and_mirror() {
        let t = Transform3D::scale(Vector3::new(2.0, 3.0, 4.0));
        let result = t.transform_point(&Point3::new(5.0, 10.0, 1.0));

        assert!(points_approx_eq(&result, &Point3::new(10.0, 30.0, 4.0)));
        assert!(!t.is_mirroring());
        assert!(Transform3D::scale(Vector3::new(-1.0, 1.0, 1.0)).is_mirroring());
    }

    #[test]
    fn test_inverse() {
        let t = Transform3D::translation(Vector3::new(10.0, 20.0, 0.0))
            .then(&Transform3D::rotation_y(0.5))
            .then(&Transform3D::scale(Vector3::new(2.0, 3.0, 1.0)));

        let inv = t.inverse().unwrap();
        let p = Point3::new(100.0, 200.0, -3.0);

        let transformed = t.transform_point(&p);
        let restored = inv.transform_point(&transformed);

        assert!((restored - p).norm() < 1e-9);
        assert!(Transform3D::uniform_scale(0.0).inverse().is_none());
    }

    #[test]
    fn test_transform_bounding_box() {
        let bbox = BoundingBox3::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0));
        let t = Transform3D::translation(Vector3::new(5.0, 0.0, 0.0)) * Transform3D::uniform_scale(2.0);
        let out = t.transform_bounding_box(&bbox);

        assert!(points_approx_eq(&out.min, &Point3::new(3.0, -2.0, -2.0)));
        assert!(points_approx_eq(&out.max, &Point3::new(7.0, 2.0, 2.0)));
    }
}
