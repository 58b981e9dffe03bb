/// Conversions to and from nalgebra types
use nalgebra as na;

use crate::euler::Euler;
use crate::matrix::Matrix4;
use crate::quaternion::Quaternion;
use crate::vector::{Vector3, Vector4};

impl From<Vector3> for na::Vector3<f32> {
    fn from(v: Vector3) -> Self {
        na::Vector3::new(v.x, v.y, v.z)
    }
}

impl From<na::Vector3<f32>> for Vector3 {
    fn from(v: na::Vector3<f32>) -> Self {
        Vector3::new(v.x, v.y, v.z)
    }
}

impl From<Vector4> for na::Vector4<f32> {
    fn from(v: Vector4) -> Self {
        na::Vector4::new(v.x, v.y, v.z, v.w)
    }
}

impl From<na::Vector4<f32>> for Vector4 {
    fn from(v: na::Vector4<f32>) -> Self {
        Vector4::new(v.x, v.y, v.z, v.w)
    }
}

impl From<Matrix4> for na::Matrix4<f32> {
    fn from(m: Matrix4) -> Self {
        // Both take their arguments row by row.
        na::Matrix4::new(
            m.m11, m.m12, m.m13, m.m14,
            m.m21, m.m22, m.m23, m.m24,
            m.m31, m.m32, m.m33, m.m34,
            m.m41, m.m42, m.m43, m.m44,
        )
    }
}

impl From<na::Matrix4<f32>> for Matrix4 {
    fn from(m: na::Matrix4<f32>) -> Self {
        let mut rows = [[0.0_f32; 4]; 4];
        for (i, row) in rows.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = m[(i, j)];
            }
        }
        Matrix4::from_rows(rows)
    }
}

impl From<Quaternion> for na::Quaternion<f32> {
    fn from(q: Quaternion) -> Self {
        na::Quaternion::new(q.w, q.x, q.y, q.z)
    }
}

impl From<na::Quaternion<f32>> for Quaternion {
    fn from(q: na::Quaternion<f32>) -> Self {
        Quaternion::new(q.w, q.i, q.j, q.k)
    }
}

impl From<Euler> for na::Rotation3<f32> {
    fn from(euler: Euler) -> Self {
        let m = euler.rotation_matrix();
        na::Rotation3::from_matrix_unchecked(na::Matrix3::new(
            m.m11, m.m12, m.m13,
            m.m21, m.m22, m.m23,
            m.m31, m.m32, m.m33,
        ))
    }
}
