/// Quaternion algebra and quaternion <-> matrix / angle-axis conversion
use std::fmt;
use std::ops::{Mul, Neg};

use crate::error::Degeneracy;
use crate::format::write_fields;
use crate::matrix::Matrix4;
use crate::vector::Vector4;

/// Below this `|sin θ|` slerp blends linearly instead of dividing by `sin θ`.
const SLERP_EPSILON: f32 = 1e-3;

/// Below this `|sin(angle / 2)|` a rotation has no well-defined axis.
const AXIS_EPSILON: f32 = 1e-6;

/// A quaternion `w + xi + yj + zk`.
///
/// Only unit quaternions represent rotations, but non-unit values are
/// allowed; the default is the all-zero quaternion, which is not a rotation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Quaternion {
    pub w: f32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Quaternion {
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 0.0);
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(w: f32, x: f32, y: f32, z: f32) -> Self {
        Self { w, x, y, z }
    }

    /// Rotation of `angle_radians` about `axis` (only `xyz` is used; it does
    /// not need to be normalized).
    pub fn from_angle_axis(angle_radians: f32, axis: &Vector4) -> Result<Self, Degeneracy> {
        let axis = axis.xyz().normalize()?;
        let (sin, cos) = (angle_radians * 0.5).sin_cos();
        Ok(Self::new(cos, axis.x * sin, axis.y * sin, axis.z * sin))
    }

    /// Quaternion of the rotation block of `m`.
    ///
    /// Divides by whichever of `4w²`, `4x²`, `4y²`, `4z²` is largest, so the
    /// denominator never approaches zero for a proper rotation.
    pub fn from_rotation_matrix(m: &Matrix4) -> Self {
        let trace = m.m11 + m.m22 + m.m33;
        let candidates = [
            1.0 + trace,
            1.0 + m.m11 - m.m22 - m.m33,
            1.0 - m.m11 + m.m22 - m.m33,
            1.0 - m.m11 - m.m22 + m.m33,
        ];
        let largest = candidates
            .iter()
            .enumerate()
            .fold(0, |best, (i, c)| if *c > candidates[best] { i } else { best });

        let root = 0.5 * candidates[largest].max(0.0).sqrt();
        let s = 0.25 / root;
        match largest {
            0 => Self::new(
                root,
                (m.m32 - m.m23) * s,
                (m.m13 - m.m31) * s,
                (m.m21 - m.m12) * s,
            ),
            1 => Self::new(
                (m.m32 - m.m23) * s,
                root,
                (m.m12 + m.m21) * s,
                (m.m13 + m.m31) * s,
            ),
            2 => Self::new(
                (m.m13 - m.m31) * s,
                (m.m12 + m.m21) * s,
                root,
                (m.m23 + m.m32) * s,
            ),
            _ => Self::new(
                (m.m21 - m.m12) * s,
                (m.m13 + m.m31) * s,
                (m.m23 + m.m32) * s,
                root,
            ),
        }
    }

    pub fn length(&self) -> f32 {
        self.dot(self).sqrt()
    }

    pub fn normalize(&self) -> Result<Self, Degeneracy> {
        let length = self.length();
        if length == 0.0 {
            return Err(Degeneracy::ZeroLength);
        }
        Ok(self.scale(1.0 / length))
    }

    pub fn normalize_or_zero(&self) -> Self {
        self.normalize().unwrap_or(Self::ZERO)
    }

    /// Negate the vector part in place.
    pub fn conjugate(&mut self) -> &mut Self {
        self.x = -self.x;
        self.y = -self.y;
        self.z = -self.z;
        self
    }

    pub fn conjugated(&self) -> Self {
        let mut q = *self;
        q.conjugate();
        q
    }

    /// `conjugate / |q|²`.
    pub fn inverse(&self) -> Result<Self, Degeneracy> {
        let norm_squared = self.dot(self);
        if norm_squared == 0.0 {
            return Err(Degeneracy::ZeroLength);
        }
        Ok(self.conjugated().scale(1.0 / norm_squared))
    }

    pub fn add(&self, q: &Self) -> Self {
        Self::new(self.w + q.w, self.x + q.x, self.y + q.y, self.z + q.z)
    }

    pub fn subtract(&self, q: &Self) -> Self {
        Self::new(self.w - q.w, self.x - q.x, self.y - q.y, self.z - q.z)
    }

    pub fn scale(&self, scale: f32) -> Self {
        Self::new(self.w * scale, self.x * scale, self.y * scale, self.z * scale)
    }

    /// Hamilton product `self·q`; applies `q` first when used as a rotation.
    pub fn multiply(&self, q: &Self) -> Self {
        let (w1, x1, y1, z1) = (self.w, self.x, self.y, self.z);
        let (w2, x2, y2, z2) = (q.w, q.x, q.y, q.z);
        Self::new(
            w1 * w2 - x1 * x2 - y1 * y2 - z1 * z2,
            w1 * x2 + x1 * w2 + y1 * z2 - z1 * y2,
            w1 * y2 - x1 * z2 + y1 * w2 + z1 * x2,
            w1 * z2 + x1 * y2 - y1 * x2 + z1 * w2,
        )
    }

    pub fn dot(&self, q: &Self) -> f32 {
        self.w * q.w + self.x * q.x + self.y * q.y + self.z * q.z
    }

    /// Rotation angle between the two orientations in radians.
    ///
    /// `q` and `-q` count as the same orientation. Returns 0 if either
    /// quaternion has zero length.
    pub fn angle(&self, q: &Self) -> f32 {
        let lengths = self.length() * q.length();
        if lengths == 0.0 {
            return 0.0;
        }
        2.0 * (self.dot(q).abs() / lengths).min(1.0).acos()
    }

    pub fn angle_degrees(&self, q: &Self) -> f32 {
        self.angle(q).to_degrees()
    }

    /// Component-wise comparison with an absolute tolerance.
    pub fn approx_eq(&self, q: &Self, epsilon: f32) -> bool {
        (self.w - q.w).abs() <= epsilon
            && (self.x - q.x).abs() <= epsilon
            && (self.y - q.y).abs() <= epsilon
            && (self.z - q.z).abs() <= epsilon
    }

    /// Rotation angle of a unit quaternion, in `[0, 2π]`.
    pub fn to_angle(&self) -> f32 {
        2.0 * self.w.clamp(-1.0, 1.0).acos()
    }

    /// Unit rotation axis of a unit quaternion.
    ///
    /// A rotation by 0 or 2π has no axis and yields [`Degeneracy::ZeroLength`].
    pub fn to_axis(&self) -> Result<Vector4, Degeneracy> {
        let sin_half = (self.to_angle() * 0.5).sin();
        if sin_half.abs() < AXIS_EPSILON {
            return Err(Degeneracy::ZeroLength);
        }
        Ok(Vector4::direction(
            self.x / sin_half,
            self.y / sin_half,
            self.z / sin_half,
        ))
    }

    /// Rotation about X in the Z-Y-X (yaw, pitch, roll) convention.
    pub fn to_roll(&self) -> f32 {
        let sin_roll = 2.0 * (self.w * self.x + self.y * self.z);
        let cos_roll = 1.0 - 2.0 * (self.x * self.x + self.y * self.y);
        sin_roll.atan2(cos_roll)
    }

    /// Rotation about Y in the Z-Y-X convention.
    pub fn to_pitch(&self) -> f32 {
        (2.0 * (self.w * self.y - self.z * self.x)).clamp(-1.0, 1.0).asin()
    }

    /// Rotation about Z in the Z-Y-X convention.
    pub fn to_yaw(&self) -> f32 {
        let sin_yaw = 2.0 * (self.w * self.z + self.x * self.y);
        let cos_yaw = 1.0 - 2.0 * (self.y * self.y + self.z * self.z);
        sin_yaw.atan2(cos_yaw)
    }

    /// Rotation matrix of a unit quaternion.
    pub fn to_rotation_matrix(&self) -> Matrix4 {
        let Self { w, x, y, z } = *self;
        let (xx, yy, zz) = (x * x, y * y, z * z);
        let (xy, xz, yz) = (x * y, x * z, y * z);
        let (wx, wy, wz) = (w * x, w * y, w * z);

        Matrix4::from_rotation_rows([
            [1.0 - 2.0 * (yy + zz), 2.0 * (xy - wz), 2.0 * (xz + wy)],
            [2.0 * (xy + wz), 1.0 - 2.0 * (xx + zz), 2.0 * (yz - wx)],
            [2.0 * (xz - wy), 2.0 * (yz + wx), 1.0 - 2.0 * (xx + yy)],
        ])
    }

    /// Rotate `v` by the sandwich product `q·v·q⁻¹`.
    ///
    /// Only the `xyz` part of `v` is used; the result is a direction (`w = 0`).
    pub fn apply_to_vector(&self, v: &Vector4) -> Result<Vector4, Degeneracy> {
        let pure = Self::new(0.0, v.x, v.y, v.z);
        let rotated = self.multiply(&pure).multiply(&self.inverse()?);
        Ok(Vector4::direction(rotated.x, rotated.y, rotated.z))
    }

    /// Spherical linear interpolation towards `q`.
    ///
    /// `t` is clamped to `[0, 1]`, returning the endpoints unchanged. The
    /// shorter arc is always taken. Nearly parallel inputs fall back to a
    /// linear blend weighted by `t`.
    pub fn slerp(&self, q: &Self, t: f32) -> Self {
        if t <= 0.0 {
            return *self;
        }
        if t >= 1.0 {
            return *q;
        }

        let mut target = *q;
        let mut cos_theta = self.dot(q);
        if cos_theta < 0.0 {
            target = -target;
            cos_theta = -cos_theta;
        }
        let cos_theta = cos_theta.min(1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

        if sin_theta.abs() < SLERP_EPSILON {
            tracing::trace!(sin_theta, t, "slerp endpoints nearly parallel, blending linearly");
            return self.scale(1.0 - t).add(&target.scale(t));
        }

        let theta = sin_theta.atan2(cos_theta);
        let from = ((1.0 - t) * theta).sin() / sin_theta;
        let to = (t * theta).sin() / sin_theta;
        self.scale(from).add(&target.scale(to))
    }
}

impl Mul for Quaternion {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl Neg for Quaternion {
    type Output = Self;

    fn neg(self) -> Self {
        self.scale(-1.0)
    }
}

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Quaternion(")?;
        write_fields(
            f,
            &[("w", self.w), ("x", self.x), ("y", self.y), ("z", self.z)],
        )?;
        write!(f, ")")
    }
}
