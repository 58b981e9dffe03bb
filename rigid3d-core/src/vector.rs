/// Fixed-size vectors used as directions, points and rotation axes
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use crate::error::Degeneracy;
use crate::format::write_fields;
use crate::matrix::Matrix4;

/// A three-component vector
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Flip the sign of every component in place.
    ///
    /// Returns `self` so calls can be chained.
    pub fn negate(&mut self) -> &mut Self {
        self.x = -self.x;
        self.y = -self.y;
        self.z = -self.z;
        self
    }

    pub fn length(&self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction.
    pub fn normalize(&self) -> Result<Self, Degeneracy> {
        let length = self.length();
        if length == 0.0 {
            return Err(Degeneracy::ZeroLength);
        }
        Ok(self.scale(1.0 / length))
    }

    /// Like [`normalize`](Self::normalize) but yields the zero vector for a
    /// zero-length input.
    pub fn normalize_or_zero(&self) -> Self {
        self.normalize().unwrap_or(Self::ZERO)
    }

    pub fn scale(&self, scale: f32) -> Self {
        Self::new(self.x * scale, self.y * scale, self.z * scale)
    }

    /// On an owned vector `v.add(..)` resolves to [`Add::add`]; use `v + w`.
    pub fn add(&self, v: &Self) -> Self {
        Self::new(self.x + v.x, self.y + v.y, self.z + v.z)
    }

    pub fn subtract(&self, v: &Self) -> Self {
        Self::new(self.x - v.x, self.y - v.y, self.z - v.z)
    }

    pub fn dot(&self, v: &Self) -> f32 {
        self.x * v.x + self.y * v.y + self.z * v.z
    }

    pub fn cross(&self, v: &Self) -> Self {
        Self::new(
            self.y * v.z - self.z * v.y,
            self.z * v.x - self.x * v.z,
            self.x * v.y - self.y * v.x,
        )
    }

    /// Signed length of the projection of `self` onto `v`, or 0 if `v` has
    /// zero length.
    pub fn project(&self, v: &Self) -> f32 {
        let length = v.length();
        if length == 0.0 {
            return 0.0;
        }
        self.dot(v) / length
    }

    /// Angle between the two vectors in radians, or 0 if either is zero.
    pub fn angle(&self, v: &Self) -> f32 {
        let lengths = self.length() * v.length();
        if lengths == 0.0 {
            return 0.0;
        }
        (self.dot(v) / lengths).clamp(-1.0, 1.0).acos()
    }

    pub fn angle_degrees(&self, v: &Self) -> f32 {
        self.angle(v).to_degrees()
    }

    /// Reflect about the plane with unit normal `normal`.
    ///
    /// `normal` must already be normalized; it is not checked.
    pub fn reflect(&self, normal: &Self) -> Self {
        self.subtract(&normal.scale(2.0 * self.dot(normal)))
    }

    /// Lift into homogeneous coordinates with the given `w`.
    pub fn extend(&self, w: f32) -> Vector4 {
        Vector4::new(self.x, self.y, self.z, w)
    }
}

impl Add for Vector3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Vector3::add(&self, &rhs)
    }
}

impl Sub for Vector3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.subtract(&rhs)
    }
}

impl Mul<f32> for Vector3 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        self.scale(rhs)
    }
}

impl Neg for Vector3 {
    type Output = Self;

    fn neg(mut self) -> Self {
        self.negate();
        self
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector3(")?;
        write_fields(f, &[("x", self.x), ("y", self.y), ("z", self.z)])?;
        write!(f, ")")
    }
}

/// A homogeneous four-component vector.
///
/// By convention `w` is 0 for directions and 1 for points, but nothing here
/// enforces it. [`length`](Self::length), [`dot`](Self::dot) and
/// [`normalize`](Self::normalize) include `w`; [`cross`](Self::cross) works on
/// the `xyz` part only.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vector4 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Direction vector (`w = 0`).
    pub const fn direction(x: f32, y: f32, z: f32) -> Self {
        Self::new(x, y, z, 0.0)
    }

    pub fn xyz(&self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Flip the sign of all four components in place.
    pub fn negate(&mut self) -> &mut Self {
        self.x = -self.x;
        self.y = -self.y;
        self.z = -self.z;
        self.w = -self.w;
        self
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

    pub fn scale(&self, scale: f32) -> Self {
        Self::new(self.x * scale, self.y * scale, self.z * scale, self.w * scale)
    }

    /// On an owned vector `v.add(..)` resolves to [`Add::add`]; use `v + w`.
    pub fn add(&self, v: &Self) -> Self {
        Self::new(self.x + v.x, self.y + v.y, self.z + v.z, self.w + v.w)
    }

    pub fn subtract(&self, v: &Self) -> Self {
        Self::new(self.x - v.x, self.y - v.y, self.z - v.z, self.w - v.w)
    }

    pub fn dot(&self, v: &Self) -> f32 {
        self.x * v.x + self.y * v.y + self.z * v.z + self.w * v.w
    }

    /// Cross product of the `xyz` parts; the result is a direction (`w = 0`).
    pub fn cross(&self, v: &Self) -> Self {
        self.xyz().cross(&v.xyz()).extend(0.0)
    }

    pub fn project(&self, v: &Self) -> f32 {
        let length = v.length();
        if length == 0.0 {
            return 0.0;
        }
        self.dot(v) / length
    }

    pub fn angle(&self, v: &Self) -> f32 {
        let lengths = self.length() * v.length();
        if lengths == 0.0 {
            return 0.0;
        }
        (self.dot(v) / lengths).clamp(-1.0, 1.0).acos()
    }

    pub fn angle_degrees(&self, v: &Self) -> f32 {
        self.angle(v).to_degrees()
    }

    /// `v - 2(v·n)n`; `normal` must be a unit vector.
    pub fn reflect(&self, normal: &Self) -> Self {
        self.subtract(&normal.scale(2.0 * self.dot(normal)))
    }

    /// Row vector times matrix (`v·M`).
    ///
    /// Rotation matrices in this crate act on column vectors, so this applies
    /// the transpose, i.e. the inverse rotation. Use
    /// [`Matrix4::multiply_vector`] to rotate a vector.
    pub fn multiply_matrix(&self, m: &Matrix4) -> Self {
        Self::new(
            self.x * m.m11 + self.y * m.m21 + self.z * m.m31 + self.w * m.m41,
            self.x * m.m12 + self.y * m.m22 + self.z * m.m32 + self.w * m.m42,
            self.x * m.m13 + self.y * m.m23 + self.z * m.m33 + self.w * m.m43,
            self.x * m.m14 + self.y * m.m24 + self.z * m.m34 + self.w * m.m44,
        )
    }
}

impl From<Vector3> for Vector4 {
    fn from(v: Vector3) -> Self {
        v.extend(0.0)
    }
}

impl Add for Vector4 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Vector4::add(&self, &rhs)
    }
}

impl Sub for Vector4 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.subtract(&rhs)
    }
}

impl Mul<f32> for Vector4 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        self.scale(rhs)
    }
}

impl Neg for Vector4 {
    type Output = Self;

    fn neg(mut self) -> Self {
        self.negate();
        self
    }
}

impl fmt::Display for Vector4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector4(")?;
        write_fields(
            f,
            &[("x", self.x), ("y", self.y), ("z", self.z), ("w", self.w)],
        )?;
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_normalize_has_unit_length() {
        for v in [
            Vector3::new(3.0, 4.0, 0.0),
            Vector3::new(-1.0, 2.0, -7.5),
            Vector3::new(1e-3, 0.0, 2e-3),
        ] {
            let n = v.normalize().unwrap();
            assert_relative_eq!(n.length(), 1.0, epsilon = 1e-6);
        }

        let v4 = Vector4::new(1.0, 2.0, 2.0, 4.0).normalize().unwrap();
        assert_relative_eq!(v4.length(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_normalize_zero_vector() {
        assert_eq!(Vector3::ZERO.normalize(), Err(Degeneracy::ZeroLength));
        assert_eq!(Vector3::ZERO.normalize_or_zero(), Vector3::ZERO);
        assert_eq!(Vector4::ZERO.normalize_or_zero(), Vector4::ZERO);
    }

    #[test]
    fn test_dot_is_symmetric_and_cross_antisymmetric() {
        let a = Vector3::new(1.5, -2.0, 0.25);
        let b = Vector3::new(-3.0, 0.5, 4.0);
        assert_eq!(a.dot(&b), b.dot(&a));
        assert_eq!(a.cross(&b), -b.cross(&a));

        let a4 = Vector4::new(1.5, -2.0, 0.25, 1.0);
        let b4 = Vector4::new(-3.0, 0.5, 4.0, 1.0);
        assert_eq!(a4.dot(&b4), b4.dot(&a4));
        assert_eq!(a4.cross(&b4), -b4.cross(&a4));
    }

    #[test]
    fn test_cross_of_axes() {
        let x = Vector3::new(1.0, 0.0, 0.0);
        let y = Vector3::new(0.0, 1.0, 0.0);
        assert_eq!(x.cross(&y), Vector3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_vector4_cross_forces_zero_w() {
        let a = Vector4::new(1.0, 0.0, 0.0, 1.0);
        let b = Vector4::new(0.0, 1.0, 0.0, 1.0);
        assert_eq!(a.cross(&b), Vector4::new(0.0, 0.0, 1.0, 0.0));
    }

    #[test]
    fn test_project() {
        let v = Vector3::new(3.0, 4.0, 0.0);
        assert_relative_eq!(v.project(&Vector3::new(2.0, 0.0, 0.0)), 3.0);
        assert_eq!(v.project(&Vector3::ZERO), 0.0);
    }

    #[test]
    fn test_angle() {
        let x = Vector3::new(1.0, 0.0, 0.0);
        let y = Vector3::new(0.0, 2.0, 0.0);
        assert_relative_eq!(x.angle(&y), FRAC_PI_2, epsilon = 1e-6);
        assert_relative_eq!(x.angle_degrees(&y), 90.0, epsilon = 1e-4);
        assert_relative_eq!(x.angle(&x.scale(-3.0)), PI, epsilon = 1e-6);
        assert_eq!(x.angle(&Vector3::ZERO), 0.0);
    }

    #[test]
    fn test_vector4_zero_length_guards() {
        let v = Vector4::new(1.0, 2.0, 3.0, 1.0);
        assert_eq!(v.project(&Vector4::ZERO), 0.0);
        assert_eq!(v.angle(&Vector4::ZERO), 0.0);
        assert_eq!(Vector4::ZERO.angle(&v), 0.0);
    }

    #[test]
    fn test_inherent_add_matches_operator() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(-4.0, 0.5, 2.0);
        assert_eq!(Vector3::add(&a, &b), a + b);
        assert_eq!(Vector3::add(&a, &b).subtract(&b), a);

        let c = Vector4::new(1.0, 2.0, 3.0, 1.0);
        assert_eq!(Vector4::add(&c, &c), c * 2.0);
    }

    #[test]
    fn test_reflect() {
        let v = Vector3::new(1.0, -1.0, 0.0);
        let n = Vector3::new(0.0, 1.0, 0.0);
        assert_eq!(v.reflect(&n), Vector3::new(1.0, 1.0, 0.0));

        let v4 = Vector4::direction(1.0, -1.0, 0.0);
        assert_eq!(v4.reflect(&n.extend(0.0)), Vector4::direction(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_negate_in_place_chains() {
        let mut v = Vector3::new(1.0, -2.0, 3.0);
        v.negate().negate().negate();
        assert_eq!(v, Vector3::new(-1.0, 2.0, -3.0));

        let mut v4 = Vector4::new(1.0, 2.0, 3.0, 1.0);
        let len = v4.negate().length();
        assert_eq!(v4, Vector4::new(-1.0, -2.0, -3.0, -1.0));
        assert_relative_eq!(len, 15.0_f32.sqrt());
    }

    #[test]
    fn test_equality_is_exact() {
        let a = Vector4::new(0.1, 0.2, 0.3, 0.0);
        let b = Vector4::new(0.1, 0.2, 0.3 + 1e-7, 0.0);
        assert_eq!(a, a);
        assert_ne!(a, b);
    }

    #[test]
    fn test_multiply_matrix_applies_transpose() {
        let m = Matrix4::new(
            1.0, 2.0, 3.0, 4.0, //
            5.0, 6.0, 7.0, 8.0, //
            9.0, 10.0, 11.0, 12.0, //
            13.0, 14.0, 15.0, 16.0,
        );
        let v = Vector4::new(1.0, 0.0, 0.0, 0.0);
        assert_eq!(v.multiply_matrix(&m), Vector4::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(m.multiply_vector(&v), Vector4::new(1.0, 5.0, 9.0, 13.0));
        assert_eq!(v.multiply_matrix(&m), m.transpose().multiply_vector(&v));
    }

    #[test]
    fn test_display_uses_precision() {
        let v = Vector3::new(1.0, 2.5, -0.25);
        assert_eq!(format!("{v:.2}"), "Vector3(x: 1.00 y: 2.50 z: -0.25)");
        assert_eq!(
            format!("{}", Vector4::direction(1.0, 0.0, 0.0)),
            "Vector4(x: 1.000000 y: 0.000000 z: 0.000000 w: 0.000000)"
        );
    }
}
