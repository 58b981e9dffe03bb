/// Euler angles with an explicit axis order, and their conversion to and
/// from rotation matrices
use std::fmt;
use std::str::FromStr;

use crate::error::{Degeneracy, Error};
use crate::format::write_fields;
use crate::matrix::Matrix4;
use crate::quaternion::Quaternion;
use crate::vector::Vector4;

/// Below this `cos` of the middle angle, extraction treats the matrix as
/// gimbal locked.
pub const GIMBAL_EPSILON: f32 = 1e-6;

/// A coordinate axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// The sequence in which the three elementary rotations are composed.
///
/// Order `ABC` is the matrix `R_A · R_B · R_C` acting on column vectors,
/// i.e. rotate about `A`, then about the rotated `B`, then about the twice
/// rotated `C`.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Order {
    #[default]
    XYZ,
    XZY,
    YXZ,
    YZX,
    ZXY,
    ZYX,
}

impl Order {
    pub const ALL: [Order; 6] = [
        Order::XYZ,
        Order::XZY,
        Order::YXZ,
        Order::YZX,
        Order::ZXY,
        Order::ZYX,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Order::XYZ => "XYZ",
            Order::XZY => "XZY",
            Order::YXZ => "YXZ",
            Order::YZX => "YZX",
            Order::ZXY => "ZXY",
            Order::ZYX => "ZYX",
        }
    }

    /// Axes in application order.
    pub const fn axes(self) -> [Axis; 3] {
        use Axis::{X, Y, Z};
        match self {
            Order::XYZ => [X, Y, Z],
            Order::XZY => [X, Z, Y],
            Order::YXZ => [Y, X, Z],
            Order::YZX => [Y, Z, X],
            Order::ZXY => [Z, X, Y],
            Order::ZYX => [Z, Y, X],
        }
    }

    /// Closed-form rotation matrix for angles `alpha`, `beta`, `gamma` about
    /// X, Y and Z.
    pub fn compose(self, alpha: f32, beta: f32, gamma: f32) -> Matrix4 {
        let (sa, ca) = alpha.sin_cos();
        let (sb, cb) = beta.sin_cos();
        let (sc, cc) = gamma.sin_cos();

        let rows = match self {
            Order::XYZ => [
                [cb * cc, -cb * sc, sb],
                [sa * sb * cc + ca * sc, ca * cc - sa * sb * sc, -sa * cb],
                [sa * sc - ca * sb * cc, sa * cc + ca * sb * sc, ca * cb],
            ],
            Order::XZY => [
                [cc * cb, -sc, cc * sb],
                [ca * sc * cb + sa * sb, ca * cc, ca * sc * sb - sa * cb],
                [sa * sc * cb - ca * sb, sa * cc, sa * sc * sb + ca * cb],
            ],
            Order::YXZ => [
                [cb * cc + sb * sa * sc, sb * sa * cc - cb * sc, sb * ca],
                [ca * sc, ca * cc, -sa],
                [cb * sa * sc - sb * cc, sb * sc + cb * sa * cc, cb * ca],
            ],
            Order::YZX => [
                [cb * cc, sb * sa - cb * sc * ca, cb * sc * sa + sb * ca],
                [sc, cc * ca, -cc * sa],
                [-sb * cc, sb * sc * ca + cb * sa, cb * ca - sb * sc * sa],
            ],
            Order::ZXY => [
                [cc * cb - sc * sa * sb, -sc * ca, cc * sb + sc * sa * cb],
                [sc * cb + cc * sa * sb, cc * ca, sc * sb - cc * sa * cb],
                [-ca * sb, sa, ca * cb],
            ],
            Order::ZYX => [
                [cc * cb, cc * sb * sa - sc * ca, cc * sb * ca + sc * sa],
                [sc * cb, sc * sb * sa + cc * ca, sc * sb * ca - cc * sa],
                [-sb, cb * sa, cb * ca],
            ],
        };

        Matrix4::from_rotation_rows(rows)
    }

    /// Recover `(alpha, beta, gamma)` from the rotation block of `m`.
    ///
    /// The middle angle comes from a single entry. When its cosine is at or
    /// below `epsilon` the first and third axes coincide; the angle about the
    /// first axis is then fixed to zero and the third absorbs the rotation.
    /// Returns the angles and whether that gimbal-lock branch was taken.
    fn extract(self, m: &Matrix4, epsilon: f32) -> ([f32; 3], bool) {
        let (angles, locked) = match self {
            Order::XYZ => {
                let cos_beta = m.m11.hypot(m.m12);
                let beta = m.m13.atan2(cos_beta);
                if cos_beta > epsilon {
                    let alpha = (-m.m23).atan2(m.m33);
                    let gamma = (-m.m12).atan2(m.m11);
                    ([alpha, beta, gamma], false)
                } else {
                    ([0.0, beta, m.m21.atan2(m.m22)], true)
                }
            }
            Order::XZY => {
                let cos_gamma = m.m11.hypot(m.m13);
                let gamma = (-m.m12).atan2(cos_gamma);
                if cos_gamma > epsilon {
                    let alpha = m.m32.atan2(m.m22);
                    let beta = m.m13.atan2(m.m11);
                    ([alpha, beta, gamma], false)
                } else {
                    ([0.0, (-m.m31).atan2(m.m33), gamma], true)
                }
            }
            Order::YXZ => {
                let cos_alpha = m.m21.hypot(m.m22);
                let alpha = (-m.m23).atan2(cos_alpha);
                if cos_alpha > epsilon {
                    let beta = m.m13.atan2(m.m33);
                    let gamma = m.m21.atan2(m.m22);
                    ([alpha, beta, gamma], false)
                } else {
                    ([alpha, 0.0, (-m.m12).atan2(m.m11)], true)
                }
            }
            Order::YZX => {
                let cos_gamma = m.m22.hypot(m.m23);
                let gamma = m.m21.atan2(cos_gamma);
                if cos_gamma > epsilon {
                    let alpha = (-m.m23).atan2(m.m22);
                    let beta = (-m.m31).atan2(m.m11);
                    ([alpha, beta, gamma], false)
                } else {
                    ([m.m32.atan2(m.m33), 0.0, gamma], true)
                }
            }
            Order::ZXY => {
                let cos_alpha = m.m31.hypot(m.m33);
                let alpha = m.m32.atan2(cos_alpha);
                if cos_alpha > epsilon {
                    let beta = (-m.m31).atan2(m.m33);
                    let gamma = (-m.m12).atan2(m.m22);
                    ([alpha, beta, gamma], false)
                } else {
                    ([alpha, m.m13.atan2(m.m11), 0.0], true)
                }
            }
            Order::ZYX => {
                let cos_beta = m.m32.hypot(m.m33);
                let beta = (-m.m31).atan2(cos_beta);
                if cos_beta > epsilon {
                    let alpha = m.m32.atan2(m.m33);
                    let gamma = m.m21.atan2(m.m11);
                    ([alpha, beta, gamma], false)
                } else {
                    ([(-m.m23).atan2(m.m22), beta, 0.0], true)
                }
            }
        };

        if locked {
            tracing::debug!(order = self.as_str(), "gimbal lock, first axis angle fixed to zero");
        }
        (angles, locked)
    }
}

impl FromStr for Order {
    type Err = Error;

    /// Accepts the six orders spelled either all upper case or all lower case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "XYZ" | "xyz" => Ok(Order::XYZ),
            "XZY" | "xzy" => Ok(Order::XZY),
            "YXZ" | "yxz" => Ok(Order::YXZ),
            "YZX" | "yzx" => Ok(Order::YZX),
            "ZXY" | "zxy" => Ok(Order::ZXY),
            "ZYX" | "zyx" => Ok(Order::ZYX),
            _ => Err(Error::InvalidOrder(s.to_string())),
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Three rotation angles in radians, about X (`alpha`), Y (`beta`) and Z
/// (`gamma`), composed in `order`.
///
/// The same three numbers describe a different rotation under a different
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Euler {
    pub alpha: f32,
    pub beta: f32,
    pub gamma: f32,
    pub order: Order,
}

impl Euler {
    pub const fn new(alpha: f32, beta: f32, gamma: f32, order: Order) -> Self {
        Self {
            alpha,
            beta,
            gamma,
            order,
        }
    }

    /// Like [`new`](Self::new) with the order given as text, e.g. `"zyx"`.
    pub fn with_order(alpha: f32, beta: f32, gamma: f32, order: &str) -> Result<Self, Error> {
        Ok(Self::new(alpha, beta, gamma, order.parse()?))
    }

    pub fn from_degrees(alpha: f32, beta: f32, gamma: f32, order: Order) -> Self {
        Self::new(alpha.to_radians(), beta.to_radians(), gamma.to_radians(), order)
    }

    /// `[alpha, beta, gamma]` in degrees.
    pub fn to_degrees(&self) -> [f32; 3] {
        [
            self.alpha.to_degrees(),
            self.beta.to_degrees(),
            self.gamma.to_degrees(),
        ]
    }

    /// Angles about X, Y, Z in application order.
    pub fn ordered_angles(&self) -> [f32; 3] {
        self.order.axes().map(|axis| match axis {
            Axis::X => self.alpha,
            Axis::Y => self.beta,
            Axis::Z => self.gamma,
        })
    }

    pub fn rotate_x(&self) -> Matrix4 {
        let (s, c) = self.alpha.sin_cos();
        Matrix4::from_rotation_rows([[1.0, 0.0, 0.0], [0.0, c, -s], [0.0, s, c]])
    }

    pub fn rotate_y(&self) -> Matrix4 {
        let (s, c) = self.beta.sin_cos();
        Matrix4::from_rotation_rows([[c, 0.0, s], [0.0, 1.0, 0.0], [-s, 0.0, c]])
    }

    pub fn rotate_z(&self) -> Matrix4 {
        let (s, c) = self.gamma.sin_cos();
        Matrix4::from_rotation_rows([[c, -s, 0.0], [s, c, 0.0], [0.0, 0.0, 1.0]])
    }

    /// Full rotation matrix for `self.order`.
    pub fn rotation_matrix(&self) -> Matrix4 {
        self.order.compose(self.alpha, self.beta, self.gamma)
    }

    pub fn from_rotation_matrix(m: &Matrix4, order: Order) -> Self {
        Self::from_rotation_matrix_with_epsilon(m, order, GIMBAL_EPSILON)
    }

    /// Extract angles for `order`, resolving gimbal lock by zeroing the angle
    /// about the first axis.
    pub fn from_rotation_matrix_with_epsilon(m: &Matrix4, order: Order, epsilon: f32) -> Self {
        Self::extract(m, order, epsilon).0
    }

    /// Extract angles for `order` along with whether the matrix was in gimbal
    /// lock, in which case the angle about the first axis is 0.
    pub fn extract(m: &Matrix4, order: Order, epsilon: f32) -> (Self, bool) {
        let ([alpha, beta, gamma], locked) = order.extract(m, epsilon);
        (Self::new(alpha, beta, gamma, order), locked)
    }

    /// Extract angles for `order`, failing with [`Degeneracy::GimbalLock`]
    /// instead of picking a representative when the angles are not unique.
    pub fn try_from_rotation_matrix(
        m: &Matrix4,
        order: Order,
        epsilon: f32,
    ) -> Result<Self, Degeneracy> {
        match Self::extract(m, order, epsilon) {
            (_, true) => Err(Degeneracy::GimbalLock),
            (euler, false) => Ok(euler),
        }
    }

    pub fn from_quaternion(q: &Quaternion, order: Order) -> Self {
        Self::from_rotation_matrix(&q.to_rotation_matrix(), order)
    }

    pub fn from_angle_axis(
        angle_radians: f32,
        axis: &Vector4,
        order: Order,
    ) -> Result<Self, Degeneracy> {
        let q = Quaternion::from_angle_axis(angle_radians, axis)?;
        Ok(Self::from_quaternion(&q, order))
    }

    /// Unit quaternion of the same rotation, with a non-negative scalar part.
    pub fn to_quaternion(&self) -> Quaternion {
        let q = Quaternion::from_rotation_matrix(&self.rotation_matrix());
        if q.w < 0.0 {
            -q
        } else {
            q
        }
    }

    /// Angle of the equivalent single rotation, in `[0, π]`.
    pub fn to_rotation_angle(&self) -> f32 {
        self.to_quaternion().to_angle()
    }

    /// Axis of the equivalent single rotation.
    pub fn to_rotation_axis(&self) -> Result<Vector4, Degeneracy> {
        self.to_quaternion().to_axis()
    }
}

impl fmt::Display for Euler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Euler(")?;
        write_fields(
            f,
            &[("alpha", self.alpha), ("beta", self.beta), ("gamma", self.gamma)],
        )?;
        write!(f, " order: {})", self.order)
    }
}
