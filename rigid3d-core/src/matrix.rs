/// 4x4 homogeneous transformation matrices
use std::fmt;
use std::ops::{Add, Mul, Sub};

use crate::error::Degeneracy;
use crate::format::precision;
use crate::vector::{Vector3, Vector4};

/// A row-major 4x4 matrix.
///
/// Matrices act on column vectors: `M·v` is [`multiply_vector`](Self::multiply_vector)
/// and `A·B` applies `B` first. A pure rotation keeps the last row and the
/// last column equal to `(0, 0, 0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix4 {
    pub m11: f32,
    pub m12: f32,
    pub m13: f32,
    pub m14: f32,
    pub m21: f32,
    pub m22: f32,
    pub m23: f32,
    pub m24: f32,
    pub m31: f32,
    pub m32: f32,
    pub m33: f32,
    pub m34: f32,
    pub m41: f32,
    pub m42: f32,
    pub m43: f32,
    pub m44: f32,
}

/// 2x2 minors of the bottom two rows, shared by the determinant and the
/// adjugate.
struct BottomMinors {
    c0: f32,
    c1: f32,
    c2: f32,
    c3: f32,
    c4: f32,
    c5: f32,
}

impl Matrix4 {
    pub const IDENTITY: Self = Self::new(
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    );

    /// Build a matrix from its entries, given row by row.
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        m11: f32, m12: f32, m13: f32, m14: f32,
        m21: f32, m22: f32, m23: f32, m24: f32,
        m31: f32, m32: f32, m33: f32, m34: f32,
        m41: f32, m42: f32, m43: f32, m44: f32,
    ) -> Self {
        Self {
            m11, m12, m13, m14,
            m21, m22, m23, m24,
            m31, m32, m33, m34,
            m41, m42, m43, m44,
        }
    }

    pub const fn from_rows(rows: [[f32; 4]; 4]) -> Self {
        let [r1, r2, r3, r4] = rows;
        Self::new(
            r1[0], r1[1], r1[2], r1[3],
            r2[0], r2[1], r2[2], r2[3],
            r3[0], r3[1], r3[2], r3[3],
            r4[0], r4[1], r4[2], r4[3],
        )
    }

    /// Embed a 3x3 rotation block; the last row and column stay `(0, 0, 0, 1)`.
    pub const fn from_rotation_rows(rows: [[f32; 3]; 3]) -> Self {
        let [r1, r2, r3] = rows;
        Self::new(
            r1[0], r1[1], r1[2], 0.0,
            r2[0], r2[1], r2[2], 0.0,
            r3[0], r3[1], r3[2], 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        Self {
            m14: x,
            m24: y,
            m34: z,
            ..Self::IDENTITY
        }
    }

    pub fn scaling(sx: f32, sy: f32, sz: f32) -> Self {
        Self {
            m11: sx,
            m22: sy,
            m33: sz,
            ..Self::IDENTITY
        }
    }

    pub const fn rows(&self) -> [[f32; 4]; 4] {
        [
            [self.m11, self.m12, self.m13, self.m14],
            [self.m21, self.m22, self.m23, self.m24],
            [self.m31, self.m32, self.m33, self.m34],
            [self.m41, self.m42, self.m43, self.m44],
        ]
    }

    pub fn transpose(&self) -> Self {
        Self::new(
            self.m11, self.m21, self.m31, self.m41,
            self.m12, self.m22, self.m32, self.m42,
            self.m13, self.m23, self.m33, self.m43,
            self.m14, self.m24, self.m34, self.m44,
        )
    }

    fn bottom_minors(&self) -> BottomMinors {
        BottomMinors {
            c0: self.m31 * self.m42 - self.m41 * self.m32,
            c1: self.m31 * self.m43 - self.m41 * self.m33,
            c2: self.m31 * self.m44 - self.m41 * self.m34,
            c3: self.m32 * self.m43 - self.m42 * self.m33,
            c4: self.m32 * self.m44 - self.m42 * self.m34,
            c5: self.m33 * self.m44 - self.m43 * self.m34,
        }
    }

    /// Laplace expansion along the first row.
    pub fn determinant(&self) -> f32 {
        let BottomMinors { c0, c1, c2, c3, c4, c5 } = self.bottom_minors();

        self.m11 * (self.m22 * c5 - self.m23 * c4 + self.m24 * c3)
            - self.m12 * (self.m21 * c5 - self.m23 * c2 + self.m24 * c1)
            + self.m13 * (self.m21 * c4 - self.m22 * c2 + self.m24 * c0)
            - self.m14 * (self.m21 * c3 - self.m22 * c1 + self.m23 * c0)
    }

    /// Adjugate divided by the determinant.
    ///
    /// Fails with [`Degeneracy::SingularMatrix`] only when the determinant is
    /// exactly zero; nearly singular matrices are inverted as-is.
    pub fn inverse(&self) -> Result<Self, Degeneracy> {
        let determinant = self.determinant();
        if determinant == 0.0 {
            return Err(Degeneracy::SingularMatrix);
        }

        let BottomMinors { c0, c1, c2, c3, c4, c5 } = self.bottom_minors();
        let s0 = self.m11 * self.m22 - self.m21 * self.m12;
        let s1 = self.m11 * self.m23 - self.m21 * self.m13;
        let s2 = self.m11 * self.m24 - self.m21 * self.m14;
        let s3 = self.m12 * self.m23 - self.m22 * self.m13;
        let s4 = self.m12 * self.m24 - self.m22 * self.m14;
        let s5 = self.m13 * self.m24 - self.m23 * self.m14;

        let m = self;
        let adjugate = Self::new(
            m.m22 * c5 - m.m23 * c4 + m.m24 * c3,
            -m.m12 * c5 + m.m13 * c4 - m.m14 * c3,
            m.m42 * s5 - m.m43 * s4 + m.m44 * s3,
            -m.m32 * s5 + m.m33 * s4 - m.m34 * s3,
            -m.m21 * c5 + m.m23 * c2 - m.m24 * c1,
            m.m11 * c5 - m.m13 * c2 + m.m14 * c1,
            -m.m41 * s5 + m.m43 * s2 - m.m44 * s1,
            m.m31 * s5 - m.m33 * s2 + m.m34 * s1,
            m.m21 * c4 - m.m22 * c2 + m.m24 * c0,
            -m.m11 * c4 + m.m12 * c2 - m.m14 * c0,
            m.m41 * s4 - m.m42 * s2 + m.m44 * s0,
            -m.m31 * s4 + m.m32 * s2 - m.m34 * s0,
            -m.m21 * c3 + m.m22 * c1 - m.m23 * c0,
            m.m11 * c3 - m.m12 * c1 + m.m13 * c0,
            -m.m41 * s3 + m.m42 * s1 - m.m43 * s0,
            m.m31 * s3 - m.m32 * s1 + m.m33 * s0,
        );

        Ok(adjugate.scale(1.0 / determinant))
    }

    pub fn scale(&self, scale: f32) -> Self {
        self.map(|value| value * scale)
    }

    /// Component-wise sum. On an owned matrix `m.add(..)` resolves to
    /// [`Add::add`]; write `m + n` there, or call `Matrix4::add(&m, &n)`.
    pub fn add(&self, m: &Self) -> Self {
        self.zip(m, |a, b| a + b)
    }

    pub fn subtract(&self, m: &Self) -> Self {
        self.zip(m, |a, b| a - b)
    }

    /// Row-by-column product `self·m`.
    pub fn multiply_matrix(&self, m: &Self) -> Self {
        let a = self.rows();
        let b = m.rows();
        let mut out = [[0.0_f32; 4]; 4];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = a[i][0] * b[0][j] + a[i][1] * b[1][j] + a[i][2] * b[2][j] + a[i][3] * b[3][j];
            }
        }
        Self::from_rows(out)
    }

    /// Matrix times column vector (`M·v`).
    pub fn multiply_vector(&self, v: &Vector4) -> Vector4 {
        Vector4::new(
            self.m11 * v.x + self.m12 * v.y + self.m13 * v.z + self.m14 * v.w,
            self.m21 * v.x + self.m22 * v.y + self.m23 * v.z + self.m24 * v.w,
            self.m31 * v.x + self.m32 * v.y + self.m33 * v.z + self.m34 * v.w,
            self.m41 * v.x + self.m42 * v.y + self.m43 * v.z + self.m44 * v.w,
        )
    }

    /// Transform a point (`w = 1`), dropping the homogeneous coordinate.
    pub fn transform_point(&self, p: &Vector3) -> Vector3 {
        self.multiply_vector(&p.extend(1.0)).xyz()
    }

    /// `self` multiplied by itself `n` times.
    ///
    /// `n <= 0` is not an error: it logs a warning and returns the identity.
    pub fn pow(&self, n: i32) -> Self {
        if n <= 0 {
            tracing::warn!(n, "matrix power must be greater than 0, returning identity");
            return Self::IDENTITY;
        }

        let mut result = *self;
        for _ in 1..n {
            result = self.multiply_matrix(&result);
        }
        result
    }

    /// Component-wise comparison with an absolute tolerance.
    pub fn approx_eq(&self, m: &Self, epsilon: f32) -> bool {
        self.rows()
            .iter()
            .flatten()
            .zip(m.rows().iter().flatten())
            .all(|(a, b)| (a - b).abs() <= epsilon)
    }

    fn map(&self, f: impl Fn(f32) -> f32) -> Self {
        Self::from_rows(self.rows().map(|row| row.map(&f)))
    }

    fn zip(&self, m: &Self, f: impl Fn(f32, f32) -> f32) -> Self {
        let a = self.rows();
        let b = m.rows();
        let mut out = [[0.0_f32; 4]; 4];
        for i in 0..4 {
            for j in 0..4 {
                out[i][j] = f(a[i][j], b[i][j]);
            }
        }
        Self::from_rows(out)
    }
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Matrix4 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.multiply_matrix(&rhs)
    }
}

impl Mul<Vector4> for Matrix4 {
    type Output = Vector4;

    fn mul(self, rhs: Vector4) -> Vector4 {
        self.multiply_vector(&rhs)
    }
}

impl Add for Matrix4 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Matrix4::add(&self, &rhs)
    }
}

impl Sub for Matrix4 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.subtract(&rhs)
    }
}

impl fmt::Display for Matrix4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = precision(f);
        for (i, row) in self.rows().iter().enumerate() {
            let prefix = if i == 0 { "Matrix4[[" } else { "        [" };
            let suffix = if i == 3 { "]]" } else { "]," };
            write!(f, "{prefix}")?;
            for (j, value) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{value:>w$.digits$}", w = digits + 4)?;
            }
            write!(f, "{suffix}")?;
            if i < 3 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Matrix4 {
        Matrix4::new(
            2.0, -1.0, 0.0, 3.0, //
            1.0, 3.0, 2.0, -2.0, //
            0.0, 1.0, 4.0, 1.0, //
            1.0, 0.0, -1.0, 2.0,
        )
    }

    #[test]
    fn test_default_is_identity() {
        let m = Matrix4::default();
        assert_eq!(m, Matrix4::IDENTITY);
        assert_eq!(m.determinant(), 1.0);
    }

    #[test]
    fn test_determinant() {
        let diagonal = Matrix4::scaling(2.0, 3.0, 4.0);
        assert_eq!(diagonal.determinant(), 24.0);

        // Swapping two rows flips the sign.
        let m = sample();
        let rows = m.rows();
        let swapped = Matrix4::from_rows([rows[1], rows[0], rows[2], rows[3]]);
        assert_eq!(swapped.determinant(), -m.determinant());
        assert_eq!(m.determinant(), 42.0);
    }

    #[test]
    fn test_inverse_times_matrix_is_identity() {
        let matrices = [
            sample(),
            Matrix4::translation(1.0, -2.0, 5.0),
            Matrix4::scaling(0.5, 2.0, -4.0) * Matrix4::translation(3.0, 0.0, 1.0),
            Matrix4::from_rotation_rows([[0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]]),
        ];

        for m in matrices {
            let inverse = m.inverse().unwrap();
            assert!(m.multiply_matrix(&inverse).approx_eq(&Matrix4::IDENTITY, 1e-5), "{m}");
            assert!(inverse.multiply_matrix(&m).approx_eq(&Matrix4::IDENTITY, 1e-5), "{m}");
        }
    }

    #[test]
    fn test_inverse_of_translation() {
        let inverse = Matrix4::translation(1.0, 2.0, 3.0).inverse().unwrap();
        assert_eq!(inverse, Matrix4::translation(-1.0, -2.0, -3.0));
    }

    #[test]
    fn test_singular_matrix_has_no_inverse() {
        let m = Matrix4::new(
            1.0, 2.0, 3.0, 4.0, //
            2.0, 4.0, 6.0, 8.0, //
            0.0, 1.0, 0.0, 1.0, //
            5.0, 0.0, 1.0, 0.0,
        );
        assert_eq!(m.determinant(), 0.0);
        assert_eq!(m.inverse(), Err(Degeneracy::SingularMatrix));
        assert_eq!(Matrix4::scaling(1.0, 0.0, 1.0).inverse(), Err(Degeneracy::SingularMatrix));
    }

    #[test]
    fn test_multiplication_is_not_commutative() {
        let t = Matrix4::translation(1.0, 0.0, 0.0);
        let s = Matrix4::scaling(2.0, 2.0, 2.0);
        let p = Vector3::new(1.0, 1.0, 1.0);

        assert_eq!((t * s).transform_point(&p), Vector3::new(3.0, 2.0, 2.0));
        assert_eq!((s * t).transform_point(&p), Vector3::new(4.0, 2.0, 2.0));
        assert_ne!(t * s, s * t);
    }

    #[test]
    fn test_multiply_vector() {
        let v = Vector4::new(1.0, 2.0, 3.0, 1.0);
        assert_eq!(sample() * v, Vector4::new(3.0, 11.0, 15.0, 0.0));
    }

    #[test]
    fn test_pow() {
        let quarter_turn =
            Matrix4::from_rotation_rows([[0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]]);
        assert_eq!(quarter_turn.pow(1), quarter_turn);
        assert_eq!(quarter_turn.pow(4), Matrix4::IDENTITY);
        assert_eq!(
            Matrix4::translation(1.0, 0.0, 0.0).pow(3),
            Matrix4::translation(3.0, 0.0, 0.0)
        );
    }

    #[test]
    fn test_pow_of_non_positive_degree_is_identity() {
        assert_eq!(sample().pow(0), Matrix4::IDENTITY);
        assert_eq!(sample().pow(-2), Matrix4::IDENTITY);
    }

    #[test]
    fn test_componentwise_operations() {
        let m = sample();
        assert_eq!(m.transpose().transpose(), m);
        assert_eq!(m.transpose().m12, m.m21);
        assert_eq!(m + m, m.scale(2.0));
        assert_eq!(m - m, Matrix4::IDENTITY.scale(0.0));
        let shifted = Matrix4::add(&m, &Matrix4::IDENTITY);
        assert_eq!(shifted.m11, m.m11 + 1.0);
        assert_eq!(shifted.m12, m.m12);
        assert_eq!(shifted.subtract(&Matrix4::IDENTITY), m);
        assert_eq!(shifted, m + Matrix4::IDENTITY);
    }

    #[test]
    fn test_display_uses_precision() {
        let text = format!("{:.1}", Matrix4::IDENTITY);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Matrix4[[  1.0,   0.0,   0.0,   0.0],");
        assert!(lines[3].ends_with("1.0]]"));
    }
}
