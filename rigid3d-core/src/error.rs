/// Error types shared by every representation in the kernel
use thiserror::Error;

/// Why a numeric operation has no meaningful result for its input.
///
/// Degeneracies are reported instead of silently substituting a zero value,
/// so callers that want the old fallback have to ask for it by name
/// (`normalize_or_zero` and friends).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Degeneracy {
    #[error("zero-length vector or quaternion")]
    ZeroLength,

    #[error("matrix is singular (determinant is exactly zero)")]
    SingularMatrix,

    #[error("gimbal lock: the first and third rotation axes are aligned")]
    GimbalLock,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(
        "Invalid rotation order: {0}. Valid options are: XYZ, XZY, YXZ, YZX, ZXY, ZYX or xyz, xzy, yxz, yzx, zxy, zyx."
    )]
    InvalidOrder(String),

    #[error("Interpolation step must be positive and finite, got {0}")]
    InvalidStep(f32),

    #[error("Interpolation range {from}..{to} is not finite or has too many samples")]
    InvalidRange { from: f32, to: f32 },

    #[error(transparent)]
    Degenerate(#[from] Degeneracy),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
