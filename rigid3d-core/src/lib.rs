/// Rigid3D Core Library - rotation representations and the vector/matrix
/// arithmetic behind them
///
/// Converts between Euler angles (six axis orders), 4x4 rotation matrices,
/// unit quaternions and angle-axis. Everything is a pure function over small
/// `Copy` values; single precision throughout.

pub mod error;
pub mod euler;
pub mod format;
pub mod interop;
pub mod interpolation;
pub mod matrix;
pub mod quaternion;
pub mod vector;

// Re-export commonly used types
pub use error::{Degeneracy, Error, Result};
pub use euler::{Axis, Euler, Order, GIMBAL_EPSILON};
pub use matrix::Matrix4;
pub use quaternion::Quaternion;
pub use vector::{Vector3, Vector4};
