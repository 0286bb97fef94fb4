//! Aliases and helpers for the mathematical types used throughout this crate.

use crate::query::QueryError;

/// The scalar type used throughout this crate.
pub use f64 as Real;

/// The default tolerance used for geometric operations.
pub const DEFAULT_EPSILON: Real = Real::EPSILON;

/// The dimension of the space.
pub const DIM: usize = 3;

/// The point type.
pub use na::Point3 as Point;

/// The vector type.
pub use na::Vector3 as Vector;

/// The unit vector type.
pub use na::UnitVector3 as UnitVector;

/// The quaternion type.
pub use na::Quaternion;

/// The unit quaternion type, usable as a rotation.
pub use na::UnitQuaternion;

/// Normalizes `v`.
///
/// Errors with [`QueryError::DegenerateLength`] if the length of `v` is zero:
/// a zero-length vector has no direction.
#[inline]
pub fn try_normalize(v: &Vector<Real>) -> Result<UnitVector<Real>, QueryError> {
    UnitVector::try_new(*v, DEFAULT_EPSILON).ok_or(QueryError::DegenerateLength)
}

/// Normalizes the quaternion `q`.
///
/// Errors with [`QueryError::DegenerateLength`] if the magnitude of `q` is
/// zero.
#[inline]
pub fn try_normalize_quat(q: &Quaternion<Real>) -> Result<UnitQuaternion<Real>, QueryError> {
    UnitQuaternion::try_new(*q, DEFAULT_EPSILON).ok_or(QueryError::DegenerateLength)
}
