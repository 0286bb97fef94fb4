//! Traits for support mapping based shapes.

use crate::math::{Point, Real, Vector};
use crate::query::QueryError;

/// Trait of convex shapes representable by a support mapping function.
///
/// A support function associates a direction to the point of the shape that
/// maximizes its dot product with that direction. The collision queries
/// access shapes exclusively through this trait; they never inspect a
/// concrete shape representation.
///
/// Implementations may wrap arbitrary user geometry code and are allowed to
/// fail: an error returned here aborts the in-progress query and is surfaced
/// unchanged to its caller.
pub trait SupportMap {
    /// Evaluates the support function of this shape.
    ///
    /// `dir` is not required to be normalized.
    fn support_point(&self, dir: &Vector<Real>) -> Result<Point<Real>, QueryError>;

    /// An interior point of this shape, used to seed search directions.
    fn center(&self) -> Result<Point<Real>, QueryError>;
}
