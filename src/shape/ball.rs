//! Support mapping based Ball shape.

use crate::math::{Point, Real, UnitVector, Vector, DEFAULT_EPSILON};
use crate::query::QueryError;
use crate::shape::SupportMap;

/// A ball shape, defined by its center and radius.
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct Ball {
    /// The center of the ball.
    pub center: Point<Real>,
    /// The radius of the ball.
    pub radius: Real,
}

impl Ball {
    /// Creates a new ball from its center and radius.
    #[inline]
    pub fn new(center: Point<Real>, radius: Real) -> Ball {
        Ball { center, radius }
    }
}

impl SupportMap for Ball {
    #[inline]
    fn support_point(&self, dir: &Vector<Real>) -> Result<Point<Real>, QueryError> {
        let dir = UnitVector::try_new(*dir, DEFAULT_EPSILON).unwrap_or_else(Vector::x_axis);
        Ok(self.center + *dir * self.radius)
    }

    #[inline]
    fn center(&self) -> Result<Point<Real>, QueryError> {
        Ok(self.center)
    }
}
