//! Support mapping based Cuboid shape.

use crate::math::{Point, Real, Vector};
use crate::query::QueryError;
use crate::shape::SupportMap;

/// An axis-aligned box, defined by its center and half-extents.
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct Cuboid {
    /// The center of the cuboid.
    pub center: Point<Real>,
    /// The half-extents of the cuboid: half its width along each axis.
    pub half_extents: Vector<Real>,
}

impl Cuboid {
    /// Creates a new box from its center and half-extents.
    #[inline]
    pub fn new(center: Point<Real>, half_extents: Vector<Real>) -> Cuboid {
        Cuboid {
            center,
            half_extents,
        }
    }
}

impl SupportMap for Cuboid {
    #[inline]
    fn support_point(&self, dir: &Vector<Real>) -> Result<Point<Real>, QueryError> {
        let he = self.half_extents;
        let res = Vector::new(
            he.x.copysign(dir.x),
            he.y.copysign(dir.y),
            he.z.copysign(dir.z),
        );
        Ok(self.center + res)
    }

    #[inline]
    fn center(&self) -> Result<Point<Real>, QueryError> {
        Ok(self.center)
    }
}
