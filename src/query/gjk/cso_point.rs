use crate::math::{Point, Real, UnitVector, Vector};
use crate::query::QueryError;
use crate::shape::SupportMap;
use std::ops::Sub;

/// A point of a Configuration-Space Obstacle.
///
/// A Configuration-Space Obstacle (CSO) is the result of the Minkowski
/// difference of two solids. A support point of the CSO is the difference of
/// two support points, one on each solid; both are retained so that witness
/// points on the original shapes can be reconstructed.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CSOPoint {
    /// The point on the CSO, equal to `self.orig1 - self.orig2`.
    pub point: Point<Real>,
    /// The original point on the first shape.
    pub orig1: Point<Real>,
    /// The original point on the second shape.
    pub orig2: Point<Real>,
}

impl CSOPoint {
    /// Initializes a CSO point with `orig1 - orig2`.
    #[inline]
    pub fn new(orig1: Point<Real>, orig2: Point<Real>) -> CSOPoint {
        let point = Point::from(orig1 - orig2);
        CSOPoint {
            point,
            orig1,
            orig2,
        }
    }

    /// Computes the support point of the CSO of `g1` and `g2` toward the
    /// direction `dir`.
    pub fn from_shapes<G1, G2>(g1: &G1, g2: &G2, dir: &Vector<Real>) -> Result<CSOPoint, QueryError>
    where
        G1: ?Sized + SupportMap,
        G2: ?Sized + SupportMap,
    {
        let sp1 = g1.support_point(dir)?;
        let sp2 = g2.support_point(&-*dir)?;
        Ok(CSOPoint::new(sp1, sp2))
    }

    /// Computes the support point of the CSO of `g1` and `g2` toward the
    /// unit direction `dir`.
    #[inline]
    pub fn from_shapes_toward<G1, G2>(
        g1: &G1,
        g2: &G2,
        dir: &UnitVector<Real>,
    ) -> Result<CSOPoint, QueryError>
    where
        G1: ?Sized + SupportMap,
        G2: ?Sized + SupportMap,
    {
        Self::from_shapes(g1, g2, dir.as_ref())
    }

    /// The CSO point built from the centers of the two shapes.
    #[inline]
    pub fn from_centers<G1, G2>(g1: &G1, g2: &G2) -> Result<CSOPoint, QueryError>
    where
        G1: ?Sized + SupportMap,
        G2: ?Sized + SupportMap,
    {
        Ok(CSOPoint::new(g1.center()?, g2.center()?))
    }
}

impl Sub<CSOPoint> for CSOPoint {
    type Output = Vector<Real>;

    #[inline]
    fn sub(self, rhs: CSOPoint) -> Vector<Real> {
        self.point - rhs.point
    }
}
