//! Support mapping based on an explicit vertex cloud.

use crate::math::{Point, Real, Vector};
use crate::query::QueryError;
use crate::shape::SupportMap;

/// A convex shape given by the vertices of its convex hull.
///
/// The vertices are not required to actually form a hull: interior points are
/// harmless, they simply never win a support query.
#[derive(PartialEq, Debug, Clone)]
pub struct ConvexPolyhedron {
    points: Vec<Point<Real>>,
}

impl ConvexPolyhedron {
    /// Creates a polyhedron from a vertex cloud.
    ///
    /// Returns `None` if `points` is empty.
    pub fn from_points(points: Vec<Point<Real>>) -> Option<ConvexPolyhedron> {
        if points.is_empty() {
            None
        } else {
            Some(ConvexPolyhedron { points })
        }
    }

    /// The vertices of this polyhedron.
    #[inline]
    pub fn points(&self) -> &[Point<Real>] {
        &self.points
    }
}

impl SupportMap for ConvexPolyhedron {
    fn support_point(&self, dir: &Vector<Real>) -> Result<Point<Real>, QueryError> {
        let mut best = &self.points[0];
        let mut best_dot = best.coords.dot(dir);

        for pt in &self.points[1..] {
            let dot = pt.coords.dot(dir);
            if dot > best_dot {
                best = pt;
                best_dot = dot;
            }
        }

        Ok(*best)
    }

    fn center(&self) -> Result<Point<Real>, QueryError> {
        let mut sum = Vector::zeros();
        for pt in &self.points {
            sum += pt.coords;
        }
        Ok(Point::from(sum / self.points.len() as Real))
    }
}
