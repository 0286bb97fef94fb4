//! Collision queries between pairs of support-mapped convex shapes.

pub use self::epa::EPA;
pub use self::error::QueryError;
pub use self::gjk::{gjk_intersect, gjk_penetration, gjk_separate, GJKResult};
pub use self::mpr::{mpr_intersect, mpr_penetration};
pub use self::params::{FirstDirectionFn, QueryParams};

pub mod epa;
mod error;
pub mod gjk;
pub mod mpr;
mod params;

use crate::math::{Point, Real, UnitVector};

/// The result of a successful separation query between two disjoint shapes.
#[derive(Copy, Clone, Debug)]
pub struct Separation {
    /// The minimal distance between the two shapes.
    pub distance: Real,
    /// The unit direction from the first shape toward the second.
    pub direction: UnitVector<Real>,
    /// The point of the first shape closest to the second.
    pub point1: Point<Real>,
    /// The point of the second shape closest to the first.
    pub point2: Point<Real>,
}

/// The result of a successful penetration query between two overlapping
/// shapes.
#[derive(Copy, Clone, Debug)]
pub struct Penetration {
    /// The penetration depth: translating the second shape by
    /// `depth * direction` brings the two shapes into touching contact.
    pub depth: Real,
    /// The penetration direction, as a unit vector.
    pub direction: UnitVector<Real>,
    /// A witness contact point, halfway between the deepest points of the
    /// two shapes.
    pub position: Point<Real>,
}
