//! The Gilbert-Johnson-Keerthi algorithm and its supporting structures.

pub use self::cso_point::CSOPoint;
pub use self::gjk::{
    closest_points, eps_tol, gjk_intersect, gjk_penetration, gjk_separate, GJKResult,
};
pub use self::simplex::VoronoiSimplex;

mod cso_point;
mod gjk;
mod simplex;
