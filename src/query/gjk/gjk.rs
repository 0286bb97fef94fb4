//! The Gilbert-Johnson-Keerthi distance algorithm.

use crate::math::{Point, Real, UnitVector, DEFAULT_EPSILON};
use crate::query::epa::EPA;
use crate::query::gjk::{CSOPoint, VoronoiSimplex};
use crate::query::{Penetration, QueryError, QueryParams, Separation};
use crate::shape::SupportMap;

/// Results of the GJK algorithm.
#[derive(Clone, Debug, PartialEq)]
pub enum GJKResult {
    /// The shapes overlap: the origin lies inside their Minkowski difference.
    ///
    /// GJK alone cannot quantify the overlap; the penetration queries hand
    /// the terminal simplex over to EPA for that.
    Intersection,
    /// The shapes are disjoint: the closest point on each shape, and the unit
    /// direction from the first shape toward the second.
    ClosestPoints(Point<Real>, Point<Real>, UnitVector<Real>),
}

/// The absolute tolerance used by GJK to detect degenerate (near zero-length)
/// search directions.
pub fn eps_tol() -> Real {
    DEFAULT_EPSILON * 10.0
}

/// Projects the origin onto the Minkowski difference of `g1` and `g2`.
///
/// This is the core loop shared by all the GJK-based queries. On return the
/// simplex holds the feature supporting the final answer; penetration
/// queries feed it to [`EPA`].
pub fn closest_points<G1, G2>(
    g1: &G1,
    g2: &G2,
    params: &QueryParams,
    simplex: &mut VoronoiSimplex,
) -> Result<GJKResult, QueryError>
where
    G1: SupportMap,
    G2: SupportMap,
{
    let first_dir = params.initial_direction(g1, g2)?;
    simplex.reset(CSOPoint::from_shapes(g1, g2, &first_dir)?);

    let mut max_bound = Real::MAX;
    let mut prev: Option<(Point<Real>, Point<Real>, UnitVector<Real>)> = None;
    let mut niter = 0;

    loop {
        let proj = simplex.project_origin_and_reduce();

        let Some((dir, dist)) = UnitVector::try_new_and_get(-proj.coords, eps_tol()) else {
            // The origin is on (or numerically embedded in) the simplex.
            return Ok(GJKResult::Intersection);
        };

        if dist >= max_bound {
            // The upper bound stopped improving; the previous iteration
            // already had the best answer numerically achievable.
            let (p1, p2, dir) = prev.unwrap_or_else(|| {
                let (p1, p2) = simplex.closest_points();
                (p1, p2, dir)
            });
            return Ok(GJKResult::ClosestPoints(p1, p2, dir));
        }

        max_bound = dist;
        let (p1, p2) = simplex.closest_points();
        prev = Some((p1, p2, dir));

        let support = CSOPoint::from_shapes_toward(g1, g2, &dir)?;
        let min_bound = -dir.dot(&support.point.coords);

        if max_bound - min_bound <= params.dist_tolerance {
            // Converged: the distance bracket is tighter than the tolerance.
            return Ok(GJKResult::ClosestPoints(p1, p2, dir));
        }

        if !simplex.add_point(support) {
            // The support point is already a simplex vertex: no progress is
            // possible anymore.
            return Ok(GJKResult::ClosestPoints(p1, p2, dir));
        }

        niter += 1;
        if niter >= params.max_iterations {
            return Ok(GJKResult::ClosestPoints(p1, p2, dir));
        }
    }
}

/// Tests whether `g1` and `g2` intersect.
pub fn gjk_intersect<G1, G2>(g1: &G1, g2: &G2, params: &QueryParams) -> Result<bool, QueryError>
where
    G1: SupportMap,
    G2: SupportMap,
{
    params.validate()?;
    let mut simplex = VoronoiSimplex::new();
    Ok(matches!(
        closest_points(g1, g2, params, &mut simplex)?,
        GJKResult::Intersection
    ))
}

/// Computes the minimal distance between two disjoint shapes, with a witness
/// point on each of them.
///
/// Returns `Ok(None)` when the shapes intersect: for this query,
/// intersection is a valid non-result rather than an error.
pub fn gjk_separate<G1, G2>(
    g1: &G1,
    g2: &G2,
    params: &QueryParams,
) -> Result<Option<Separation>, QueryError>
where
    G1: SupportMap,
    G2: SupportMap,
{
    params.validate()?;
    let mut simplex = VoronoiSimplex::new();

    match closest_points(g1, g2, params, &mut simplex)? {
        GJKResult::Intersection => Ok(None),
        GJKResult::ClosestPoints(point1, point2, direction) => Ok(Some(Separation {
            distance: (point2 - point1).norm(),
            direction,
            point1,
            point2,
        })),
    }
}

/// Computes the penetration depth, direction and contact position of two
/// intersecting shapes, by running GJK followed by EPA.
///
/// Returns `Ok(None)` when the shapes are disjoint.
pub fn gjk_penetration<G1, G2>(
    g1: &G1,
    g2: &G2,
    params: &QueryParams,
) -> Result<Option<Penetration>, QueryError>
where
    G1: SupportMap,
    G2: SupportMap,
{
    params.validate()?;
    let mut simplex = VoronoiSimplex::new();

    match closest_points(g1, g2, params, &mut simplex)? {
        GJKResult::ClosestPoints(..) => Ok(None),
        GJKResult::Intersection => {
            let mut epa = EPA::new();
            epa.penetration(g1, g2, params, &simplex).map(Some)
        }
    }
}
