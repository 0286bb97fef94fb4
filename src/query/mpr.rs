//! The Minkowski Portal Refinement algorithm.
//!
//! MPR is an intersection and penetration algorithm independent of GJK and
//! EPA. It shoots a ray from an interior point of the Configuration-Space
//! Obstacle through the origin and maintains a triangular "portal" of
//! support points crossed by that ray, refining the portal until it can
//! decide whether the origin is inside the CSO.

use crate::math::{Point, Real, UnitVector, Vector, DEFAULT_EPSILON};
use crate::query::gjk::CSOPoint;
use crate::query::{Penetration, QueryError, QueryParams};
use crate::shape::SupportMap;
use crate::utils;
use na;

/// An interior point of the CSO and the three boundary support points of the
/// triangle currently crossed by the origin ray.
#[derive(Copy, Clone, Debug)]
struct Portal {
    v0: CSOPoint,
    v1: CSOPoint,
    v2: CSOPoint,
    v3: CSOPoint,
}

/// Outcome of the portal discovery phase.
enum Discovery {
    /// The origin lies outside the CSO: no intersection.
    Outside,
    /// Touching contact: the support toward the origin is the origin itself.
    /// The ray direction is kept for the penetration report.
    Touching(CSOPoint, UnitVector<Real>),
    /// The origin lies on the segment between the interior point and `v1`.
    Segment(CSOPoint),
    /// A full portal was found.
    Portal(Portal),
}

fn is_zero(x: Real) -> bool {
    x.abs() < DEFAULT_EPSILON
}

fn plane_dir(
    base: &CSOPoint,
    a: &CSOPoint,
    b: &CSOPoint,
) -> Result<UnitVector<Real>, QueryError> {
    let d1 = a.point - base.point;
    let d2 = b.point - base.point;
    UnitVector::try_new(d1.cross(&d2), DEFAULT_EPSILON).ok_or(QueryError::DegenerateFace)
}

/// The outward direction of the portal triangle.
fn portal_dir(portal: &Portal) -> Result<UnitVector<Real>, QueryError> {
    plane_dir(&portal.v1, &portal.v2, &portal.v3)
}

/// Does the portal plane lie on the far side of the origin along the ray?
fn portal_encapsules_origin(portal: &Portal, dir: &UnitVector<Real>) -> bool {
    let dot = dir.dot(&portal.v1.point.coords);
    dot > 0.0 || is_zero(dot)
}

/// Could a portal containing `v4` still end up on the far side of the
/// origin?
fn portal_can_encapsule_origin(v4: &CSOPoint, dir: &UnitVector<Real>) -> bool {
    let dot = dir.dot(&v4.point.coords);
    dot > 0.0 || is_zero(dot)
}

/// Is `v4` unable to advance the portal past the convergence tolerance?
fn portal_reach_tolerance(
    portal: &Portal,
    v4: &CSOPoint,
    dir: &UnitVector<Real>,
    params: &QueryParams,
) -> bool {
    let dv1 = dir.dot(&portal.v1.point.coords);
    let dv2 = dir.dot(&portal.v2.point.coords);
    let dv3 = dir.dot(&portal.v3.point.coords);
    let dv4 = dir.dot(&v4.point.coords);

    let dot = dv4 - dv1.max(dv2).max(dv3);
    dot < params.mpr_tolerance || relative_eq!(dot, params.mpr_tolerance)
}

/// Replaces one portal vertex by `v4`, keeping the origin ray inside the
/// solid angle spanned by the portal.
fn expand_portal(portal: &mut Portal, v4: CSOPoint) {
    let v4v0 = v4.point.coords.cross(&portal.v0.point.coords);

    if portal.v1.point.coords.dot(&v4v0) > 0.0 {
        if portal.v2.point.coords.dot(&v4v0) > 0.0 {
            portal.v1 = v4;
        } else {
            portal.v3 = v4;
        }
    } else if portal.v3.point.coords.dot(&v4v0) > 0.0 {
        portal.v2 = v4;
    } else {
        portal.v1 = v4;
    }
}

fn interior_point<G1, G2>(g1: &G1, g2: &G2) -> Result<CSOPoint, QueryError>
where
    G1: SupportMap,
    G2: SupportMap,
{
    let mut v0 = CSOPoint::from_centers(g1, g2)?;

    if v0.point.coords.norm_squared() <= DEFAULT_EPSILON {
        // The centers coincide; nudge the interior point off the origin so
        // that the origin ray is well defined.
        v0.point = Point::new(DEFAULT_EPSILON * 10.0, 0.0, 0.0);
    }

    Ok(v0)
}

fn discover_portal<G1, G2>(
    g1: &G1,
    g2: &G2,
    params: &QueryParams,
) -> Result<Discovery, QueryError>
where
    G1: SupportMap,
    G2: SupportMap,
{
    let v0 = interior_point(g1, g2)?;

    // Vertex 1: support toward the origin.
    let ray_dir = UnitVector::new_normalize(-v0.point.coords);
    let v1 = CSOPoint::from_shapes_toward(g1, g2, &ray_dir)?;

    let dot = ray_dir.dot(&v1.point.coords);
    if dot < 0.0 || is_zero(dot) {
        return Ok(Discovery::Outside);
    }

    // Vertex 2: support orthogonal to the plane spanned by v0 and v1.
    let dir = v0.point.coords.cross(&v1.point.coords);
    if is_zero(dir.norm()) {
        // v0 and v1 are colinear with the origin.
        return Ok(if is_zero(v1.point.coords.norm()) {
            Discovery::Touching(v1, ray_dir)
        } else {
            Discovery::Segment(v1)
        });
    }

    let dir = UnitVector::new_normalize(dir);
    let v2 = CSOPoint::from_shapes_toward(g1, g2, &dir)?;

    let dot = dir.dot(&v2.point.coords);
    if dot < 0.0 || is_zero(dot) {
        return Ok(Discovery::Outside);
    }

    // Vertex 3: perpendicular to the (v0, v1, v2) plane, on the origin side.
    let mut v1 = v1;
    let mut v2 = v2;
    let mut dir = plane_dir(&v0, &v1, &v2)?;

    if dir.dot(&v0.point.coords) > 0.0 {
        std::mem::swap(&mut v1, &mut v2);
        dir = -dir;
    }

    let mut niter = 0;
    loop {
        let v3 = CSOPoint::from_shapes_toward(g1, g2, &dir)?;

        let dot = dir.dot(&v3.point.coords);
        if dot < 0.0 || is_zero(dot) {
            return Ok(Discovery::Outside);
        }

        // The origin ray must stay inside both candidate faces (v0, v1, v3)
        // and (v0, v3, v2); replace the vertex that puts it outside.
        let va = v1.point.coords.cross(&v3.point.coords);
        if va.dot(&v0.point.coords) < 0.0 && !is_zero(va.dot(&v0.point.coords)) {
            v2 = v3;
        } else {
            let vb = v3.point.coords.cross(&v2.point.coords);
            if vb.dot(&v0.point.coords) < 0.0 && !is_zero(vb.dot(&v0.point.coords)) {
                v1 = v3;
            } else {
                return Ok(Discovery::Portal(Portal { v0, v1, v2, v3 }));
            }
        }

        dir = plane_dir(&v0, &v1, &v2)?;

        niter += 1;
        if niter >= params.max_iterations {
            return Ok(Discovery::Outside);
        }
    }
}

/// Refines the portal until it can decide whether the origin is inside the
/// CSO.
///
/// Returns `Ok(true)` on intersection. Running out of iterations reports a
/// non-intersection, not an error.
fn refine_portal<G1, G2>(
    g1: &G1,
    g2: &G2,
    params: &QueryParams,
    portal: &mut Portal,
) -> Result<bool, QueryError>
where
    G1: SupportMap,
    G2: SupportMap,
{
    for _ in 0..params.max_iterations {
        let dir = portal_dir(portal)?;

        if portal_encapsules_origin(portal, &dir) {
            return Ok(true);
        }

        let v4 = CSOPoint::from_shapes_toward(g1, g2, &dir)?;

        if !portal_can_encapsule_origin(&v4, &dir) || portal_reach_tolerance(portal, &v4, &dir, params)
        {
            return Ok(false);
        }

        expand_portal(portal, v4);
    }

    Ok(false)
}

/// Expands the portal up to the reach tolerance, then reads the penetration
/// information off the final portal triangle.
fn find_penetration<G1, G2>(
    g1: &G1,
    g2: &G2,
    params: &QueryParams,
    portal: &mut Portal,
) -> Result<Penetration, QueryError>
where
    G1: SupportMap,
    G2: SupportMap,
{
    let mut niter = 0;

    loop {
        let dir = portal_dir(portal)?;
        let v4 = CSOPoint::from_shapes_toward(g1, g2, &dir)?;

        if portal_reach_tolerance(portal, &v4, &dir, params) || niter >= params.max_iterations {
            let (dist2, witness, _) = utils::project_origin_on_triangle(
                &portal.v1.point,
                &portal.v2.point,
                &portal.v3.point,
            );
            let depth = dist2.sqrt();

            let direction = if is_zero(depth) {
                // Touching contact: the portal plane is the only meaningful
                // normal left.
                dir
            } else {
                UnitVector::new_normalize(witness.coords)
            };

            return Ok(Penetration {
                depth,
                direction,
                position: portal_position(portal, &dir),
            });
        }

        expand_portal(portal, v4);
        niter += 1;
    }
}

/// The witness position: a barycentric combination, with respect to the
/// origin, of the support point pairs that produced the portal.
fn portal_position(portal: &Portal, dir: &UnitVector<Real>) -> Point<Real> {
    let v0 = &portal.v0;
    let v1 = &portal.v1;
    let v2 = &portal.v2;
    let v3 = &portal.v3;

    let mut b = [
        v1.point.coords.cross(&v2.point.coords).dot(&v3.point.coords),
        v3.point.coords.cross(&v2.point.coords).dot(&v0.point.coords),
        v0.point.coords.cross(&v1.point.coords).dot(&v3.point.coords),
        v2.point.coords.cross(&v1.point.coords).dot(&v0.point.coords),
    ];
    let mut sum: Real = b.iter().sum();

    if sum < 0.0 || is_zero(sum) {
        // The origin lies on the portal plane; weigh the portal triangle
        // alone.
        b[0] = 0.0;
        b[1] = dir.dot(&v2.point.coords.cross(&v3.point.coords));
        b[2] = dir.dot(&v3.point.coords.cross(&v1.point.coords));
        b[3] = dir.dot(&v1.point.coords.cross(&v2.point.coords));
        sum = b[1] + b[2] + b[3];
    }

    let inv = 1.0 / sum;
    let mut pos = Vector::zeros();
    for (bi, v) in b.iter().zip([v0, v1, v2, v3]) {
        pos += (v.orig1.coords + v.orig2.coords) * *bi;
    }

    // Each term sums both witness points, hence the extra 1/2.
    Point::from(pos * inv * 0.5)
}

/// Tests whether `g1` and `g2` intersect, using Minkowski Portal Refinement.
pub fn mpr_intersect<G1, G2>(g1: &G1, g2: &G2, params: &QueryParams) -> Result<bool, QueryError>
where
    G1: SupportMap,
    G2: SupportMap,
{
    params.validate()?;

    match discover_portal(g1, g2, params)? {
        Discovery::Outside => Ok(false),
        Discovery::Touching(..) | Discovery::Segment(_) => Ok(true),
        Discovery::Portal(mut portal) => refine_portal(g1, g2, params, &mut portal),
    }
}

/// Computes the penetration depth, direction and contact position of two
/// intersecting shapes, using Minkowski Portal Refinement.
///
/// Returns `Ok(None)` when the shapes do not intersect. Translating the
/// second shape by `depth * direction` brings the shapes into touching
/// contact.
pub fn mpr_penetration<G1, G2>(
    g1: &G1,
    g2: &G2,
    params: &QueryParams,
) -> Result<Option<Penetration>, QueryError>
where
    G1: SupportMap,
    G2: SupportMap,
{
    params.validate()?;

    match discover_portal(g1, g2, params)? {
        Discovery::Outside => Ok(None),
        Discovery::Touching(v1, direction) => Ok(Some(Penetration {
            depth: 0.0,
            direction,
            position: na::center(&v1.orig1, &v1.orig2),
        })),
        Discovery::Segment(v1) => Ok(Some(Penetration {
            depth: v1.point.coords.norm(),
            direction: UnitVector::new_normalize(v1.point.coords),
            position: na::center(&v1.orig1, &v1.orig2),
        })),
        Discovery::Portal(mut portal) => {
            if refine_portal(g1, g2, params, &mut portal)? {
                find_penetration(g1, g2, params, &mut portal).map(Some)
            } else {
                Ok(None)
            }
        }
    }
}
