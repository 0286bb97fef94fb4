use crate::math::{Point, Real, DEFAULT_EPSILON};
use crate::utils::point_segment::project_point_on_segment;

/// Projects the origin onto the triangle `[a, b, c]`.
///
/// Returns the squared distance between the origin and the triangle, the
/// witness point realizing it, and the barycentric coordinates of the witness
/// with respect to `a`, `b` and `c`.
#[inline]
pub fn project_origin_on_triangle(
    a: &Point<Real>,
    b: &Point<Real>,
    c: &Point<Real>,
) -> (Real, Point<Real>, [Real; 3]) {
    project_point_on_triangle(&Point::origin(), a, b, c)
}

/// Projects `pt` onto the triangle `[a, b, c]`.
///
/// The projection proceeds by Voronoi-region classification: vertex regions
/// first, then edge regions, then the face interior. Barycentric coordinates
/// of boundary projections carry exact zeros for the vertices they do not
/// involve. Degenerate (flat) triangles fall back to the closest of the three
/// edges.
pub fn project_point_on_triangle(
    pt: &Point<Real>,
    a: &Point<Real>,
    b: &Point<Real>,
    c: &Point<Real>,
) -> (Real, Point<Real>, [Real; 3]) {
    let ab = b - a;
    let ac = c - a;
    let ap = pt - a;

    let d1 = ab.dot(&ap);
    let d2 = ac.dot(&ap);
    if d1 <= 0.0 && d2 <= 0.0 {
        return ((pt - a).norm_squared(), *a, [1.0, 0.0, 0.0]);
    }

    let bp = pt - b;
    let d3 = ab.dot(&bp);
    let d4 = ac.dot(&bp);
    if d3 >= 0.0 && d4 <= d3 {
        return ((pt - b).norm_squared(), *b, [0.0, 1.0, 0.0]);
    }

    let vc = d1 * d4 - d3 * d2;
    if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
        let denom = d1 - d3;
        if denom > DEFAULT_EPSILON {
            let v = d1 / denom;
            let proj = a + ab * v;
            return ((pt - proj).norm_squared(), proj, [1.0 - v, v, 0.0]);
        }
    }

    let cp = pt - c;
    let d5 = ab.dot(&cp);
    let d6 = ac.dot(&cp);
    if d6 >= 0.0 && d5 <= d6 {
        return ((pt - c).norm_squared(), *c, [0.0, 0.0, 1.0]);
    }

    let vb = d5 * d2 - d1 * d6;
    if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
        let denom = d2 - d6;
        if denom > DEFAULT_EPSILON {
            let w = d2 / denom;
            let proj = a + ac * w;
            return ((pt - proj).norm_squared(), proj, [1.0 - w, 0.0, w]);
        }
    }

    let va = d3 * d6 - d5 * d4;
    if va <= 0.0 && d4 - d3 >= 0.0 && d5 - d6 >= 0.0 {
        let denom = (d4 - d3) + (d5 - d6);
        if denom > DEFAULT_EPSILON {
            let w = (d4 - d3) / denom;
            let proj = b + (c - b) * w;
            return ((pt - proj).norm_squared(), proj, [0.0, 1.0 - w, w]);
        }
    }

    let denom = va + vb + vc;
    if denom.abs() > DEFAULT_EPSILON {
        let inv = 1.0 / denom;
        let v = vb * inv;
        let w = vc * inv;
        let proj = a + ab * v + ac * w;
        return ((pt - proj).norm_squared(), proj, [1.0 - v - w, v, w]);
    }

    // Flat triangle: none of the region tests concluded. Take the closest of
    // the three edges instead.
    let r_ab = project_point_on_segment(pt, a, b);
    let r_bc = project_point_on_segment(pt, b, c);
    let r_ca = project_point_on_segment(pt, c, a);

    let candidates = [
        (r_ab.0, r_ab.1, [r_ab.2[0], r_ab.2[1], 0.0]),
        (r_bc.0, r_bc.1, [0.0, r_bc.2[0], r_bc.2[1]]),
        (r_ca.0, r_ca.1, [r_ca.2[1], 0.0, r_ca.2[0]]),
    ];

    let mut best = candidates[0];
    for candidate in candidates {
        if candidate.0 < best.0 {
            best = candidate;
        }
    }
    best
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::{Point, Real};

    #[test]
    fn projection_inside_face() {
        let a = Point::new(1.0, -1.0, -1.0);
        let b = Point::new(1.0, -1.0, 1.0);
        let c = Point::new(1.0, 1.0, 0.0);
        let (dist2, proj, bcoords) = project_origin_on_triangle(&a, &b, &c);
        assert_relative_eq!(dist2, 1.0);
        assert_relative_eq!(proj, Point::new(1.0, 0.0, 0.0));
        assert_relative_eq!(bcoords[0], 0.25);
        assert_relative_eq!(bcoords[1], 0.25);
        assert_relative_eq!(bcoords[2], 0.5);
    }

    #[test]
    fn projection_on_vertex() {
        let a = Point::new(1.0, 0.0, 0.0);
        let b = Point::new(2.0, 0.0, 0.0);
        let c = Point::new(1.0, 0.0, 1.0);
        let (dist2, proj, bcoords) = project_origin_on_triangle(&a, &b, &c);
        assert_relative_eq!(dist2, 1.0);
        assert_relative_eq!(proj, a);
        assert_eq!(bcoords, [1.0, 0.0, 0.0]);
    }

    #[test]
    fn colinear_triangle() {
        // All three vertices on the same line.
        let a = Point::new(1.0, -1.0, 0.0);
        let b = Point::new(1.0, 0.0, 0.0);
        let c = Point::new(1.0, 1.0, 0.0);
        let (dist2, proj, bcoords) = project_origin_on_triangle(&a, &b, &c);
        assert_relative_eq!(dist2, 1.0);
        assert_relative_eq!(proj, Point::new(1.0, 0.0, 0.0));
        let sum: Real = bcoords.iter().sum();
        assert_relative_eq!(sum, 1.0);
    }
}
