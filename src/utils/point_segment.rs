use crate::math::{Point, Real, DEFAULT_EPSILON};

/// Projects the origin onto the segment `[a, b]`.
///
/// Returns the squared distance between the origin and the segment, the
/// witness point realizing it, and the barycentric coordinates of the witness
/// with respect to `a` and `b`.
#[inline]
pub fn project_origin_on_segment(
    a: &Point<Real>,
    b: &Point<Real>,
) -> (Real, Point<Real>, [Real; 2]) {
    project_point_on_segment(&Point::origin(), a, b)
}

/// Projects `pt` onto the segment `[a, b]`.
///
/// Degenerate (zero-length) segments project everything onto `a`.
pub fn project_point_on_segment(
    pt: &Point<Real>,
    a: &Point<Real>,
    b: &Point<Real>,
) -> (Real, Point<Real>, [Real; 2]) {
    let ab = b - a;
    let ap = pt - a;
    let len2 = ab.norm_squared();

    let t = if len2 <= DEFAULT_EPSILON {
        0.0
    } else {
        (ap.dot(&ab) / len2).clamp(0.0, 1.0)
    };

    let proj = a + ab * t;
    ((pt - proj).norm_squared(), proj, [1.0 - t, t])
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::{Point, Real};

    #[test]
    fn projection_inside_segment() {
        let a = Point::new(1.0, -1.0, 0.0);
        let b = Point::new(1.0, 1.0, 0.0);
        let (dist2, proj, bcoords) = project_origin_on_segment(&a, &b);
        assert_relative_eq!(dist2, 1.0);
        assert_relative_eq!(proj, Point::new(1.0, 0.0, 0.0));
        assert_relative_eq!(bcoords[0], 0.5);
        assert_relative_eq!(bcoords[1], 0.5);
    }

    #[test]
    fn projection_clamped_to_endpoint() {
        let a = Point::new(1.0, 1.0, 0.0);
        let b = Point::new(2.0, 1.0, 0.0);
        let (dist2, proj, bcoords) = project_origin_on_segment(&a, &b);
        assert_relative_eq!(dist2, 2.0);
        assert_relative_eq!(proj, a);
        assert_eq!(bcoords, [1.0, 0.0]);
    }

    #[test]
    fn zero_length_segment() {
        let a = Point::new(0.0, 2.0, 0.0);
        let (dist2, proj, _) = project_origin_on_segment(&a, &a);
        assert_relative_eq!(dist2, 4.0 as Real);
        assert_relative_eq!(proj, a);
    }
}
