use approx::assert_relative_eq;
use mink3d::na::{Point3, Vector3};
use mink3d::query::{self, QueryParams};
use mink3d::shape::{Ball, Cuboid};

#[test]
fn disjoint_cuboids() {
    let a = Cuboid::new(Point3::origin(), Vector3::new(1.0, 1.0, 1.0));
    let b = Cuboid::new(Point3::new(2.5, 0.0, 0.0), Vector3::new(1.0, 1.0, 1.0));
    let params = QueryParams::default();

    assert!(!query::mpr_intersect(&a, &b, &params).unwrap());
    assert!(query::mpr_penetration(&a, &b, &params).unwrap().is_none());
}

#[test]
fn overlapping_cuboids_penetration() {
    let a = Cuboid::new(Point3::origin(), Vector3::new(1.0, 1.0, 1.0));
    let b = Cuboid::new(Point3::new(1.0, 0.0, 0.0), Vector3::new(1.0, 1.0, 1.0));
    let params = QueryParams::default();

    assert!(query::mpr_intersect(&a, &b, &params).unwrap());

    let pen = query::mpr_penetration(&a, &b, &params).unwrap().unwrap();
    assert_relative_eq!(pen.depth, 1.0, epsilon = 1.0e-3);
    assert!(pen.direction.dot(&Vector3::x()) > 0.999);
}

#[test]
fn overlapping_balls_penetration() {
    let a = Ball::new(Point3::origin(), 1.0);
    let b = Ball::new(Point3::new(1.5, 0.0, 0.0), 1.0);
    let params = QueryParams::default();

    let pen = query::mpr_penetration(&a, &b, &params).unwrap().unwrap();
    assert_relative_eq!(pen.depth, 0.5, epsilon = 1.0e-3);
    assert!(pen.direction.dot(&Vector3::x()) > 0.999);
    assert_relative_eq!(pen.position.y, 0.0, epsilon = 1.0e-3);
    assert_relative_eq!(pen.position.z, 0.0, epsilon = 1.0e-3);
}

#[test]
fn concentric_balls_intersect() {
    let a = Ball::new(Point3::new(-2.0, 0.5, 1.0), 1.0);
    let b = Ball::new(Point3::new(-2.0, 0.5, 1.0), 0.25);
    let params = QueryParams::default();

    assert!(query::mpr_intersect(&a, &b, &params).unwrap());

    let pen = query::mpr_penetration(&a, &b, &params).unwrap().unwrap();
    assert_relative_eq!(pen.depth, 1.25, epsilon = 1.0e-3);
}

#[test]
fn penetration_swaps_with_operands() {
    let a = Cuboid::new(Point3::origin(), Vector3::new(1.0, 1.0, 1.0));
    let b = Cuboid::new(Point3::new(0.5, 0.0, 0.0), Vector3::new(1.0, 1.0, 1.0));
    let params = QueryParams::default();

    let pen_ab = query::mpr_penetration(&a, &b, &params).unwrap().unwrap();
    let pen_ba = query::mpr_penetration(&b, &a, &params).unwrap().unwrap();

    assert_relative_eq!(pen_ab.depth, pen_ba.depth, epsilon = 1.0e-3);
    assert!(pen_ab.direction.dot(&pen_ba.direction) < -0.999);
}

#[test]
fn agrees_with_gjk_on_random_ball_pairs() {
    fn sample(rng: &mut oorandom::Rand64, scale: f64) -> f64 {
        (rng.rand_float() * 2.0 - 1.0) * scale
    }

    let mut rng = oorandom::Rand64::new(0x2b8c_6f7a_11d4_3e95);
    let params = QueryParams::default();

    let mut checked = 0;
    for _ in 0..2000 {
        if checked >= 300 {
            break;
        }

        let c1 = Point3::new(
            sample(&mut rng, 3.0),
            sample(&mut rng, 3.0),
            sample(&mut rng, 3.0),
        );
        let c2 = Point3::new(
            sample(&mut rng, 3.0),
            sample(&mut rng, 3.0),
            sample(&mut rng, 3.0),
        );
        let r1 = 0.5 + rng.rand_float() * 1.5;
        let r2 = 0.5 + rng.rand_float() * 1.5;

        let gap = (c2 - c1).norm() - (r1 + r2);
        if gap.abs() < 1.0e-3 {
            // Skip near-touching configurations: the two engines may
            // legitimately disagree within their tolerances there.
            continue;
        }

        let a = Ball::new(c1, r1);
        let b = Ball::new(c2, r2);
        let expected = gap < 0.0;

        assert_eq!(query::gjk_intersect(&a, &b, &params).unwrap(), expected);
        assert_eq!(query::mpr_intersect(&a, &b, &params).unwrap(), expected);

        if expected {
            let pen = query::mpr_penetration(&a, &b, &params).unwrap().unwrap();
            assert_relative_eq!(pen.depth, -gap, epsilon = 1.0e-2);
        } else {
            let sep = query::gjk_separate(&a, &b, &params).unwrap().unwrap();
            assert_relative_eq!(sep.distance, gap, epsilon = 1.0e-3);
            assert!(query::mpr_penetration(&a, &b, &params).unwrap().is_none());
        }

        checked += 1;
    }

    assert!(checked >= 300);
}
