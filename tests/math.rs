use approx::assert_relative_eq;
use mink3d::math;
use mink3d::na::{Point3, Quaternion, UnitQuaternion, Vector3};
use mink3d::query::QueryError;
use mink3d::utils;

#[test]
fn normalize_vector() {
    let n = math::try_normalize(&Vector3::new(3.0, 4.0, 0.0)).unwrap();
    assert_relative_eq!(n.into_inner(), Vector3::new(0.6, 0.8, 0.0));
}

#[test]
fn normalize_zero_vector_fails() {
    assert!(matches!(
        math::try_normalize(&Vector3::zeros()),
        Err(QueryError::DegenerateLength)
    ));
}

#[test]
fn normalize_zero_quaternion_fails() {
    let q = Quaternion::new(0.0, 0.0, 0.0, 0.0);
    assert!(matches!(
        math::try_normalize_quat(&q),
        Err(QueryError::DegenerateLength)
    ));
}

#[test]
fn quaternion_rotation_round_trip() {
    fn sample(rng: &mut oorandom::Rand64) -> f64 {
        rng.rand_float() * 2.0 - 1.0
    }

    let mut rng = oorandom::Rand64::new(7);

    for _ in 0..100 {
        let q = Quaternion::new(
            sample(&mut rng),
            sample(&mut rng),
            sample(&mut rng),
            sample(&mut rng),
        );
        if q.norm() < 1.0e-3 {
            continue;
        }

        let q = math::try_normalize_quat(&q).unwrap();
        let v = Vector3::new(sample(&mut rng), sample(&mut rng), sample(&mut rng));

        let restored = q.inverse() * (q * v);
        assert_relative_eq!(restored, v, epsilon = 1.0e-9);
    }
}

#[test]
fn quaternion_axis_angle_rotation() {
    let q = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), std::f64::consts::FRAC_PI_2);
    assert_relative_eq!(q * Vector3::x(), Vector3::y(), epsilon = 1.0e-9);
}

#[test]
fn origin_segment_projection() {
    let a = Point3::new(2.0, -1.0, 0.0);
    let b = Point3::new(2.0, 3.0, 0.0);
    let (dist2, proj, bcoords) = utils::project_origin_on_segment(&a, &b);

    assert_relative_eq!(dist2, 4.0);
    assert_relative_eq!(proj, Point3::new(2.0, 0.0, 0.0));
    assert_relative_eq!(bcoords[0], 0.75);
    assert_relative_eq!(bcoords[1], 0.25);
}

#[test]
fn origin_triangle_projection_witness_is_barycentric() {
    let a = Point3::new(1.0, -1.0, -1.0);
    let b = Point3::new(1.0, -1.0, 1.0);
    let c = Point3::new(1.0, 1.0, 0.0);
    let (dist2, proj, bcoords) = utils::project_origin_on_triangle(&a, &b, &c);

    assert_relative_eq!(dist2, 1.0);
    assert_relative_eq!(proj, Point3::new(1.0, 0.0, 0.0));

    let reconstructed = a * bcoords[0] + b.coords * bcoords[1] + c.coords * bcoords[2];
    assert_relative_eq!(reconstructed, proj, epsilon = 1.0e-12);
}
