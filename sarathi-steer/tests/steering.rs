//! End-to-end steering scenarios and cross-cutting properties.

use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::{FRAC_PI_2, PI};

use sarathi_steer::core::math::angle_distance;
use sarathi_steer::{Family, HcReedsSheppSpace, State, VehicleConfig};

fn space() -> HcReedsSheppSpace {
    HcReedsSheppSpace::new(1.0, 1.0, 0.1).unwrap()
}

fn euclidean(a: &State, b: &State) -> f64 {
    ((a.x - b.x) * (a.x - b.x) + (a.y - b.y) * (a.y - b.y)).sqrt()
}

/// Integrated end sample must land on the goal pose.
fn assert_reaches(space: &HcReedsSheppSpace, s1: &State, s2: &State, tol: f64) {
    let samples = space.get_path(s1, s2);
    let last = samples.last().expect("path has samples");
    assert!(
        (last.x - s2.x).abs() < tol && (last.y - s2.y).abs() < tol,
        "end position ({}, {}) misses goal ({}, {})",
        last.x,
        last.y,
        s2.x,
        s2.y
    );
    assert!(
        angle_distance(last.theta, s2.theta) < tol,
        "end heading {} misses goal {}",
        last.theta,
        s2.theta
    );
}

#[test]
fn test_identity_has_zero_length_and_no_controls() {
    let space = space();
    let s = State::new(0.0, 0.0, 0.0, 0.0, 0.0);
    assert_eq!(space.get_distance(&s, &s), 0.0);
    assert!(space.get_controls(&s, &s).is_empty());
}

#[test]
fn test_forward_goal_on_start_circle() {
    // goal half a turn around the left starting circle: a single full-
    // curvature arc of length pi
    let space = space();
    let s1 = State::new(0.0, 0.0, 0.0, 0.0, 0.0);
    let s2 = State::new(0.0, 2.0, PI, 0.0, 0.0);
    let path = space.shortest_path(&s1, &s2).unwrap();
    assert_eq!(path.family(), Family::T);
    assert_relative_eq!(path.length, PI, epsilon = 1e-9);
    let controls = space.get_controls(&s1, &s2);
    assert_eq!(controls.len(), 1);
    assert_relative_eq!(controls[0].delta_s, PI, epsilon = 1e-9);
    assert_relative_eq!(controls[0].kappa, 1.0);
    assert_relative_eq!(controls[0].sigma, 0.0);
    assert_reaches(&space, &s1, &s2, 1e-5);
}

#[test]
fn test_straight_ahead_goal() {
    let space = space();
    let s1 = State::new(0.0, 0.0, 0.0, 0.0, 0.0);
    let s2 = State::new(5.0, 0.0, 0.0, 0.0, 0.0);
    let distance = space.get_distance(&s1, &s2);
    assert!(distance.is_finite());
    assert!(distance >= 5.0 - 1e-9);
    assert_reaches(&space, &s1, &s2, 1e-5);
}

#[test]
fn test_straight_behind_goal() {
    let space = space();
    let s1 = State::new(0.0, 0.0, 0.0, 0.0, 0.0);
    let s2 = State::new(-5.0, 0.0, 0.0, 0.0, 0.0);
    let distance = space.get_distance(&s1, &s2);
    assert!(distance.is_finite());
    assert!(distance >= 5.0 - 1e-9);
    assert_reaches(&space, &s1, &s2, 1e-5);
}

#[test]
fn test_diagonal_goal_is_curvature_continuous() {
    let space = space();
    let s1 = State::new(0.0, 0.0, 0.0, 0.0, 0.0);
    let s2 = State::new(3.0, 3.0, FRAC_PI_2, 0.0, 0.0);
    let controls = space.get_controls(&s1, &s2);
    assert!(!controls.is_empty());
    for pair in controls.windows(2) {
        if pair[0].delta_s.signum() == pair[1].delta_s.signum() {
            assert_relative_eq!(pair[0].end_kappa(), pair[1].kappa, epsilon = 1e-9);
        }
    }
    assert_reaches(&space, &s1, &s2, 1e-5);
}

#[test]
fn test_saturated_endpoint_curvature() {
    let space = space();
    let s1 = State::new(0.0, 0.0, 0.0, 1.0, 0.0);
    let s2 = State::new(4.0, 0.0, 0.0, -1.0, 0.0);
    let controls = space.get_controls(&s1, &s2);
    assert!(!controls.is_empty());
    // the curvature filter admits only left start and right end circles
    assert_relative_eq!(controls.first().unwrap().kappa, 1.0);
    assert_relative_eq!(controls.last().unwrap().end_kappa(), -1.0);
    assert_reaches(&space, &s1, &s2, 1e-5);
}

#[test]
fn test_length_equals_sum_of_control_lengths() {
    let space = space();
    let s1 = State::new(0.0, 0.0, 0.0, 0.0, 0.0);
    for s2 in [
        State::new(5.0, 0.0, 0.0, 0.0, 0.0),
        State::new(3.0, 3.0, FRAC_PI_2, 0.0, 0.0),
        State::new(-2.0, 1.0, PI, 0.0, 0.0),
        State::new(0.5, -0.5, 4.0, 0.0, 0.0),
    ] {
        let distance = space.get_distance(&s1, &s2);
        let total: f64 = space
            .get_controls(&s1, &s2)
            .iter()
            .map(|c| c.delta_s.abs())
            .sum();
        assert_relative_eq!(distance, total, epsilon = 1e-9);
    }
}

#[test]
fn test_determinism_byte_equal_controls() {
    let space = space();
    let s1 = State::new(0.2, -0.7, 1.9, 0.0, 0.0);
    let s2 = State::new(-3.0, 2.5, 5.1, 0.0, 0.0);
    let a = space.get_controls(&s1, &s2);
    let b = space.get_controls(&s1, &s2);
    assert_eq!(a, b);
}

#[test]
fn test_triangle_lower_bound_random_sweep() {
    let space = space();
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..60 {
        let s1 = State::new(
            rng.gen_range(-5.0..5.0),
            rng.gen_range(-5.0..5.0),
            rng.gen_range(0.0..2.0 * PI),
            0.0,
            0.0,
        );
        let s2 = State::new(
            rng.gen_range(-5.0..5.0),
            rng.gen_range(-5.0..5.0),
            rng.gen_range(0.0..2.0 * PI),
            0.0,
            0.0,
        );
        let distance = space.get_distance(&s1, &s2);
        assert!(distance.is_finite());
        assert!(
            distance >= euclidean(&s1, &s2) - 1e-9,
            "length {} below euclidean {}",
            distance,
            euclidean(&s1, &s2)
        );
    }
}

#[test]
fn test_end_pose_reproduction_random_sweep() {
    let space = space();
    let mut rng = StdRng::seed_from_u64(23);
    for _ in 0..60 {
        let kappas = [-1.0, 0.0, 1.0];
        let s1 = State::new(
            rng.gen_range(-4.0..4.0),
            rng.gen_range(-4.0..4.0),
            rng.gen_range(0.0..2.0 * PI),
            kappas[rng.gen_range(0..3)],
            0.0,
        );
        let s2 = State::new(
            rng.gen_range(-4.0..4.0),
            rng.gen_range(-4.0..4.0),
            rng.gen_range(0.0..2.0 * PI),
            kappas[rng.gen_range(0..3)],
            0.0,
        );
        assert_reaches(&space, &s1, &s2, 1e-5);
    }
}

#[test]
fn test_curvature_stays_bounded_random_sweep() {
    let space = space();
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..40 {
        let s1 = State::new(
            rng.gen_range(-4.0..4.0),
            rng.gen_range(-4.0..4.0),
            rng.gen_range(0.0..2.0 * PI),
            0.0,
            0.0,
        );
        let s2 = State::new(
            rng.gen_range(-4.0..4.0),
            rng.gen_range(-4.0..4.0),
            rng.gen_range(0.0..2.0 * PI),
            0.0,
            0.0,
        );
        for control in space.get_controls(&s1, &s2) {
            assert!(control.kappa.abs() <= 1.0 + 1e-9);
            assert!(control.end_kappa().abs() <= 1.0 + 1e-9);
        }
    }
}

#[test]
fn test_length_locally_continuous_in_goal() {
    let space = space();
    let s1 = State::new(0.0, 0.0, 0.0, 0.0, 0.0);
    let s2 = State::new(3.1, 1.7, 0.6, 0.0, 0.0);
    let s2_shifted = State::new(3.1 + 1e-7, 1.7, 0.6, 0.0, 0.0);
    let d1 = space.get_distance(&s1, &s2);
    let d2 = space.get_distance(&s1, &s2_shifted);
    assert!((d1 - d2).abs() < 1e-4);
}

#[test]
fn test_space_from_config() {
    let config = VehicleConfig::from_toml("kappa_max = 0.5\nsigma_max = 0.25\n").unwrap();
    let space = HcReedsSheppSpace::from_config(&config).unwrap();
    assert_eq!(space.kappa_max(), 0.5);
    assert_eq!(space.sigma_max(), 0.25);
    let s1 = State::new(0.0, 0.0, 0.0, 0.0, 0.0);
    let s2 = State::new(8.0, 3.0, 1.0, 0.0, 0.0);
    assert_reaches(&space, &s1, &s2, 1e-5);
}

#[test]
fn test_sampling_step_respected() {
    let space = space();
    let s1 = State::new(0.0, 0.0, 0.0, 0.0, 0.0);
    let s2 = State::new(3.0, 3.0, FRAC_PI_2, 0.0, 0.0);
    let samples = space.get_path(&s1, &s2);
    for pair in samples.windows(2) {
        let step = euclidean(&pair[0], &pair[1]);
        // chord between consecutive samples cannot exceed the arc step
        assert!(step <= 0.1 + 1e-9);
    }
}
