//! Closed-form tangency probes between turning circles.
//!
//! The family builders repeatedly need the join configuration between two
//! circles: the cusp of a reversing tangency, the curvature-zero point of a
//! smooth tangency, or the two feet of a common tangent line. These probes
//! work on bare circle placements so that builders can evaluate candidate
//! pivot circles before committing to a full construction.

use std::f64::consts::{FRAC_PI_2, PI};

use crate::core::math::{global_frame_change, point_distance};
use crate::core::types::Configuration;
use crate::geometry::circle::Circle;

/// Placement of a circle: center, direction flags and signed curvature.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CirclePose {
    pub xc: f64,
    pub yc: f64,
    pub left: bool,
    pub forward: bool,
    pub kappa: f64,
}

impl CirclePose {
    pub fn new(xc: f64, yc: f64, left: bool, forward: bool, kappa_mag: f64) -> Self {
        Self {
            xc,
            yc,
            left,
            forward,
            kappa: if left { kappa_mag } else { -kappa_mag },
        }
    }

    #[inline]
    pub fn distance(&self, other: &CirclePose) -> f64 {
        point_distance(self.xc, self.yc, other.xc, other.yc)
    }

    /// Angle of the center-to-center ray towards `other`.
    #[inline]
    pub fn heading_to(&self, other: &CirclePose) -> f64 {
        (other.yc - self.yc).atan2(other.xc - self.xc)
    }
}

impl From<&Circle> for CirclePose {
    fn from(c: &Circle) -> Self {
        Self {
            xc: c.xc,
            yc: c.yc,
            left: c.left,
            forward: c.forward,
            kappa: c.kappa,
        }
    }
}

/// Cusp configuration of a reversing tangency: the circles touch at the
/// midpoint between their centers and the vehicle reverses there at full
/// curvature.
pub(crate) fn cusp_join(c1: &CirclePose, c2: &CirclePose) -> Configuration {
    let angle = c1.heading_to(c2);
    let (x, y) = global_frame_change(c1.xc, c1.yc, angle, 0.5 * c1.distance(c2), 0.0);
    let theta = if c1.left { angle + FRAC_PI_2 } else { angle - FRAC_PI_2 };
    Configuration::new(x, y, theta, c1.kappa)
}

/// Curvature-zero configuration of a smooth tangency between two circles of
/// equal radius, at the midpoint between their centers. `mu` is the entry
/// offset of the circle family.
pub(crate) fn smooth_join(c1: &CirclePose, c2: &CirclePose, mu: f64) -> Configuration {
    let angle = c1.heading_to(c2);
    let theta = match (c1.left, c1.forward) {
        (true, true) => angle + FRAC_PI_2 - mu,
        (true, false) => angle + FRAC_PI_2 + mu,
        (false, true) => angle - FRAC_PI_2 + mu,
        (false, false) => angle - FRAC_PI_2 - mu,
    };
    Configuration::new(
        0.5 * (c1.xc + c2.xc),
        0.5 * (c1.yc + c2.yc),
        theta,
        0.0,
    )
}

/// Feet of the internal (crossing) common tangent of two circles, as the
/// curvature-zero configurations where the straight leaves `c1` and enters
/// `c2`.
pub(crate) fn internal_tangent_joins(
    c1: &CirclePose,
    c2: &CirclePose,
    radius: f64,
    mu: f64,
) -> (Configuration, Configuration) {
    let distance = c1.distance(c2);
    let angle = c1.heading_to(c2);
    let alpha = (2.0 * radius * mu.cos() / distance).asin().abs();
    let dx = (radius * mu.sin()).abs();
    let dy = (radius * mu.cos()).abs();

    let (theta, o1, o2, heading_shift) = match (c1.left, c1.forward) {
        (true, true) => (angle + alpha, (dx, -dy), (-dx, dy), 0.0),
        (true, false) => (angle - alpha, (dx, dy), (-dx, -dy), PI),
        (false, true) => (angle - alpha, (dx, dy), (-dx, -dy), 0.0),
        (false, false) => (angle + alpha, (dx, -dy), (-dx, dy), PI),
    };
    let (x1, y1) = global_frame_change(c1.xc, c1.yc, theta, o1.0, o1.1);
    let (x2, y2) = global_frame_change(c2.xc, c2.yc, theta, o2.0, o2.1);
    (
        Configuration::new(x1, y1, theta + heading_shift, 0.0),
        Configuration::new(x2, y2, theta + heading_shift, 0.0),
    )
}

/// Feet of the external (same-side) common tangent of two equal circles.
pub(crate) fn external_tangent_joins(
    c1: &CirclePose,
    c2: &CirclePose,
    radius: f64,
    mu: f64,
) -> (Configuration, Configuration) {
    let theta = c1.heading_to(c2);
    let dx = (radius * mu.sin()).abs();
    let dy = (radius * mu.cos()).abs();

    let (o1, o2, heading_shift) = match (c1.left, c1.forward) {
        (true, true) => ((dx, -dy), (-dx, -dy), 0.0),
        (true, false) => ((dx, dy), (-dx, dy), PI),
        (false, true) => ((dx, dy), (-dx, dy), 0.0),
        (false, false) => ((dx, -dy), (-dx, -dy), PI),
    };
    let (x1, y1) = global_frame_change(c1.xc, c1.yc, theta, o1.0, o1.1);
    let (x2, y2) = global_frame_change(c2.xc, c2.yc, theta, o2.0, o2.1);
    (
        Configuration::new(x1, y1, theta + heading_shift, 0.0),
        Configuration::new(x2, y2, theta + heading_shift, 0.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::EPSILON;
    use approx::assert_relative_eq;

    #[test]
    fn test_cusp_join_midpoint() {
        let a = CirclePose::new(0.0, 1.0, true, true, 1.0);
        let b = CirclePose::new(2.0, 1.0, false, true, 1.0);
        let q = cusp_join(&a, &b);
        assert_relative_eq!(q.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(q.y, 1.0, epsilon = 1e-12);
        assert_relative_eq!(q.theta, FRAC_PI_2, epsilon = 1e-12);
        assert_relative_eq!(q.kappa, 1.0);
    }

    #[test]
    fn test_internal_tangent_parallel_headings() {
        let radius = 1.2;
        let mu = 0.4;
        let a = CirclePose::new(0.0, 0.0, true, true, 1.0);
        let b = CirclePose::new(6.0, 0.0, false, false, 1.0);
        let (q1, q2) = internal_tangent_joins(&a, &b, radius, mu);
        // both feet share the tangent heading and lie on the tangent line
        assert!(crate::core::math::angle_distance(q1.theta, q2.theta) < EPSILON);
        let along = (q2.y - q1.y).atan2(q2.x - q1.x);
        assert!(crate::core::math::angle_distance(along, q1.theta) < EPSILON);
    }

    #[test]
    fn test_external_tangent_parallel_headings() {
        let radius = 1.2;
        let mu = 0.4;
        let a = CirclePose::new(0.0, 0.0, true, true, 1.0);
        let b = CirclePose::new(5.0, 0.0, true, false, 1.0);
        let (q1, q2) = external_tangent_joins(&a, &b, radius, mu);
        assert!(crate::core::math::angle_distance(q1.theta, q2.theta) < EPSILON);
        let along = (q2.y - q1.y).atan2(q2.x - q1.x);
        assert!(crate::core::math::angle_distance(along, q1.theta) < EPSILON);
    }
}
