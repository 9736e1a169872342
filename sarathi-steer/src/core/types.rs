//! Public and internal value types describing vehicle states, motion
//! primitives and segment boundaries.

use serde::{Deserialize, Serialize};

use super::math::{angle_distance, point_distance, twopify, EPSILON};

/// Kinematic state of a car-like vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct State {
    /// Position in x
    pub x: f64,
    /// Position in y
    pub y: f64,
    /// Orientation
    pub theta: f64,
    /// Signed curvature at (x, y)
    pub kappa: f64,
    /// Driving direction in {-1, 0, 1}
    pub d: f64,
}

impl State {
    /// Create a new state.
    #[inline]
    pub fn new(x: f64, y: f64, theta: f64, kappa: f64, d: f64) -> Self {
        Self { x, y, theta, kappa, d }
    }
}

/// One motion primitive: a straight, a circular arc or a clothoid.
///
/// The sign of `delta_s` encodes the driving direction. `sigma == 0` gives a
/// straight (`kappa == 0`) or a circular arc; `sigma != 0` a clothoid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Control {
    /// Signed arc length of the segment
    pub delta_s: f64,
    /// Curvature at the beginning of the segment
    pub kappa: f64,
    /// Sharpness (curvature derivative w.r.t. arc length) of the segment
    pub sigma: f64,
}

impl Control {
    /// Curvature at the end of the segment.
    #[inline]
    pub fn end_kappa(&self) -> f64 {
        self.kappa + self.sigma * self.delta_s
    }
}

/// A pose with curvature, marking the boundary between two path segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Configuration {
    pub x: f64,
    pub y: f64,
    /// Orientation, normalized to [0, 2π)
    pub theta: f64,
    pub kappa: f64,
}

impl Configuration {
    /// Create a configuration; `theta` is wrapped into [0, 2π).
    #[inline]
    pub fn new(x: f64, y: f64, theta: f64, kappa: f64) -> Self {
        Self {
            x,
            y,
            theta: twopify(theta),
            kappa,
        }
    }

    /// Euclidean distance between two configurations.
    #[inline]
    pub fn distance(&self, other: &Configuration) -> f64 {
        point_distance(self.x, self.y, other.x, other.y)
    }

    /// Position, heading and curvature all equal within tolerance.
    pub fn approx_eq(&self, other: &Configuration) -> bool {
        self.distance(other) < EPSILON
            && angle_distance(self.theta, other.theta) < EPSILON
            && (self.kappa - other.kappa).abs() < EPSILON
    }
}

impl From<&State> for Configuration {
    fn from(state: &State) -> Self {
        Configuration::new(state.x, state.y, state.theta, state.kappa)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::TAU;

    #[test]
    fn test_configuration_wraps_theta() {
        let q = Configuration::new(0.0, 0.0, -1.0, 0.0);
        assert_relative_eq!(q.theta, TAU - 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_configuration_distance() {
        let a = Configuration::new(0.0, 0.0, 0.0, 0.0);
        let b = Configuration::new(3.0, 4.0, 1.0, 0.0);
        assert_relative_eq!(a.distance(&b), 5.0);
    }

    #[test]
    fn test_approx_eq_across_wrap() {
        let a = Configuration::new(1.0, 1.0, 1e-9, 0.0);
        let b = Configuration::new(1.0, 1.0, TAU - 1e-9, 0.0);
        assert!(a.approx_eq(&b));
    }

    #[test]
    fn test_control_end_kappa() {
        let c = Control {
            delta_s: 2.0,
            kappa: 0.0,
            sigma: 0.5,
        };
        assert_relative_eq!(c.end_kappa(), 1.0);
    }
}
