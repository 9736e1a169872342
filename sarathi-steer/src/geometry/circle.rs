//! Turning circles for bounded-curvature, bounded-sharpness steering.
//!
//! A turning circle describes one maneuver of the vehicle: the circle the
//! vehicle settles on once curvature saturates, together with the direction
//! flags and the configuration at which the maneuver begins. Two parameter
//! sets exist per state space: clothoid-entry circles (curvature ramps in at
//! bounded sharpness) and instantaneous-turn circles (the mathematical limit
//! of unbounded sharpness used for Reeds-Shepp style sub-paths).

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::core::math::{
    angle_distance, fresnel, fresnel_d1, global_frame_change, point_distance, EPSILON,
};
use crate::core::types::Configuration;

/// Derived constants of a turning circle for a given (kappa, sigma).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleParam {
    /// Maximum curvature magnitude
    pub kappa: f64,
    /// Sharpness magnitude; infinite for instantaneous-turn circles
    pub sigma: f64,
    /// Distance from the circle center to a curvature-zero entry point
    pub radius: f64,
    /// Angle between the entry heading and the circle tangent
    pub mu: f64,
    pub sin_mu: f64,
    pub cos_mu: f64,
    /// Deflection of a full double clothoid (in + out), kappa^2 / sigma
    pub delta_min: f64,
}

impl CircleParam {
    /// Parameters of a clothoid-entry circle.
    ///
    /// Integrates one clothoid from zero to full curvature and takes its
    /// osculating circle: `radius` is the distance from that circle's center
    /// back to the clothoid start, `mu` the angular offset of the start
    /// heading from the tangent there.
    pub fn clothoid(kappa: f64, sigma: f64) -> Self {
        let length = kappa / sigma;
        let (cf, sf) = fresnel(length * (sigma / PI).sqrt());
        let scale = (PI / sigma).sqrt();
        let x1 = scale * cf;
        let y1 = scale * sf;
        let theta1 = 0.5 * kappa * kappa / sigma;

        let xc = x1 - theta1.sin() / kappa;
        let yc = y1 + theta1.cos() / kappa;
        let radius = (xc * xc + yc * yc).sqrt();
        let mu = xc.atan2(yc);

        Self {
            kappa,
            sigma,
            radius,
            mu,
            sin_mu: mu.sin(),
            cos_mu: mu.cos(),
            delta_min: kappa * kappa / sigma,
        }
    }

    /// Parameters of an instantaneous-turn circle (sharpness limit).
    pub fn instantaneous(kappa: f64) -> Self {
        Self {
            kappa,
            sigma: f64::INFINITY,
            radius: 1.0 / kappa,
            mu: 0.0,
            sin_mu: 0.0,
            cos_mu: 1.0,
            delta_min: 0.0,
        }
    }
}

/// One oriented turning maneuver: center, direction flags and the
/// configuration at which the vehicle enters the circle.
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    /// Configuration at which the maneuver begins
    pub start: Configuration,
    /// Turn direction; left turns carry positive curvature
    pub left: bool,
    /// Driving direction along the maneuver
    pub forward: bool,
    /// Marks circles used as intermediate pivots
    pub regular: bool,
    /// Signed curvature of the circle
    pub kappa: f64,
    /// Center x
    pub xc: f64,
    /// Center y
    pub yc: f64,
    pub param: CircleParam,
}

impl Circle {
    /// Build the circle entered at `start` with the given direction flags.
    pub fn new(start: Configuration, left: bool, forward: bool, regular: bool, param: CircleParam) -> Self {
        let dx = param.radius * param.sin_mu;
        let dy = param.radius * param.cos_mu;
        let (lx, ly) = match (left, forward) {
            (true, true) => (dx, dy),
            (true, false) => (-dx, dy),
            (false, true) => (dx, -dy),
            (false, false) => (-dx, -dy),
        };
        let (xc, yc) = global_frame_change(start.x, start.y, start.theta, lx, ly);
        Self {
            start,
            left,
            forward,
            regular,
            kappa: if left { param.kappa } else { -param.kappa },
            xc,
            yc,
            param,
        }
    }

    /// Distance between the centers of two circles.
    #[inline]
    pub fn center_distance(&self, other: &Circle) -> f64 {
        point_distance(self.xc, self.yc, other.xc, other.yc)
    }

    /// Angle swept from the start configuration to `q`, measured along the
    /// circle's driving rotation sense, in [0, 2π).
    pub fn deflection(&self, q: &Configuration) -> f64 {
        let d = q.theta - self.start.theta;
        if self.left == self.forward {
            crate::core::math::twopify(d)
        } else {
            crate::core::math::twopify(-d)
        }
    }

    /// Whether `q` lies on this circle, both in position and in heading.
    pub fn contains(&self, q: &Configuration) -> bool {
        if (point_distance(self.xc, self.yc, q.x, q.y) - self.param.radius).abs() > EPSILON {
            return false;
        }
        let phi = (q.y - self.yc).atan2(q.x - self.xc);
        let expected = match (self.left, self.forward) {
            (true, true) => phi + FRAC_PI_2 + self.param.mu,
            (true, false) => phi + FRAC_PI_2 - self.param.mu,
            (false, true) => phi - FRAC_PI_2 - self.param.mu,
            (false, false) => phi - FRAC_PI_2 + self.param.mu,
        };
        angle_distance(expected, q.theta) < EPSILON
    }

    /// Arc length of a pure circular turn ending at `q`.
    pub fn rs_turn_length(&self, q: &Configuration) -> f64 {
        (self.deflection(q) / self.kappa).abs()
    }

    /// Arc length of a clothoid-then-arc turn from the start configuration
    /// (zero curvature) to `q` (full curvature).
    ///
    /// The lead clothoid always sweeps half of `delta_min`; a smaller target
    /// deflection forces the arc the long way around the circle.
    pub fn hc_turn_length(&self, q: &Configuration) -> f64 {
        debug_assert!(self.param.sigma.is_finite());
        let delta = self.deflection(q);
        let half = 0.5 * self.param.delta_min;
        let arc = if delta < half { TAU + delta - half } else { delta - half };
        self.param.kappa / self.param.sigma + arc / self.param.kappa
    }

    /// Arc length of a clothoid-arc-clothoid turn between two zero-curvature
    /// configurations on the circle.
    ///
    /// Below `delta_min` the arc vanishes and the turn degenerates to a
    /// symmetric double clothoid of reduced sharpness; at zero deflection it
    /// degenerates further to a straight chord.
    pub fn cc_turn_length(&self, q: &Configuration) -> f64 {
        debug_assert!(self.param.sigma.is_finite());
        let delta = self.deflection(q);
        if delta < EPSILON {
            return 2.0 * self.param.radius * self.param.sin_mu;
        }
        if delta >= self.param.delta_min {
            return (delta - self.param.delta_min) / self.param.kappa
                + 2.0 * self.param.kappa / self.param.sigma;
        }
        2.0 * (delta / self.cc_elementary_sharpness(delta)).sqrt()
    }

    /// Sharpness of the reduced double clothoid covering a deflection below
    /// `delta_min`, from the chord equation
    /// `sqrt(pi / sigma') * D1(delta/2) = radius * sin(delta/2 + mu)`.
    pub(crate) fn cc_elementary_sharpness(&self, delta: f64) -> f64 {
        let chord_half = self.param.radius * (0.5 * delta + self.param.mu).sin();
        let d1 = fresnel_d1(0.5 * delta);
        PI * (d1 / chord_half) * (d1 / chord_half)
    }
}
