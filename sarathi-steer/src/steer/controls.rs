//! Control emission and forward integration.
//!
//! Every selected path maps to a fixed schedule of motion primitives. A
//! segment is emitted either in entry order (traversed from the circle's
//! start configuration to the target) or in exit order (traversed from the
//! target back to the circle's start); the end-side circles of a path
//! describe the time-reversed maneuver, so exit order flips the driving
//! direction.

use std::f64::consts::{PI, TAU};

use crate::core::math::{fresnel, twopify, EPSILON};
use crate::core::types::{Configuration, Control, State};
use crate::geometry::circle::Circle;

use super::family::{Decomposition, Path};

/// Traversal order of a turn segment relative to its circle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Order {
    /// From the circle's start configuration towards the target
    Entry,
    /// From the target towards the circle's start configuration
    Exit,
}

fn direction(c: &Circle, order: Order) -> f64 {
    match (order, c.forward) {
        (Order::Entry, true) | (Order::Exit, false) => 1.0,
        (Order::Entry, false) | (Order::Exit, true) => -1.0,
    }
}

/// Emit the ordered control list reproducing `path`.
pub(crate) fn controls_for_path(path: &Path) -> Vec<Control> {
    let mut controls = Vec::with_capacity(9);
    let out = &mut controls;
    match &path.parts {
        Decomposition::Empty => {}
        Decomposition::T { cstart } => {
            rs_turn(cstart, &path.end, Order::Entry, out);
        }
        Decomposition::TT { cstart, cend, q1, q3 } => {
            hc_turn(cstart, q1, Order::Exit, out);
            hc_turn(cend, q3, Order::Entry, out);
        }
        Decomposition::TcT { cstart, cend, q1 } => {
            rs_turn(cstart, q1, Order::Entry, out);
            rs_turn(cend, q1, Order::Exit, out);
        }
        Decomposition::TcTcT { cstart, cend, ci, q1, q2 } => {
            rs_turn(cstart, q1, Order::Entry, out);
            rs_turn(ci, q2, Order::Entry, out);
            rs_turn(cend, q2, Order::Exit, out);
        }
        Decomposition::TcTT { cstart, cend, ci, q1, q2 } => {
            rs_turn(cstart, q1, Order::Entry, out);
            hc_turn(ci, q1, Order::Exit, out);
            hc_turn(cend, q2, Order::Entry, out);
        }
        Decomposition::TTcT { cstart, cend, ci, q1, q2 } => {
            hc_turn(cstart, q1, Order::Exit, out);
            hc_turn(ci, q2, Order::Entry, out);
            rs_turn(cend, q2, Order::Exit, out);
        }
        Decomposition::TST { cstart, cend, q1, q2, q3, q4 }
        | Decomposition::TcST { cstart, cend, q1, q2, q3, q4 }
        | Decomposition::TScT { cstart, cend, q1, q2, q3, q4 } => {
            hc_turn(cstart, q1, Order::Exit, out);
            straight(q2, q3, out);
            hc_turn(cend, q4, Order::Entry, out);
        }
        Decomposition::TSTcT { cstart, cend, ci, q1, q2, q3, q4 } => {
            hc_turn(cstart, q1, Order::Exit, out);
            straight(q2, q3, out);
            hc_turn(ci, q4, Order::Entry, out);
            rs_turn(cend, q4, Order::Exit, out);
        }
        Decomposition::TcTST { cstart, cend, ci, q1, q2, q3, q4 } => {
            rs_turn(cstart, q1, Order::Entry, out);
            hc_turn(ci, q1, Order::Exit, out);
            straight(q2, q3, out);
            hc_turn(cend, q4, Order::Entry, out);
        }
        Decomposition::TcTSTcT { cstart, cend, ci1, ci2, q1, q2, q3, q4 } => {
            rs_turn(cstart, q1, Order::Entry, out);
            hc_turn(ci1, q1, Order::Exit, out);
            straight(q2, q3, out);
            hc_turn(ci2, q4, Order::Entry, out);
            rs_turn(cend, q4, Order::Exit, out);
        }
        Decomposition::TTcTT { cstart, cend, ci1, ci2, q1, q2, q3 } => {
            hc_turn(cstart, q1, Order::Exit, out);
            hc_turn(ci1, q2, Order::Entry, out);
            hc_turn(ci2, q2, Order::Exit, out);
            hc_turn(cend, q3, Order::Entry, out);
        }
        Decomposition::TcTTcT { cstart, cend, ci1, ci2, q1, q2 } => {
            rs_turn(cstart, q1, Order::Entry, out);
            hc_turn(ci1, q1, Order::Exit, out);
            hc_turn(ci2, q2, Order::Entry, out);
            rs_turn(cend, q2, Order::Exit, out);
        }
        Decomposition::TTT { cstart, cend, ci, q1, q2, q3 } => {
            hc_turn(cstart, q1, Order::Exit, out);
            cc_turn(ci, q2, Order::Entry, out);
            hc_turn(cend, q3, Order::Entry, out);
        }
        Decomposition::TcScT { cstart, cend, q1, q2 } => {
            rs_turn(cstart, q1, Order::Entry, out);
            straight(q1, q2, out);
            rs_turn(cend, q2, Order::Exit, out);
        }
    }
    controls
}

/// One circular arc at full curvature.
fn rs_turn(c: &Circle, q: &Configuration, order: Order, out: &mut Vec<Control>) {
    let d = direction(c, order);
    out.push(Control {
        delta_s: d * c.rs_turn_length(q),
        kappa: c.kappa,
        sigma: 0.0,
    });
}

/// Clothoid-and-arc turn between the circle's zero-curvature start and a
/// full-curvature target.
fn hc_turn(c: &Circle, q: &Configuration, order: Order, out: &mut Vec<Control>) {
    let d = direction(c, order);
    let delta = c.deflection(q);
    let half = 0.5 * c.param.delta_min;
    let arc_deflection = if delta < half { TAU + delta - half } else { delta - half };
    let length_clothoid = c.param.kappa / c.param.sigma;
    let length_arc = arc_deflection / c.param.kappa;
    let sigma = d * c.kappa.signum() * c.param.sigma;

    match order {
        Order::Entry => {
            out.push(Control {
                delta_s: d * length_clothoid,
                kappa: 0.0,
                sigma,
            });
            out.push(Control {
                delta_s: d * length_arc,
                kappa: c.kappa,
                sigma: 0.0,
            });
        }
        Order::Exit => {
            out.push(Control {
                delta_s: d * length_arc,
                kappa: c.kappa,
                sigma: 0.0,
            });
            out.push(Control {
                delta_s: d * length_clothoid,
                kappa: c.kappa,
                sigma: -sigma,
            });
        }
    }
}

/// Clothoid-arc-clothoid turn between two zero-curvature configurations.
fn cc_turn(c: &Circle, q: &Configuration, order: Order, out: &mut Vec<Control>) {
    let d = direction(c, order);
    let delta = c.deflection(q);

    if delta < EPSILON {
        out.push(Control {
            delta_s: d * 2.0 * c.param.radius * c.param.sin_mu,
            kappa: 0.0,
            sigma: 0.0,
        });
        return;
    }

    if delta >= c.param.delta_min {
        let length_clothoid = c.param.kappa / c.param.sigma;
        let length_arc = (delta - c.param.delta_min) / c.param.kappa;
        let sigma = d * c.kappa.signum() * c.param.sigma;
        out.push(Control {
            delta_s: d * length_clothoid,
            kappa: 0.0,
            sigma,
        });
        out.push(Control {
            delta_s: d * length_arc,
            kappa: c.kappa,
            sigma: 0.0,
        });
        out.push(Control {
            delta_s: d * length_clothoid,
            kappa: c.kappa,
            sigma: -sigma,
        });
        return;
    }

    // reduced double clothoid, no arc
    let sharpness = c.cc_elementary_sharpness(delta);
    let length = (delta / sharpness).sqrt();
    let sigma = d * c.kappa.signum() * sharpness;
    let peak = c.kappa.signum() * sharpness * length;
    out.push(Control {
        delta_s: d * length,
        kappa: 0.0,
        sigma,
    });
    out.push(Control {
        delta_s: d * length,
        kappa: peak,
        sigma: -sigma,
    });
}

/// Straight segment between two aligned configurations; the sign of the
/// emitted arc length follows the heading of the first.
fn straight(qa: &Configuration, qb: &Configuration, out: &mut Vec<Control>) {
    let length = qa.distance(qb);
    let dot = qa.theta.cos() * (qb.x - qa.x) + qa.theta.sin() * (qb.y - qa.y);
    let d = if dot < 0.0 { -1.0 } else { 1.0 };
    out.push(Control {
        delta_s: d * length,
        kappa: 0.0,
        sigma: 0.0,
    });
}

/// Propagate a pose along one primitive by signed arc length `s`.
fn propagate(x: f64, y: f64, theta: f64, kappa: f64, sigma: f64, s: f64) -> (f64, f64, f64) {
    if sigma.abs() < 1e-12 {
        if kappa.abs() < 1e-12 {
            let (sin_t, cos_t) = theta.sin_cos();
            return (x + s * cos_t, y + s * sin_t, theta);
        }
        let theta1 = theta + kappa * s;
        return (
            x + (theta1.sin() - theta.sin()) / kappa,
            y - (theta1.cos() - theta.cos()) / kappa,
            theta1,
        );
    }

    // clothoid: complete the square in the heading polynomial and express
    // the displacement through Fresnel integrals
    let scale = (PI / sigma.abs()).sqrt();
    let flip = sigma.signum();
    let s_offset = kappa / sigma;
    let to_t = (sigma.abs() / PI).sqrt();
    let (c1, s1) = fresnel(s_offset * to_t);
    let (c2, s2) = fresnel((s + s_offset) * to_t);
    let dx = scale * (c2 - c1);
    let dy = flip * scale * (s2 - s1);
    let theta_c = theta - 0.5 * kappa * kappa / sigma;
    let (sin_c, cos_c) = theta_c.sin_cos();
    (
        x + dx * cos_c - dy * sin_c,
        y + dx * sin_c + dy * cos_c,
        theta + kappa * s + 0.5 * sigma * s * s,
    )
}

/// Forward-integrate a control list from `start`, sampling every `step`
/// meters of arc length. Samples carry the local curvature and the driving
/// direction of their segment; segment endpoints are sampled exactly.
pub(crate) fn integrate(start: &State, controls: &[Control], step: f64) -> Vec<State> {
    let mut states = Vec::new();
    states.push(State::new(
        start.x,
        start.y,
        twopify(start.theta),
        start.kappa,
        start.d,
    ));

    let (mut x, mut y, mut theta) = (start.x, start.y, start.theta);
    for control in controls {
        if control.delta_s.abs() < 1e-12 {
            continue;
        }
        let d = control.delta_s.signum();
        let n = (control.delta_s.abs() / step).ceil().max(1.0) as usize;
        for k in 1..=n {
            let s = control.delta_s * (k as f64) / (n as f64);
            let (xs, ys, ts) = propagate(x, y, theta, control.kappa, control.sigma, s);
            states.push(State::new(
                xs,
                ys,
                twopify(ts),
                control.kappa + control.sigma * s,
                d,
            ));
        }
        let (xe, ye, te) = propagate(x, y, theta, control.kappa, control.sigma, control.delta_s);
        x = xe;
        y = ye;
        theta = te;
    }
    states
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_propagate_straight() {
        let (x, y, t) = propagate(1.0, 1.0, FRAC_PI_2, 0.0, 0.0, 2.0);
        assert_relative_eq!(x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(y, 3.0, epsilon = 1e-12);
        assert_relative_eq!(t, FRAC_PI_2);
    }

    #[test]
    fn test_propagate_arc_half_circle() {
        let (x, y, t) = propagate(0.0, 0.0, 0.0, 1.0, 0.0, PI);
        assert_relative_eq!(x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(y, 2.0, epsilon = 1e-12);
        assert_relative_eq!(t, PI, epsilon = 1e-12);
    }

    #[test]
    fn test_propagate_clothoid_heading() {
        let (_, _, t) = propagate(0.0, 0.0, 0.0, 0.0, 1.0, 1.0);
        assert_relative_eq!(t, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_propagate_clothoid_matches_quadrature() {
        // compare the closed form against brute-force integration
        let (kappa0, sigma, s) = (0.3, -0.8, 1.7);
        let n = 200_000;
        let mut x = 0.0;
        let mut y = 0.0;
        let h = s / n as f64;
        for i in 0..n {
            let si = (i as f64 + 0.5) * h;
            let t = 0.2 + kappa0 * si + 0.5 * sigma * si * si;
            x += h * t.cos();
            y += h * t.sin();
        }
        let (cx, cy, _) = propagate(0.0, 0.0, 0.2, kappa0, sigma, s);
        assert_relative_eq!(cx, x, epsilon = 1e-7);
        assert_relative_eq!(cy, y, epsilon = 1e-7);
    }

    #[test]
    fn test_propagate_clothoid_reversal_symmetry() {
        // driving a clothoid forward then backward returns to the start
        let (x1, y1, t1) = propagate(0.0, 0.0, 0.0, 0.2, 0.5, 1.3);
        let k1 = 0.2 + 0.5 * 1.3;
        let (x0, y0, t0) = propagate(x1, y1, t1, k1, 0.5, -1.3);
        assert_relative_eq!(x0, 0.0, epsilon = 1e-10);
        assert_relative_eq!(y0, 0.0, epsilon = 1e-10);
        assert_relative_eq!(t0, 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_integrate_samples_endpoint_exactly() {
        let start = State::new(0.0, 0.0, 0.0, 0.0, 0.0);
        let controls = [Control {
            delta_s: 1.05,
            kappa: 0.0,
            sigma: 0.0,
        }];
        let states = integrate(&start, &controls, 0.1);
        let last = states.last().unwrap();
        assert_relative_eq!(last.x, 1.05, epsilon = 1e-12);
        assert_relative_eq!(last.d, 1.0);
        // 1 start sample + ceil(1.05/0.1) interior/end samples
        assert_eq!(states.len(), 12);
    }
}
