//! Catalog of path families.
//!
//! A family is a template of turns (`T`), straights (`S`) and cusps (`c`)
//! connecting two endpoint circles. Every family comes as a feasibility
//! predicate over the circle pair and a closed-form construction that places
//! the intermediate tangent circles and join configurations and sums the
//! segment lengths. Families with a `±delta_y` ambiguity construct both
//! candidates and keep the shorter one.

use std::f64::consts::PI;

use crate::core::math::global_frame_change;
use crate::core::types::Configuration;
use crate::geometry::circle::Circle;

use super::tangents::{
    cusp_join, external_tangent_joins, internal_tangent_joins, smooth_join, CirclePose,
};
use super::SpaceParams;

/// Path family tags, in selection order. On equal lengths the earlier tag
/// wins, which makes selection deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Family {
    Empty,
    T,
    TT,
    TcT,
    TcTcT,
    TcTT,
    TTcT,
    TST,
    TSTcT,
    TcTST,
    TcTSTcT,
    TTcTT,
    TcTTcT,
    TTT,
    TcST,
    TScT,
    TcScT,
}

impl std::fmt::Display for Family {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Family::Empty => "Empty",
            Family::T => "T",
            Family::TT => "TT",
            Family::TcT => "TcT",
            Family::TcTcT => "TcTcT",
            Family::TcTT => "TcTT",
            Family::TTcT => "TTcT",
            Family::TST => "TST",
            Family::TSTcT => "TSTcT",
            Family::TcTST => "TcTST",
            Family::TcTSTcT => "TcTSTcT",
            Family::TTcTT => "TTcTT",
            Family::TcTTcT => "TcTTcT",
            Family::TTT => "TTT",
            Family::TcST => "TcST",
            Family::TScT => "TScT",
            Family::TcScT => "TcScT",
        };
        f.write_str(name)
    }
}

/// Owned geometric decomposition of a selected path. Each variant carries
/// exactly the circles and join configurations its control schedule needs.
#[derive(Debug, Clone)]
pub enum Decomposition {
    Empty,
    T {
        cstart: Circle,
    },
    TT {
        cstart: Circle,
        cend: Circle,
        q1: Configuration,
        q3: Configuration,
    },
    TcT {
        cstart: Circle,
        cend: Circle,
        q1: Configuration,
    },
    TcTcT {
        cstart: Circle,
        cend: Circle,
        ci: Circle,
        q1: Configuration,
        q2: Configuration,
    },
    TcTT {
        cstart: Circle,
        cend: Circle,
        ci: Circle,
        q1: Configuration,
        q2: Configuration,
    },
    TTcT {
        cstart: Circle,
        cend: Circle,
        ci: Circle,
        q1: Configuration,
        q2: Configuration,
    },
    TST {
        cstart: Circle,
        cend: Circle,
        q1: Configuration,
        q2: Configuration,
        q3: Configuration,
        q4: Configuration,
    },
    TSTcT {
        cstart: Circle,
        cend: Circle,
        ci: Circle,
        q1: Configuration,
        q2: Configuration,
        q3: Configuration,
        q4: Configuration,
    },
    TcTST {
        cstart: Circle,
        cend: Circle,
        ci: Circle,
        q1: Configuration,
        q2: Configuration,
        q3: Configuration,
        q4: Configuration,
    },
    TcTSTcT {
        cstart: Circle,
        cend: Circle,
        ci1: Circle,
        ci2: Circle,
        q1: Configuration,
        q2: Configuration,
        q3: Configuration,
        q4: Configuration,
    },
    TTcTT {
        cstart: Circle,
        cend: Circle,
        ci1: Circle,
        ci2: Circle,
        q1: Configuration,
        q2: Configuration,
        q3: Configuration,
    },
    TcTTcT {
        cstart: Circle,
        cend: Circle,
        ci1: Circle,
        ci2: Circle,
        q1: Configuration,
        q2: Configuration,
    },
    TTT {
        cstart: Circle,
        cend: Circle,
        ci: Circle,
        q1: Configuration,
        q2: Configuration,
        q3: Configuration,
    },
    TcST {
        cstart: Circle,
        cend: Circle,
        q1: Configuration,
        q2: Configuration,
        q3: Configuration,
        q4: Configuration,
    },
    TScT {
        cstart: Circle,
        cend: Circle,
        q1: Configuration,
        q2: Configuration,
        q3: Configuration,
        q4: Configuration,
    },
    TcScT {
        cstart: Circle,
        cend: Circle,
        q1: Configuration,
        q2: Configuration,
    },
}

impl Decomposition {
    pub fn family(&self) -> Family {
        match self {
            Decomposition::Empty => Family::Empty,
            Decomposition::T { .. } => Family::T,
            Decomposition::TT { .. } => Family::TT,
            Decomposition::TcT { .. } => Family::TcT,
            Decomposition::TcTcT { .. } => Family::TcTcT,
            Decomposition::TcTT { .. } => Family::TcTT,
            Decomposition::TTcT { .. } => Family::TTcT,
            Decomposition::TST { .. } => Family::TST,
            Decomposition::TSTcT { .. } => Family::TSTcT,
            Decomposition::TcTST { .. } => Family::TcTST,
            Decomposition::TcTSTcT { .. } => Family::TcTSTcT,
            Decomposition::TTcTT { .. } => Family::TTcTT,
            Decomposition::TcTTcT { .. } => Family::TcTTcT,
            Decomposition::TTT { .. } => Family::TTT,
            Decomposition::TcST { .. } => Family::TcST,
            Decomposition::TScT { .. } => Family::TScT,
            Decomposition::TcScT { .. } => Family::TcScT,
        }
    }
}

/// A fully selected path between two endpoint circles.
#[derive(Debug, Clone)]
pub struct Path {
    /// Start configuration (entry of the first circle)
    pub start: Configuration,
    /// Goal configuration (entry of the last circle)
    pub end: Configuration,
    /// Total arc length
    pub length: f64,
    pub parts: Decomposition,
}

impl Path {
    pub fn family(&self) -> Family {
        self.parts.family()
    }
}

/// Copy a circle's entry pose with the circle's own signed curvature. The
/// boundary segments enter and leave the endpoint circles at full curvature
/// regardless of the curvature stored on the raw endpoint state.
fn boundary_config(c: &Circle) -> Configuration {
    Configuration::new(c.start.x, c.start.y, c.start.theta, c.kappa)
}

/// Family predicates and constructions for one circle pair.
///
/// `d` and `alpha` are the center distance and center-ray angle of the pair,
/// computed once by the selector.
pub(crate) struct FamilyCatalog<'a> {
    p: &'a SpaceParams,
    d: f64,
    alpha: f64,
}

impl<'a> FamilyCatalog<'a> {
    pub fn new(p: &'a SpaceParams, c1: &Circle, c2: &Circle) -> Self {
        Self {
            p,
            d: c1.center_distance(c2),
            alpha: (c2.yc - c1.yc).atan2(c2.xc - c1.xc),
        }
    }

    fn epsilon(&self) -> f64 {
        crate::core::math::EPSILON
    }

    /// Radius of the reversing tangency between two full-curvature circles.
    fn rr(&self) -> f64 {
        2.0 / self.p.kappa
    }

    // ##### TT ###############################################################

    pub fn tt_exists(&self, c1: &Circle, c2: &Circle) -> bool {
        c1.left != c2.left
            && c1.forward != c2.forward
            && (self.d - 2.0 * self.p.radius).abs() < self.epsilon()
    }

    pub fn tt(&self, c1: &Circle, c2: &Circle) -> (f64, Decomposition) {
        let q2 = smooth_join(&c1.into(), &c2.into(), self.p.mu);
        let cstart = Circle::new(q2, c1.left, !c1.forward, self.p.hc_regular, self.p.hc);
        let cend = Circle::new(q2, c2.left, !c2.forward, self.p.hc_regular, self.p.hc);
        let q1 = boundary_config(c1);
        let q3 = boundary_config(c2);
        let length = cstart.hc_turn_length(&q1) + cend.hc_turn_length(&q3);
        (length, Decomposition::TT { cstart, cend, q1, q3 })
    }

    // ##### TcT ##############################################################

    pub fn tct_exists(&self, c1: &Circle, c2: &Circle) -> bool {
        c1.left != c2.left
            && c1.forward == c2.forward
            && (self.d - self.rr()).abs() < self.epsilon()
    }

    pub fn tct(&self, c1: &Circle, c2: &Circle) -> (f64, Decomposition) {
        let q1 = cusp_join(&c1.into(), &c2.into());
        let cstart = c1.clone();
        let cend = c2.clone();
        let length = cstart.rs_turn_length(&q1) + cend.rs_turn_length(&q1);
        (length, Decomposition::TcT { cstart, cend, q1 })
    }

    // ##### TcTcT ############################################################

    pub fn tctct_exists(&self, c1: &Circle, c2: &Circle) -> bool {
        c1.left == c2.left && c1.forward != c2.forward && self.d <= 2.0 * self.rr()
    }

    pub fn tctct(&self, c1: &Circle, c2: &Circle) -> (f64, Decomposition) {
        let r = self.rr();
        let dx = 0.5 * self.d;
        let dy = (r * r - dx * dx).abs().sqrt();
        let p1 = CirclePose::from(c1);
        let p2 = CirclePose::from(c2);
        let cstart = c1.clone();
        let cend = c2.clone();

        let mut best: Option<(f64, Decomposition)> = None;
        for side in [dy, -dy] {
            let (x, y) = global_frame_change(c1.xc, c1.yc, self.alpha, dx, side);
            let pivot = CirclePose::new(x, y, !c1.left, !c1.forward, self.p.kappa);
            let qa = cusp_join(&p1, &pivot);
            let qb = cusp_join(&pivot, &p2);
            let ci = Circle::new(qa, !c1.left, !c1.forward, true, self.p.rs);
            let length =
                cstart.rs_turn_length(&qa) + ci.rs_turn_length(&qb) + cend.rs_turn_length(&qb);
            if best.as_ref().map_or(true, |(l, _)| length < *l) {
                best = Some((
                    length,
                    Decomposition::TcTcT {
                        cstart: cstart.clone(),
                        cend: cend.clone(),
                        ci,
                        q1: qa,
                        q2: qb,
                    },
                ));
            }
        }
        best.expect("both pivot candidates evaluated")
    }

    // ##### TcTT / TTcT ######################################################

    pub fn tctt_exists(&self, c1: &Circle, c2: &Circle) -> bool {
        c1.left == c2.left
            && c1.forward == c2.forward
            && self.d <= 2.0 * self.p.radius + self.rr()
            && self.d >= 2.0 * self.p.radius - self.rr()
    }

    pub fn tctt(&self, c1: &Circle, c2: &Circle) -> (f64, Decomposition) {
        let r1 = self.rr();
        let r2 = 2.0 * self.p.radius;
        let dx = (r1 * r1 + self.d * self.d - r2 * r2) / (2.0 * self.d);
        let dy = (r1 * r1 - dx * dx).abs().sqrt();
        let p1 = CirclePose::from(c1);
        let p2 = CirclePose::from(c2);
        let cstart = c1.clone();
        let q2 = boundary_config(c2);

        let mut best: Option<(f64, Decomposition)> = None;
        for side in [dy, -dy] {
            let (x, y) = global_frame_change(c1.xc, c1.yc, self.alpha, dx, side);
            let pivot = CirclePose::new(x, y, !c1.left, !c1.forward, self.p.kappa);
            let qa = cusp_join(&p1, &pivot);
            let qb = smooth_join(&pivot, &p2, self.p.mu);
            let ci = Circle::new(qb, !c1.left, c1.forward, true, self.p.hc);
            let cend = Circle::new(qb, c2.left, !c2.forward, self.p.hc_regular, self.p.hc);
            let length =
                cstart.rs_turn_length(&qa) + ci.hc_turn_length(&qa) + cend.hc_turn_length(&q2);
            if best.as_ref().map_or(true, |(l, _)| length < *l) {
                best = Some((
                    length,
                    Decomposition::TcTT {
                        cstart: cstart.clone(),
                        cend,
                        ci,
                        q1: qa,
                        q2,
                    },
                ));
            }
        }
        best.expect("both pivot candidates evaluated")
    }

    pub fn ttct_exists(&self, c1: &Circle, c2: &Circle) -> bool {
        self.tctt_exists(c1, c2)
    }

    pub fn ttct(&self, c1: &Circle, c2: &Circle) -> (f64, Decomposition) {
        let r1 = 2.0 * self.p.radius;
        let r2 = self.rr();
        let dx = (r1 * r1 + self.d * self.d - r2 * r2) / (2.0 * self.d);
        let dy = (r1 * r1 - dx * dx).abs().sqrt();
        let p1 = CirclePose::from(c1);
        let p2 = CirclePose::from(c2);
        let cend = c2.clone();
        let q1 = boundary_config(c1);

        let mut best: Option<(f64, Decomposition)> = None;
        for side in [dy, -dy] {
            let (x, y) = global_frame_change(c1.xc, c1.yc, self.alpha, dx, side);
            let pivot = CirclePose::new(x, y, !c1.left, c1.forward, self.p.kappa);
            let qa = smooth_join(&p1, &pivot, self.p.mu);
            let qb = cusp_join(&pivot, &p2);
            let cstart = Circle::new(qa, c1.left, !c1.forward, self.p.hc_regular, self.p.hc);
            let ci = Circle::new(qa, !c1.left, c1.forward, true, self.p.hc);
            let length =
                cstart.hc_turn_length(&q1) + ci.hc_turn_length(&qb) + cend.rs_turn_length(&qb);
            if best.as_ref().map_or(true, |(l, _)| length < *l) {
                best = Some((
                    length,
                    Decomposition::TTcT {
                        cstart,
                        cend: cend.clone(),
                        ci,
                        q1,
                        q2: qb,
                    },
                ));
            }
        }
        best.expect("both pivot candidates evaluated")
    }

    // ##### TST ##############################################################

    fn tist_exists(&self, c1: &Circle, c2: &Circle) -> bool {
        c1.left != c2.left && c1.forward != c2.forward && self.d >= 2.0 * self.p.radius
    }

    fn test_exists(&self, c1: &Circle, c2: &Circle) -> bool {
        c1.left == c2.left
            && c1.forward != c2.forward
            && self.d >= 2.0 * self.p.radius * self.p.sin_mu
    }

    pub fn tst_exists(&self, c1: &Circle, c2: &Circle) -> bool {
        self.tist_exists(c1, c2) || self.test_exists(c1, c2)
    }

    pub fn tst(&self, c1: &Circle, c2: &Circle) -> (f64, Decomposition) {
        let (q2, q3) = if self.tist_exists(c1, c2) {
            internal_tangent_joins(&c1.into(), &c2.into(), self.p.radius, self.p.mu)
        } else {
            external_tangent_joins(&c1.into(), &c2.into(), self.p.radius, self.p.mu)
        };
        let cstart = Circle::new(q2, c1.left, !c1.forward, self.p.hc_regular, self.p.hc);
        let cend = Circle::new(q3, c2.left, !c2.forward, self.p.hc_regular, self.p.hc);
        let q1 = boundary_config(c1);
        let q4 = boundary_config(c2);
        let length = cstart.hc_turn_length(&q1) + q2.distance(&q3) + cend.hc_turn_length(&q4);
        (length, Decomposition::TST { cstart, cend, q1, q2, q3, q4 })
    }

    // ##### TSTcT ############################################################

    fn tistct_exists(&self, c1: &Circle, c2: &Circle) -> bool {
        let a = 2.0 * self.p.radius * self.p.sin_mu + self.rr();
        let b = 2.0 * self.p.radius * self.p.cos_mu;
        c1.left == c2.left && c1.forward == c2.forward && self.d >= (a * a + b * b).sqrt()
    }

    fn testct_exists(&self, c1: &Circle, c2: &Circle) -> bool {
        c1.left != c2.left
            && c1.forward == c2.forward
            && self.d >= 2.0 * (1.0 / self.p.kappa + self.p.radius * self.p.sin_mu)
    }

    pub fn tstct_exists(&self, c1: &Circle, c2: &Circle) -> bool {
        self.tistct_exists(c1, c2) || self.testct_exists(c1, c2)
    }

    pub fn tstct(&self, c1: &Circle, c2: &Circle) -> (f64, Decomposition) {
        let internal = self.tistct_exists(c1, c2);
        let (dx, dy) = if internal {
            let dy = 4.0 * self.p.radius * self.p.cos_mu / (self.p.kappa * self.d);
            (((self.rr() * self.rr()) - dy * dy).abs().sqrt(), dy)
        } else {
            (self.rr(), 0.0)
        };
        let (x, y) = global_frame_change(c2.xc, c2.yc, self.alpha, -dx, dy);
        let pivot = CirclePose::new(x, y, !c2.left, c2.forward, self.p.kappa);
        let p1 = CirclePose::from(c1);
        let p2 = CirclePose::from(c2);

        let (q2, q3) = if internal {
            internal_tangent_joins(&p1, &pivot, self.p.radius, self.p.mu)
        } else {
            external_tangent_joins(&p1, &pivot, self.p.radius, self.p.mu)
        };
        let q4 = cusp_join(&pivot, &p2);

        let cstart = Circle::new(q2, c1.left, !c1.forward, self.p.hc_regular, self.p.hc);
        let cend = c2.clone();
        let q1 = boundary_config(c1);
        let ci = Circle::new(q3, !c2.left, c2.forward, true, self.p.hc);
        let length = cstart.hc_turn_length(&q1)
            + q2.distance(&q3)
            + ci.hc_turn_length(&q4)
            + cend.rs_turn_length(&q4);
        (length, Decomposition::TSTcT { cstart, cend, ci, q1, q2, q3, q4 })
    }

    // ##### TcTST ############################################################

    pub fn tctst_exists(&self, c1: &Circle, c2: &Circle) -> bool {
        self.tistct_exists(c1, c2) || self.testct_exists(c1, c2)
    }

    pub fn tctst(&self, c1: &Circle, c2: &Circle) -> (f64, Decomposition) {
        let internal = self.tistct_exists(c1, c2);
        let (dx, dy, pivot_left) = if internal {
            let dy = 4.0 * self.p.radius * self.p.cos_mu / (self.p.kappa * self.d);
            (
                ((self.rr() * self.rr()) - dy * dy).abs().sqrt(),
                dy,
                !c2.left,
            )
        } else {
            (self.rr(), 0.0, c2.left)
        };
        let (x, y) = global_frame_change(c1.xc, c1.yc, self.alpha, dx, dy);
        let pivot = CirclePose::new(x, y, pivot_left, !c2.forward, self.p.kappa);
        let p1 = CirclePose::from(c1);
        let p2 = CirclePose::from(c2);

        let q1 = cusp_join(&p1, &pivot);
        let (q2, q3) = if internal {
            internal_tangent_joins(&pivot, &p2, self.p.radius, self.p.mu)
        } else {
            external_tangent_joins(&pivot, &p2, self.p.radius, self.p.mu)
        };

        let cstart = c1.clone();
        let cend = Circle::new(q3, c2.left, !c2.forward, self.p.hc_regular, self.p.hc);
        let q4 = boundary_config(c2);
        let ci = Circle::new(q2, !c1.left, c1.forward, true, self.p.hc);
        let length = cstart.rs_turn_length(&q1)
            + ci.hc_turn_length(&q1)
            + q2.distance(&q3)
            + cend.hc_turn_length(&q4);
        (length, Decomposition::TcTST { cstart, cend, ci, q1, q2, q3, q4 })
    }

    // ##### TcTSTcT ##########################################################

    fn tctistct_exists(&self, c1: &Circle, c2: &Circle) -> bool {
        let r = self.p.radius;
        let k = self.p.kappa;
        c1.left != c2.left
            && c1.forward != c2.forward
            && self.d >= (4.0 * r * r + 16.0 * r * self.p.sin_mu / k + 16.0 / (k * k)).sqrt()
    }

    fn tctestct_exists(&self, c1: &Circle, c2: &Circle) -> bool {
        c1.left == c2.left
            && c1.forward != c2.forward
            && self.d >= 4.0 / self.p.kappa + 2.0 * self.p.radius * self.p.sin_mu
    }

    pub fn tctstct_exists(&self, c1: &Circle, c2: &Circle) -> bool {
        self.tctistct_exists(c1, c2) || self.tctestct_exists(c1, c2)
    }

    pub fn tctstct(&self, c1: &Circle, c2: &Circle) -> (f64, Decomposition) {
        let internal = self.tctistct_exists(c1, c2);
        let (dx, dy) = if internal {
            let dy = 4.0 * self.p.radius * self.p.cos_mu / (self.d * self.p.kappa);
            (((self.rr() * self.rr()) - dy * dy).abs().sqrt(), dy)
        } else {
            (self.rr(), 0.0)
        };
        let (x1, y1) = global_frame_change(c1.xc, c1.yc, self.alpha, dx, dy);
        let (x2, y2) = global_frame_change(c2.xc, c2.yc, self.alpha, -dx, -dy);
        let pivot1 = CirclePose::new(x1, y1, !c1.left, !c1.forward, self.p.kappa);
        let pivot2 = CirclePose::new(x2, y2, !c2.left, c2.forward, self.p.kappa);
        let p1 = CirclePose::from(c1);
        let p2 = CirclePose::from(c2);

        let q1 = cusp_join(&p1, &pivot1);
        let (q2, q3) = if internal {
            internal_tangent_joins(&pivot1, &pivot2, self.p.radius, self.p.mu)
        } else {
            external_tangent_joins(&pivot1, &pivot2, self.p.radius, self.p.mu)
        };
        let q4 = cusp_join(&pivot2, &p2);

        let cstart = c1.clone();
        let cend = c2.clone();
        let ci1 = Circle::new(q2, !c1.left, c1.forward, true, self.p.hc);
        let ci2 = Circle::new(q3, !c2.left, c2.forward, true, self.p.hc);
        let length = cstart.rs_turn_length(&q1)
            + ci1.hc_turn_length(&q1)
            + q2.distance(&q3)
            + ci2.hc_turn_length(&q4)
            + cend.rs_turn_length(&q4);
        (
            length,
            Decomposition::TcTSTcT { cstart, cend, ci1, ci2, q1, q2, q3, q4 },
        )
    }

    // ##### TTcTT ############################################################

    pub fn ttctt_exists(&self, c1: &Circle, c2: &Circle) -> bool {
        c1.left != c2.left
            && c1.forward == c2.forward
            && self.d <= 4.0 * self.p.radius + self.rr()
    }

    pub fn ttctt(&self, c1: &Circle, c2: &Circle) -> (f64, Decomposition) {
        let r1 = self.rr();
        let r2 = 2.0 * self.p.radius;
        let dx = if self.d < 4.0 * self.p.radius - r1 {
            0.5 * (self.d + r1)
        } else {
            0.5 * (self.d - r1)
        };
        let dy = (r2 * r2 - dx * dx).abs().sqrt();
        let p1 = CirclePose::from(c1);
        let p2 = CirclePose::from(c2);
        let q1 = boundary_config(c1);
        let q3 = boundary_config(c2);

        let mut best: Option<(f64, Decomposition)> = None;
        for side in [dy, -dy] {
            let (xa, ya) = global_frame_change(c1.xc, c1.yc, self.alpha, dx, side);
            let (xb, yb) = global_frame_change(c2.xc, c2.yc, self.alpha, -dx, side);
            let pivot1 = CirclePose::new(xa, ya, !c1.left, c1.forward, self.p.kappa);
            let pivot2 = CirclePose::new(xb, yb, !c2.left, !c2.forward, self.p.kappa);

            let qa = smooth_join(&p1, &pivot1, self.p.mu);
            let qb = cusp_join(&pivot1, &pivot2);
            let qc = smooth_join(&pivot2, &p2, self.p.mu);

            let cstart = Circle::new(qa, c1.left, !c1.forward, self.p.hc_regular, self.p.hc);
            let ci1 = Circle::new(qa, !c1.left, c1.forward, true, self.p.hc);
            let ci2 = Circle::new(qc, !c2.left, c2.forward, true, self.p.hc);
            let cend = Circle::new(qc, c2.left, !c2.forward, self.p.hc_regular, self.p.hc);

            let length = cstart.hc_turn_length(&q1)
                + ci1.hc_turn_length(&qb)
                + ci2.hc_turn_length(&qb)
                + cend.hc_turn_length(&q3);
            if best.as_ref().map_or(true, |(l, _)| length < *l) {
                best = Some((
                    length,
                    Decomposition::TTcTT { cstart, cend, ci1, ci2, q1, q2: qb, q3 },
                ));
            }
        }
        best.expect("both pivot candidates evaluated")
    }

    // ##### TcTTcT ###########################################################

    pub fn tcttct_exists(&self, c1: &Circle, c2: &Circle) -> bool {
        c1.left != c2.left
            && c1.forward != c2.forward
            && self.d <= 2.0 * self.rr() + 2.0 * self.p.radius
            && self.d >= 2.0 * self.rr() - 2.0 * self.p.radius
    }

    pub fn tcttct(&self, c1: &Circle, c2: &Circle) -> (f64, Decomposition) {
        let r1 = self.rr();
        let r2 = self.p.radius;
        let dx = (r1 * r1 + 0.25 * self.d * self.d - r2 * r2) / self.d;
        let dy = (r1 * r1 - dx * dx).abs().sqrt();
        let p1 = CirclePose::from(c1);
        let p2 = CirclePose::from(c2);
        let cstart = c1.clone();
        let cend = c2.clone();

        let mut best: Option<(f64, Decomposition)> = None;
        for side in [dy, -dy] {
            let (xa, ya) = global_frame_change(c1.xc, c1.yc, self.alpha, dx, side);
            let (xb, yb) = global_frame_change(c2.xc, c2.yc, self.alpha, -dx, -side);
            let pivot1 = CirclePose::new(xa, ya, !c1.left, !c1.forward, self.p.kappa);
            let pivot2 = CirclePose::new(xb, yb, !c2.left, c2.forward, self.p.kappa);

            let qa = cusp_join(&p1, &pivot1);
            let qb = smooth_join(&pivot1, &pivot2, self.p.mu);
            let qc = cusp_join(&pivot2, &p2);

            let ci1 = Circle::new(qb, !c1.left, c1.forward, true, self.p.hc);
            let ci2 = Circle::new(qb, c1.left, !c1.forward, true, self.p.hc);
            let length = cstart.rs_turn_length(&qa)
                + ci1.hc_turn_length(&qa)
                + ci2.hc_turn_length(&qc)
                + cend.rs_turn_length(&qc);
            if best.as_ref().map_or(true, |(l, _)| length < *l) {
                best = Some((
                    length,
                    Decomposition::TcTTcT {
                        cstart: cstart.clone(),
                        cend: cend.clone(),
                        ci1,
                        ci2,
                        q1: qa,
                        q2: qc,
                    },
                ));
            }
        }
        best.expect("both pivot candidates evaluated")
    }

    // ##### TTT ##############################################################

    pub fn ttt_exists(&self, c1: &Circle, c2: &Circle) -> bool {
        c1.left == c2.left && c1.forward != c2.forward && self.d <= 4.0 * self.p.radius
    }

    pub fn ttt(&self, c1: &Circle, c2: &Circle) -> (f64, Decomposition) {
        let r = 2.0 * self.p.radius;
        let dx = 0.5 * self.d;
        let dy = (r * r - dx * dx).abs().sqrt();
        let p1 = CirclePose::from(c1);
        let p2 = CirclePose::from(c2);
        let q1 = boundary_config(c1);
        let q3 = boundary_config(c2);

        let mut best: Option<(f64, Decomposition)> = None;
        for side in [dy, -dy] {
            let (x, y) = global_frame_change(c1.xc, c1.yc, self.alpha, dx, side);
            let pivot = CirclePose::new(x, y, !c1.left, c1.forward, self.p.kappa);
            let qa = smooth_join(&p1, &pivot, self.p.mu);
            let qb = smooth_join(&pivot, &p2, self.p.mu);

            let cstart = Circle::new(qa, c1.left, !c1.forward, self.p.hc_regular, self.p.hc);
            let ci = Circle::new(qa, !c1.left, c1.forward, self.p.cc_regular, self.p.hc);
            let cend = Circle::new(qb, c2.left, !c2.forward, self.p.hc_regular, self.p.hc);
            let length =
                cstart.hc_turn_length(&q1) + ci.cc_turn_length(&qb) + cend.hc_turn_length(&q3);
            if best.as_ref().map_or(true, |(l, _)| length < *l) {
                best = Some((
                    length,
                    Decomposition::TTT { cstart, cend, ci, q1, q2: qb, q3 },
                ));
            }
        }
        best.expect("both pivot candidates evaluated")
    }

    // ##### TcST / TScT ######################################################

    fn straight_cusp_offsets(&self) -> (f64, f64) {
        (
            (self.p.radius * self.p.sin_mu).abs(),
            (self.p.radius * self.p.cos_mu).abs(),
        )
    }

    fn tcist_exists(&self, c1: &Circle, c2: &Circle) -> bool {
        c1.left != c2.left
            && c1.forward == c2.forward
            && self.d >= 2.0 * self.p.radius * self.p.cos_mu
    }

    fn tcest_exists(&self, c1: &Circle, c2: &Circle) -> bool {
        c1.left == c2.left && c1.forward == c2.forward && self.d >= self.epsilon()
    }

    pub fn tcst_exists(&self, c1: &Circle, c2: &Circle) -> bool {
        self.tcist_exists(c1, c2) || self.tcest_exists(c1, c2)
    }

    pub fn tcst(&self, c1: &Circle, c2: &Circle) -> (f64, Decomposition) {
        let (dx, dy) = self.straight_cusp_offsets();
        let (q2, q3) = if self.tcist_exists(c1, c2) {
            let at = (2.0 * self.p.radius * self.p.cos_mu / self.d).asin().abs();
            let (theta, o1, o2, shift) = match (c1.left, c1.forward) {
                (true, true) => (self.alpha - at, (-dx, dy), (-dx, -dy), PI),
                (true, false) => (self.alpha + at, (-dx, -dy), (-dx, dy), 0.0),
                (false, true) => (self.alpha + at, (-dx, -dy), (-dx, dy), PI),
                (false, false) => (self.alpha - at, (-dx, dy), (-dx, -dy), 0.0),
            };
            let (xa, ya) = global_frame_change(c1.xc, c1.yc, theta, o1.0, o1.1);
            let (xb, yb) = global_frame_change(c2.xc, c2.yc, theta, o2.0, o2.1);
            (
                Configuration::new(xa, ya, theta + shift, 0.0),
                Configuration::new(xb, yb, theta + shift, 0.0),
            )
        } else {
            let theta = self.alpha;
            let (o, shift) = match (c1.left, c1.forward) {
                (true, true) => ((-dx, dy), PI),
                (true, false) => ((-dx, -dy), 0.0),
                (false, true) => ((-dx, -dy), PI),
                (false, false) => ((-dx, dy), 0.0),
            };
            let (xa, ya) = global_frame_change(c1.xc, c1.yc, theta, o.0, o.1);
            let (xb, yb) = global_frame_change(c2.xc, c2.yc, theta, o.0, o.1);
            (
                Configuration::new(xa, ya, theta + shift, 0.0),
                Configuration::new(xb, yb, theta + shift, 0.0),
            )
        };
        let (length, cstart, cend, q1, q4) = self.hc_straight_hc(c1, c2, &q2, &q3);
        (length, Decomposition::TcST { cstart, cend, q1, q2, q3, q4 })
    }

    fn tisct_exists(&self, c1: &Circle, c2: &Circle) -> bool {
        c1.left != c2.left
            && c1.forward == c2.forward
            && self.d >= 2.0 * self.p.radius * self.p.cos_mu
    }

    fn tesct_exists(&self, c1: &Circle, c2: &Circle) -> bool {
        c1.left == c2.left && c1.forward == c2.forward && self.d >= self.epsilon()
    }

    pub fn tsct_exists(&self, c1: &Circle, c2: &Circle) -> bool {
        self.tisct_exists(c1, c2) || self.tesct_exists(c1, c2)
    }

    pub fn tsct(&self, c1: &Circle, c2: &Circle) -> (f64, Decomposition) {
        let (dx, dy) = self.straight_cusp_offsets();
        let (q2, q3) = if self.tisct_exists(c1, c2) {
            let at = (2.0 * self.p.radius * self.p.cos_mu / self.d).asin().abs();
            let (theta, o1, o2, shift) = match (c1.left, c1.forward) {
                (true, true) => (self.alpha + at, (dx, -dy), (dx, dy), 0.0),
                (true, false) => (self.alpha - at, (dx, dy), (dx, -dy), PI),
                (false, true) => (self.alpha - at, (dx, dy), (dx, -dy), 0.0),
                (false, false) => (self.alpha + at, (dx, -dy), (dx, dy), PI),
            };
            let (xa, ya) = global_frame_change(c1.xc, c1.yc, theta, o1.0, o1.1);
            let (xb, yb) = global_frame_change(c2.xc, c2.yc, theta, o2.0, o2.1);
            (
                Configuration::new(xa, ya, theta + shift, 0.0),
                Configuration::new(xb, yb, theta + shift, 0.0),
            )
        } else {
            let theta = self.alpha;
            let (o, shift) = match (c1.left, c1.forward) {
                (true, true) => ((dx, -dy), 0.0),
                (true, false) => ((dx, dy), PI),
                (false, true) => ((dx, dy), 0.0),
                (false, false) => ((dx, -dy), PI),
            };
            let (xa, ya) = global_frame_change(c1.xc, c1.yc, theta, o.0, o.1);
            let (xb, yb) = global_frame_change(c2.xc, c2.yc, theta, o.0, o.1);
            (
                Configuration::new(xa, ya, theta + shift, 0.0),
                Configuration::new(xb, yb, theta + shift, 0.0),
            )
        };
        let (length, cstart, cend, q1, q4) = self.hc_straight_hc(c1, c2, &q2, &q3);
        (length, Decomposition::TScT { cstart, cend, q1, q2, q3, q4 })
    }

    /// Shared construction of the boundary turns around a straight whose
    /// feet `q2`/`q3` are already placed.
    fn hc_straight_hc(
        &self,
        c1: &Circle,
        c2: &Circle,
        q2: &Configuration,
        q3: &Configuration,
    ) -> (f64, Circle, Circle, Configuration, Configuration) {
        let cstart = Circle::new(*q2, c1.left, !c1.forward, self.p.hc_regular, self.p.hc);
        let cend = Circle::new(*q3, c2.left, !c2.forward, self.p.hc_regular, self.p.hc);
        let q1 = boundary_config(c1);
        let q4 = boundary_config(c2);
        let length = cstart.hc_turn_length(&q1) + q2.distance(q3) + cend.hc_turn_length(&q4);
        (length, cstart, cend, q1, q4)
    }

    // ##### TcScT ############################################################

    fn tcisct_exists(&self, c1: &Circle, c2: &Circle) -> bool {
        c1.left != c2.left && c1.forward != c2.forward && self.d >= self.rr()
    }

    fn tcesct_exists(&self, c1: &Circle, c2: &Circle) -> bool {
        c1.left == c2.left && c1.forward != c2.forward && self.d >= self.epsilon()
    }

    pub fn tcsct_exists(&self, c1: &Circle, c2: &Circle) -> bool {
        self.tcisct_exists(c1, c2) || self.tcesct_exists(c1, c2)
    }

    pub fn tcsct(&self, c1: &Circle, c2: &Circle) -> (f64, Decomposition) {
        let dy = 1.0 / self.p.kappa;
        let (q1, q2) = if self.tcisct_exists(c1, c2) {
            let at = (2.0 / (self.p.kappa * self.d)).asin().abs();
            let (theta, s1, s2, shift) = match (c1.left, c1.forward) {
                (true, true) => (self.alpha - at, dy, -dy, PI),
                (true, false) => (self.alpha + at, -dy, dy, 0.0),
                (false, true) => (self.alpha + at, -dy, dy, PI),
                (false, false) => (self.alpha - at, dy, -dy, 0.0),
            };
            let (xa, ya) = global_frame_change(c1.xc, c1.yc, theta, 0.0, s1);
            let (xb, yb) = global_frame_change(c2.xc, c2.yc, theta, 0.0, s2);
            (
                Configuration::new(xa, ya, theta + shift, c1.kappa),
                Configuration::new(xb, yb, theta + shift, c2.kappa),
            )
        } else {
            let theta = self.alpha;
            let (s, shift) = match (c1.left, c1.forward) {
                (true, true) => (dy, PI),
                (true, false) => (-dy, 0.0),
                (false, true) => (-dy, PI),
                (false, false) => (dy, 0.0),
            };
            let (xa, ya) = global_frame_change(c1.xc, c1.yc, theta, 0.0, s);
            let (xb, yb) = global_frame_change(c2.xc, c2.yc, theta, 0.0, s);
            (
                Configuration::new(xa, ya, theta + shift, c1.kappa),
                Configuration::new(xb, yb, theta + shift, c2.kappa),
            )
        };
        let cstart = c1.clone();
        let cend = c2.clone();
        let length = cstart.rs_turn_length(&q1) + q1.distance(&q2) + cend.rs_turn_length(&q2);
        (length, Decomposition::TcScT { cstart, cend, q1, q2 })
    }
}
