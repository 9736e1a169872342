//! Path steering: family catalog, per-circle-pair selection, driver and
//! control emission.

pub mod controls;
pub mod family;
pub mod selector;
pub mod state_space;
mod tangents;

use crate::geometry::circle::CircleParam;

/// Immutable per-state-space context shared by every predicate and builder.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SpaceParams {
    /// Maximum curvature magnitude
    pub kappa: f64,
    /// Maximum sharpness magnitude
    pub sigma: f64,
    /// Clothoid-entry circle radius
    pub radius: f64,
    /// Clothoid-entry angular offset
    pub mu: f64,
    pub sin_mu: f64,
    pub cos_mu: f64,
    /// Clothoid-entry circle parameters
    pub hc: CircleParam,
    /// Instantaneous-turn circle parameters
    pub rs: CircleParam,
    /// Regular flag applied to boundary turn circles built inside families
    pub hc_regular: bool,
    /// Regular flag applied to the middle circle of the triple-turn family
    pub cc_regular: bool,
}

impl SpaceParams {
    pub fn new(kappa: f64, sigma: f64, hc_regular: bool, cc_regular: bool) -> Self {
        let hc = CircleParam::clothoid(kappa, sigma);
        let rs = CircleParam::instantaneous(kappa);
        Self {
            kappa,
            sigma,
            radius: hc.radius,
            mu: hc.mu,
            sin_mu: hc.sin_mu,
            cos_mu: hc.cos_mu,
            hc,
            rs,
            hc_regular,
            cc_regular,
        }
    }
}
