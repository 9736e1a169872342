//! State space driver: endpoint circle enumeration and the public steering
//! entry points.

use log::debug;

use crate::config::VehicleConfig;
use crate::core::types::{Configuration, Control, State};
use crate::error::{Result, SteerError};
use crate::geometry::circle::Circle;

use super::controls::{controls_for_path, integrate};
use super::family::Path;
use super::selector::best_circle_pair_path;
use super::SpaceParams;

/// Shortest-path steering between states whose boundary maneuvers run at
/// full curvature in either turning direction.
///
/// Construction precomputes the two turning-circle parameter sets; the
/// instance itself is immutable and can be shared read-only across threads.
///
/// # Example
/// ```
/// use sarathi_steer::{HcReedsSheppSpace, State};
///
/// let space = HcReedsSheppSpace::new(1.0, 1.0, 0.1).unwrap();
/// let s1 = State::new(0.0, 0.0, 0.0, 0.0, 0.0);
/// let s2 = State::new(4.0, 2.0, 0.5, 0.0, 0.0);
/// let distance = space.get_distance(&s1, &s2);
/// assert!(distance >= 2.0f64.hypot(4.0));
/// ```
#[derive(Debug, Clone)]
pub struct HcReedsSheppSpace {
    params: SpaceParams,
    discretization: f64,
}

impl HcReedsSheppSpace {
    /// Create a state space for the given curvature and sharpness limits and
    /// path sampling step.
    pub fn new(kappa_max: f64, sigma_max: f64, discretization: f64) -> Result<Self> {
        if kappa_max <= 0.0 {
            return Err(SteerError::InvalidParameter(format!(
                "kappa_max must be positive, got {kappa_max}"
            )));
        }
        if sigma_max <= 0.0 {
            return Err(SteerError::InvalidParameter(format!(
                "sigma_max must be positive, got {sigma_max}"
            )));
        }
        if discretization <= 0.0 {
            return Err(SteerError::InvalidParameter(format!(
                "discretization must be positive, got {discretization}"
            )));
        }
        Ok(Self {
            params: SpaceParams::new(kappa_max, sigma_max, false, false),
            discretization,
        })
    }

    /// Create a state space from a vehicle configuration.
    pub fn from_config(config: &VehicleConfig) -> Result<Self> {
        config.validate()?;
        Self::new(config.kappa_max, config.sigma_max, config.discretization)
    }

    /// Override the regular flags applied to turns built inside family
    /// constructions.
    pub fn with_regular_turns(mut self, hc_regular: bool, cc_regular: bool) -> Self {
        self.params.hc_regular = hc_regular;
        self.params.cc_regular = cc_regular;
        self
    }

    /// Maximum curvature magnitude.
    pub fn kappa_max(&self) -> f64 {
        self.params.kappa
    }

    /// Maximum sharpness magnitude.
    pub fn sigma_max(&self) -> f64 {
        self.params.sigma
    }

    /// Compute the shortest path between two states over all admissible
    /// pairings of endpoint turning circles.
    ///
    /// Candidate circles whose turning sign contradicts the endpoint
    /// curvature are skipped, independently for both driving directions.
    pub fn shortest_path(&self, s1: &State, s2: &State) -> Option<Path> {
        let start = Configuration::from(s1);
        let end = Configuration::from(s2);

        let variants = [(true, true), (false, true), (true, false), (false, false)];
        let start_circles: Vec<Circle> = variants
            .iter()
            .map(|&(left, forward)| Circle::new(start, left, forward, true, self.params.rs))
            .collect();
        let end_circles: Vec<Circle> = variants
            .iter()
            .map(|&(left, forward)| Circle::new(end, left, forward, true, self.params.rs))
            .collect();

        let admissible = |kappa: f64, left: bool| {
            if left {
                kappa >= 0.0
            } else {
                kappa <= 0.0
            }
        };

        let mut best: Option<Path> = None;
        for sc in &start_circles {
            if !admissible(s1.kappa, sc.left) {
                continue;
            }
            for ec in &end_circles {
                if !admissible(s2.kappa, ec.left) {
                    continue;
                }
                if let Some(path) = best_circle_pair_path(&self.params, sc, ec) {
                    if best.as_ref().map_or(true, |b| path.length < b.length) {
                        best = Some(path);
                    }
                }
            }
        }

        if let Some(path) = &best {
            debug!("shortest path: {} length {:.6}", path.family(), path.length);
        }
        best
    }

    /// Length of the shortest path, or infinity when no path exists.
    pub fn get_distance(&self, s1: &State, s2: &State) -> f64 {
        self.shortest_path(s1, s2)
            .map_or(f64::INFINITY, |path| path.length)
    }

    /// Control sequence tracing the shortest path.
    pub fn get_controls(&self, s1: &State, s2: &State) -> Vec<Control> {
        self.shortest_path(s1, s2)
            .map_or_else(Vec::new, |path| controls_for_path(&path))
    }

    /// Dense state samples along the shortest path, one every
    /// `discretization` meters of arc length.
    pub fn get_path(&self, s1: &State, s2: &State) -> Vec<State> {
        let controls = self.get_controls(s1, s2);
        integrate(s1, &controls, self.discretization)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_parameters() {
        assert!(HcReedsSheppSpace::new(0.0, 1.0, 0.1).is_err());
        assert!(HcReedsSheppSpace::new(1.0, -1.0, 0.1).is_err());
        assert!(HcReedsSheppSpace::new(1.0, 1.0, 0.0).is_err());
    }

    #[test]
    fn test_identity_state() {
        let space = HcReedsSheppSpace::new(1.0, 1.0, 0.1).unwrap();
        let s = State::new(1.0, -2.0, 0.7, 0.0, 0.0);
        assert_eq!(space.get_distance(&s, &s), 0.0);
        assert!(space.get_controls(&s, &s).is_empty());
    }

    #[test]
    fn test_curvature_filter_skips_contradicting_circles() {
        let space = HcReedsSheppSpace::new(1.0, 1.0, 0.1).unwrap();
        // negative start curvature forbids left-turning start circles but a
        // path must still exist through the right-turning ones
        let s1 = State::new(0.0, 0.0, 0.0, -1.0, 0.0);
        let s2 = State::new(4.0, 0.0, 0.0, 1.0, 0.0);
        let path = space.shortest_path(&s1, &s2).unwrap();
        assert!(path.length.is_finite());
        let controls = space.get_controls(&s1, &s2);
        assert!((controls.first().unwrap().kappa - (-1.0)).abs() < 1e-12);
        assert!((controls.last().unwrap().end_kappa() - 1.0).abs() < 1e-12);
    }
}
