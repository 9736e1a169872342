//! Configuration loading for the steering state space.

use crate::error::{Result, SteerError};
use serde::Deserialize;
use std::path::Path;

/// Kinematic limits of the vehicle and sampling resolution.
#[derive(Clone, Debug, Deserialize)]
pub struct VehicleConfig {
    /// Maximum absolute curvature in 1/m (default: 1.0)
    #[serde(default = "default_kappa_max")]
    pub kappa_max: f64,

    /// Maximum absolute sharpness (curvature rate) in 1/m^2 (default: 1.0)
    #[serde(default = "default_sigma_max")]
    pub sigma_max: f64,

    /// Arc-length step used when sampling a path, in meters (default: 0.1)
    #[serde(default = "default_discretization")]
    pub discretization: f64,
}

fn default_kappa_max() -> f64 {
    1.0
}

fn default_sigma_max() -> f64 {
    1.0
}

fn default_discretization() -> f64 {
    0.1
}

impl Default for VehicleConfig {
    fn default() -> Self {
        Self {
            kappa_max: default_kappa_max(),
            sigma_max: default_sigma_max(),
            discretization: default_discretization(),
        }
    }
}

impl VehicleConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: VehicleConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that all limits are positive.
    pub fn validate(&self) -> Result<()> {
        if self.kappa_max <= 0.0 {
            return Err(SteerError::InvalidParameter(format!(
                "kappa_max must be positive, got {}",
                self.kappa_max
            )));
        }
        if self.sigma_max <= 0.0 {
            return Err(SteerError::InvalidParameter(format!(
                "sigma_max must be positive, got {}",
                self.sigma_max
            )));
        }
        if self.discretization <= 0.0 {
            return Err(SteerError::InvalidParameter(format!(
                "discretization must be positive, got {}",
                self.discretization
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = VehicleConfig::default();
        assert_eq!(config.kappa_max, 1.0);
        assert_eq!(config.sigma_max, 1.0);
        assert_eq!(config.discretization, 0.1);
    }

    #[test]
    fn test_from_toml() {
        let config = VehicleConfig::from_toml(
            r#"
            kappa_max = 0.5
            sigma_max = 0.25
            "#,
        )
        .unwrap();
        assert_eq!(config.kappa_max, 0.5);
        assert_eq!(config.sigma_max, 0.25);
        // omitted field falls back to its default
        assert_eq!(config.discretization, 0.1);
    }

    #[test]
    fn test_rejects_nonpositive_limits() {
        assert!(VehicleConfig::from_toml("kappa_max = 0.0").is_err());
        assert!(VehicleConfig::from_toml("sigma_max = -1.0").is_err());
        assert!(VehicleConfig::from_toml("discretization = 0.0").is_err());
    }
}
