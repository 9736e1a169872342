//! Sarathi-steer - shortest-path steering for car-like vehicles
//!
//! Computes shortest feasible paths between planar vehicle states subject to
//! bounded curvature and bounded sharpness (curvature rate), and emits the
//! control sequence tracing each path.
//!
//! # Architecture
//!
//! The crate is organized into 3 logical layers:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                     steer/                          │  ← Path selection
//! │   (family catalog, selector, driver, controls)      │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                   geometry/                         │  ← Turning circles
//! │            (circle parameters, turn lengths)        │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                     core/                           │  ← Foundation
//! │        (math, Fresnel integrals, value types)       │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! Paths are assembled from three motion primitives: circular arcs at full
//! curvature, clothoids ramping curvature at full sharpness, and straights.
//! A path family is a template of turns, straights and cusps; the selector
//! evaluates every feasible family for a pair of endpoint turning circles
//! and the driver picks the best pairing out of the sixteen candidate
//! circle combinations.
//!
//! # Example
//!
//! ```
//! use sarathi_steer::{HcReedsSheppSpace, State};
//!
//! let space = HcReedsSheppSpace::new(1.0, 1.0, 0.1).unwrap();
//! let start = State::new(0.0, 0.0, 0.0, 0.0, 0.0);
//! let goal = State::new(3.0, 3.0, std::f64::consts::FRAC_PI_2, 0.0, 0.0);
//!
//! let controls = space.get_controls(&start, &goal);
//! assert!(!controls.is_empty());
//! let samples = space.get_path(&start, &goal);
//! assert!(samples.len() > 1);
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod geometry;
pub mod steer;

pub use crate::config::VehicleConfig;
pub use crate::core::math::EPSILON;
pub use crate::core::types::{Configuration, Control, State};
pub use crate::error::{Result, SteerError};
pub use crate::geometry::circle::{Circle, CircleParam};
pub use crate::steer::family::{Decomposition, Family, Path};
pub use crate::steer::state_space::HcReedsSheppSpace;
