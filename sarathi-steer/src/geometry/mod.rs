//! Geometric layer: turning circles and their arc-length calculators.

pub mod circle;
