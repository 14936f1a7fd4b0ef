//! Shared types and utilities for the aviator scene.
//!
//! # Invariants
//! - `normalize` never divides by zero and never panics on inverted ranges.
//! - `Transform` rotations are Euler XYZ angles in radians.

pub mod math;
pub mod rng;
pub mod types;

pub use math::{normalize, wrap_angle};
pub use rng::SplitMix64;
pub use types::{Axis, Color, ColorParseError, Transform};
