//! Chalkline - draw-a-line ball physics
//!
//! Core modules:
//! - `sim`: Deterministic simulation (swept collision detection, ball state,
//!   fixed-step tick)
//!
//! The simulation is pure: two calls with identical inputs produce
//! bit-identical outputs. Rendering, input capture and persistence are the
//! caller's concern and do not appear in this crate.

pub mod sim;

pub use sim::{Contact, ResolvedStep, Segment, circle_overlaps_segment, resolve_step};

/// Simulation constants
pub mod consts {
    use glam::DVec2;

    /// Fixed simulation timestep in milliseconds (40 Hz)
    pub const TICK_MS: u64 = 25;

    /// Per-tick downward velocity increment
    pub const GRAVITY: f64 = 0.25;
    /// Per-tick velocity damping factor, applied to both axes
    pub const DRAG: f64 = 0.98;

    /// Ball defaults
    pub const BALL_RADIUS: f64 = 16.0;
    pub const BALL_SPAWN: DVec2 = DVec2::new(20.0, 20.0);

    /// Goal region: everything at and beyond this corner counts as a goal
    pub const GOAL_MIN_X: f64 = 730.0;
    pub const GOAL_MIN_Y: f64 = 540.0;

    /// Maximum contacts resolved within a single step; the resolve loop
    /// freezes the ball at the last contact once this is exhausted
    pub const MAX_BOUNCES: u32 = 16;
}

/// Round to a fixed number of decimal places.
///
/// Intersection acceptance and duplicate-contact detection are defined in
/// terms of fixed-precision rounding rather than epsilon comparisons; the
/// decimal counts are part of the behavioral contract.
#[inline]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}
