//! Deterministic simulation module
//!
//! All simulation logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Stable iteration order (world segments in insertion order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod segment;
pub mod state;
pub mod tick;

pub use collision::{
    Contact, ResolvedStep, capsule_contacts, circle_overlaps_segment,
    circle_segment_intersection, reflect, resolve_step, segment_segment_intersection,
};
pub use segment::Segment;
pub use state::{Ball, GameState, Level, World};
pub use tick::tick;
