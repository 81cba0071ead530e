//! Ball, world and run state
//!
//! Everything needed to replay a run deterministically lives here.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::collision::circle_overlaps_segment;
use super::segment::Segment;
use crate::consts::*;

/// The moving body: a circle with the velocity accumulated for the current
/// step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: DVec2,
    pub vel: DVec2,
    /// Fixed and positive for the lifetime of the run
    pub radius: f64,
}

impl Ball {
    pub fn new() -> Self {
        Self {
            pos: BALL_SPAWN,
            vel: DVec2::ZERO,
            radius: BALL_RADIUS,
        }
    }
}

impl Default for Ball {
    fn default() -> Self {
        Self::new()
    }
}

/// Static line geometry, ordered, read-only during a resolve call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct World {
    segments: Vec<Segment>,
}

impl World {
    pub fn from_segments(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn push(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Immutable starting geometry for a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    pub segments: Vec<Segment>,
}

impl Level {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// The built-in level: border walls around an 800x600 playfield plus a
    /// start ramp under the spawn point.
    pub fn classic() -> Self {
        Self::new(vec![
            Segment::from_coords(1.0, 1.0, 1.0, 598.0),
            Segment::from_coords(1.0, 1.0, 798.0, 1.0),
            Segment::from_coords(1.0, 598.0, 798.0, 598.0),
            Segment::from_coords(798.0, 1.0, 798.0, 598.0),
            Segment::from_coords(1.0, 81.0, 41.0, 121.0),
        ])
    }
}

/// Complete run state (deterministic, serializable).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    level: Level,
    /// Level geometry plus any segments added during the run
    pub world: World,
    pub ball: Ball,
    pub time_ticks: u64,
    pub goal: bool,
}

impl GameState {
    pub fn new(level: Level) -> Self {
        let world = World::from_segments(level.segments.clone());
        Self {
            level,
            world,
            ball: Ball::new(),
            time_ticks: 0,
            goal: false,
        }
    }

    /// Elapsed run time in milliseconds; frozen once the goal is reached.
    pub fn time_ms(&self) -> u64 {
        self.time_ticks * TICK_MS
    }

    /// Put the ball back at spawn and drop all segments added during the run.
    pub fn reset(&mut self) {
        self.ball = Ball::new();
        self.world = World::from_segments(self.level.segments.clone());
        self.time_ticks = 0;
        self.goal = false;
    }

    /// Add a segment to the world. A segment that already overlaps the ball
    /// is rejected and resets the run.
    pub fn add_segment(&mut self, segment: Segment) -> bool {
        if circle_overlaps_segment(self.ball.pos, self.ball.radius, &segment) {
            log::info!("segment overlaps ball, resetting run");
            self.reset();
            return false;
        }
        self.world.push(segment);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = GameState::new(Level::classic());
        assert_eq!(state.world.len(), 5);
        assert_eq!(state.ball.pos, BALL_SPAWN);
        assert_eq!(state.ball.vel, DVec2::ZERO);
        assert!(!state.goal);
    }

    #[test]
    fn test_add_segment_accepted() {
        let mut state = GameState::new(Level::classic());
        assert!(state.add_segment(Segment::from_coords(500.0, 500.0, 600.0, 500.0)));
        assert_eq!(state.world.len(), 6);
    }

    #[test]
    fn test_add_segment_through_ball_resets() {
        let mut state = GameState::new(Level::classic());
        state.time_ticks = 40;

        // diagonal straight through the spawn point
        assert!(!state.add_segment(Segment::from_coords(0.0, 0.0, 40.0, 40.0)));
        assert_eq!(state.world.len(), 5);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.ball.pos, BALL_SPAWN);
    }

    #[test]
    fn test_reset_drops_added_segments() {
        let mut state = GameState::new(Level::classic());
        state.add_segment(Segment::from_coords(500.0, 500.0, 600.0, 500.0));
        state.reset();
        assert_eq!(state.world.len(), 5);
    }

    #[test]
    fn test_level_json_round_trip() {
        let json = serde_json::to_string(&Level::classic()).unwrap();
        let level: Level = serde_json::from_str(&json).unwrap();
        assert_eq!(level.segments, Level::classic().segments);
    }
}
