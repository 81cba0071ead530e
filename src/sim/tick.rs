//! Fixed timestep simulation tick
//!
//! Integration happens before collision resolution: gravity, then drag, then
//! the naive position update, then the swept resolve pass over the whole
//! travel of this step.

use super::collision::resolve_step;
use super::state::GameState;
use crate::consts::*;

/// Advance the simulation by one fixed timestep.
pub fn tick(state: &mut GameState) {
    state.ball.vel.y += GRAVITY;
    state.ball.vel *= DRAG;
    state.ball.pos += state.ball.vel;

    let resolved = resolve_step(
        state.ball.pos,
        state.ball.radius,
        state.ball.vel,
        state.world.segments(),
    );
    state.ball.pos = resolved.pos;
    state.ball.vel = resolved.vel;

    if !state.goal && state.ball.pos.x >= GOAL_MIN_X && state.ball.pos.y >= GOAL_MIN_Y {
        state.goal = true;
        log::info!("goal reached after {} ms", state.time_ms());
    }

    // the clock freezes on the goal tick
    if !state.goal {
        state.time_ticks += 1;
    }
}

#[cfg(test)]
mod tests {
    use glam::DVec2;

    use super::*;
    use crate::sim::state::Level;

    #[test]
    fn test_tick_integrates_gravity_then_drag() {
        let mut state = GameState::new(Level::new(Vec::new()));
        tick(&mut state);

        assert_eq!(state.ball.vel, DVec2::new(0.0, GRAVITY * DRAG));
        assert_eq!(state.ball.pos, BALL_SPAWN + DVec2::new(0.0, GRAVITY * DRAG));
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_goal_freezes_clock() {
        let mut state = GameState::new(Level::new(Vec::new()));
        state.ball.pos = DVec2::new(750.0, 550.0);

        tick(&mut state);
        assert!(state.goal);
        assert_eq!(state.time_ticks, 0);

        tick(&mut state);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_ball_stays_inside_walls() {
        let mut state = GameState::new(Level::classic());
        for _ in 0..600 {
            tick(&mut state);
            let pos = state.ball.pos;
            assert!(pos.is_finite());
            assert!(pos.x > 1.0 && pos.x < 798.0, "escaped at x = {}", pos.x);
            assert!(pos.y > 1.0 && pos.y < 598.0, "escaped at y = {}", pos.y);
        }
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(Level::classic());
        let mut state2 = GameState::new(Level::classic());

        for _ in 0..400 {
            tick(&mut state1);
            tick(&mut state2);
        }

        assert_eq!(state1.ball.pos, state2.ball.pos);
        assert_eq!(state1.ball.vel, state2.ball.vel);
        assert_eq!(state1.time_ticks, state2.time_ticks);
    }
}
