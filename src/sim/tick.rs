//! Fixed timestep simulation tick
//!
//! Core game loop that advances a run by one clock period.

use std::ops::ControlFlow;

use super::collision::first_hit;
use super::spawn::spawn_obstacles;
use super::state::{GameEvent, GameState, RunPhase};

/// Advance the game state by one fixed period.
///
/// Returns `Break` when there is no live run to advance (idle or game over);
/// the driver should stop its clock.
pub fn tick(state: &mut GameState) -> ControlFlow<()> {
    // Don't tick if idle or game over
    match state.phase {
        RunPhase::Idle | RunPhase::GameOver => return ControlFlow::Break(()),
        RunPhase::Playing | RunPhase::Collided => {}
    }

    state.time_ticks += 1;
    let frozen = state.phase == RunPhase::Collided;

    if !frozen {
        update_score(state);
    }

    // Player keeps falling during the impact pause
    let gravity = state.tuning.gravity;
    state.player.integrate(gravity);

    if frozen {
        return ControlFlow::Continue(());
    }

    spawn_obstacles(state);

    for obstacle in &mut state.obstacles {
        obstacle.x -= state.obstacle_speed;
    }

    if let Some(hit) = first_hit(&state.player, &state.obstacles, &state.tuning) {
        state.register_collision(hit.obstacle_id);
    }

    // Obstacles stay on screen once the world is frozen
    if state.phase == RunPhase::Playing {
        let despawn_x = state.tuning.despawn_x;
        state.obstacles.retain(|o| o.x >= despawn_x);
    }

    ControlFlow::Continue(())
}

/// One point per tick; speed steps up at every milestone
fn update_score(state: &mut GameState) {
    state.score += 1;

    let step = state.tuning.speed_step_score;
    if step > 0 && state.score.is_multiple_of(step) {
        state.obstacle_speed += state.tuning.speed_step;
        log::debug!(
            "Score {} reached, obstacle speed now {}",
            state.score,
            state.obstacle_speed
        );
        state.push_event(GameEvent::SpeedUp {
            speed: state.obstacle_speed,
        });
    }
}
