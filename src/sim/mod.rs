//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed period only
//! - Seeded RNG only
//! - Integer-millisecond scheduling
//! - No rendering, storage or haptics dependencies

pub mod collision;
pub mod schedule;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Hit, first_hit, overlaps};
pub use schedule::{Deferred, ScheduledTask, Scheduler};
pub use spawn::{roll_spawn, spawn_obstacles};
pub use state::{
    GameEvent, GameState, JumpKind, Obstacle, ObstacleKind, Player, RunPhase, Snapshot,
};
pub use tick::tick;
