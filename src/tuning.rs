//! Data-driven game balance
//!
//! Every gameplay constant lives here so revisions can be compared side by
//! side and balance can be loaded from JSON without a rebuild.

use serde::{Deserialize, Serialize};

/// Gameplay balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player physics ===
    /// Downward acceleration per tick (offset grows toward ground)
    pub gravity: f32,
    /// Velocity applied by the first jump (negative = upward)
    pub jump_impulse: f32,
    /// Velocity applied by the double jump (weaker than the first)
    pub double_jump_impulse: f32,

    // === Obstacles ===
    /// Horizontal speed at run start
    pub base_speed: f32,
    /// Speed added at each score milestone
    pub speed_step: f32,
    /// Score interval between speed increases
    pub speed_step_score: u64,
    /// Spawn roll is drawn from `0..=spawn_roll_max`
    pub spawn_roll_max: u32,
    /// A roll below this spawns an obstacle (0 disables spawning)
    pub spawn_chance: u32,
    /// Horizontal position new obstacles appear at
    pub spawn_x: f32,
    /// Obstacles left of this are pruned
    pub despawn_x: f32,
    /// Obstacle height (cosmetic, passed through to the view)
    pub obstacle_height: f32,

    // === Collision ===
    /// Player's fixed horizontal position
    pub player_anchor_x: f32,
    /// Horizontal proximity that counts as overlap
    pub collision_radius: f32,
    /// Player must be above (more negative than) this to clear an obstacle
    pub clearance_offset: f32,
    /// Impact pause between collision and game over (ms)
    pub game_over_delay_ms: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.6,
            jump_impulse: -10.0,
            double_jump_impulse: -8.0,

            base_speed: 1.5,
            speed_step: 0.5,
            speed_step_score: 500,
            spawn_roll_max: 100,
            spawn_chance: 2,
            spawn_x: 150.0,
            despawn_x: -20.0,
            obstacle_height: 20.0,

            player_anchor_x: 23.0,
            collision_radius: 15.0,
            clearance_offset: -15.0,
            game_over_delay_ms: 300,
        }
    }
}

impl Tuning {
    /// Earlier balance revision: wider hitbox further left, no impact pause
    pub fn classic() -> Self {
        Self {
            player_anchor_x: 16.0,
            collision_radius: 16.0,
            game_over_delay_ms: 0,
            ..Self::default()
        }
    }

    /// Parse tuning from JSON, missing fields take their default
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> String {
        // Plain struct of numbers, serialization cannot fail
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Copy with spawning disabled (scripted scenarios, tutorials)
    pub fn without_spawns(mut self) -> Self {
        self.spawn_chance = 0;
        self
    }
}
