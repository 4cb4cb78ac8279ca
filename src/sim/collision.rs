//! Player/obstacle overlap test
//!
//! The player sits at a fixed horizontal anchor. An obstacle hits when it is
//! horizontally close (on either side) and the player hasn't risen clear of it.

use super::state::{Obstacle, Player};
use crate::tuning::Tuning;

/// A detected overlap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub obstacle_id: u64,
    /// Absolute horizontal distance from the player anchor
    pub distance: f32,
}

/// Check a single obstacle against the player's vertical offset
#[inline]
pub fn overlaps(player_offset: f32, obstacle_x: f32, tuning: &Tuning) -> bool {
    let distance = (obstacle_x - tuning.player_anchor_x).abs();
    distance < tuning.collision_radius && player_offset > tuning.clearance_offset
}

/// Find the first obstacle (oldest first) the player overlaps
pub fn first_hit(player: &Player, obstacles: &[Obstacle], tuning: &Tuning) -> Option<Hit> {
    obstacles
        .iter()
        .find(|o| overlaps(player.offset, o.x, tuning))
        .map(|o| Hit {
            obstacle_id: o.id,
            distance: (o.x - tuning.player_anchor_x).abs(),
        })
}
