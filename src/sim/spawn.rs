//! Procedural obstacle spawning
//!
//! One roll per tick; a low roll drops a new obstacle at the right edge.

use rand::Rng;

use super::state::{GameState, Obstacle, ObstacleKind};
use crate::tuning::Tuning;

/// Roll for a spawn this tick. Returns the kind to spawn, if any.
pub fn roll_spawn<R: Rng>(rng: &mut R, tuning: &Tuning) -> Option<ObstacleKind> {
    let roll = rng.random_range(0..=tuning.spawn_roll_max);
    if roll >= tuning.spawn_chance {
        return None;
    }
    let kind = ObstacleKind::ALL[rng.random_range(0..ObstacleKind::ALL.len())];
    Some(kind)
}

/// Spawn step of the tick. Returns the new obstacle's id.
pub fn spawn_obstacles(state: &mut GameState) -> Option<u64> {
    let kind = roll_spawn(&mut state.rng, &state.tuning)?;
    let id = state.next_entity_id();
    state.obstacles.push(Obstacle {
        id,
        x: state.tuning.spawn_x,
        height: state.tuning.obstacle_height,
        kind,
    });
    Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_zero_chance_never_spawns() {
        let mut rng = Pcg32::seed_from_u64(1);
        let tuning = Tuning::default().without_spawns();
        for _ in 0..10_000 {
            assert!(roll_spawn(&mut rng, &tuning).is_none());
        }
    }

    #[test]
    fn test_full_chance_always_spawns() {
        let mut rng = Pcg32::seed_from_u64(2);
        let tuning = Tuning {
            spawn_chance: 101,
            ..Tuning::default()
        };
        for _ in 0..1000 {
            assert!(roll_spawn(&mut rng, &tuning).is_some());
        }
    }

    #[test]
    fn test_spawn_rate_is_roughly_two_percent() {
        let mut rng = Pcg32::seed_from_u64(3);
        let tuning = Tuning::default();
        let spawns = (0..101_000)
            .filter(|_| roll_spawn(&mut rng, &tuning).is_some())
            .count();
        // Expected 2000 (2 of 101 outcomes)
        assert!((1700..2300).contains(&spawns), "spawns = {spawns}");
    }

    #[test]
    fn test_every_kind_appears() {
        let mut rng = Pcg32::seed_from_u64(4);
        let tuning = Tuning {
            spawn_chance: 101,
            ..Tuning::default()
        };
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            if let Some(kind) = roll_spawn(&mut rng, &tuning) {
                seen.insert(kind);
            }
        }
        assert_eq!(seen.len(), ObstacleKind::ALL.len());
    }

    #[test]
    fn test_spawned_obstacle_placement() {
        let tuning = Tuning {
            spawn_chance: 101,
            ..Tuning::default()
        };
        let mut state = GameState::new(5, 0, tuning);
        state.start();
        let a = spawn_obstacles(&mut state).unwrap();
        let b = spawn_obstacles(&mut state).unwrap();
        assert_ne!(a, b);
        assert_eq!(state.obstacles.len(), 2);
        assert_eq!(state.obstacles[0].x, 150.0);
        assert_eq!(state.obstacles[0].height, 20.0);
    }
}
