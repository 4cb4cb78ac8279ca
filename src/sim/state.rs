//! Game state and core simulation types
//!
//! Everything a run mutates lives here. The view layer only ever sees a
//! [`Snapshot`].

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunPhase {
    /// Start screen, no run active
    #[default]
    Idle,
    /// Active gameplay
    Playing,
    /// Impact pause: world frozen, game over pending
    Collided,
    /// Run ended
    GameOver,
}

/// Which impulse a jump applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JumpKind {
    First,
    Double,
}

/// The player character. Only moves vertically.
///
/// Offsets grow downward: 0 is the ground, negative values are in the air.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Height above the baseline (<= 0)
    pub offset: f32,
    /// Vertical velocity (negative = rising)
    pub velocity: f32,
    pub is_jumping: bool,
    pub can_double_jump: bool,
    pub has_double_jumped: bool,
}

impl Player {
    /// Apply a jump impulse if one is available this airborne period
    pub fn jump(&mut self, tuning: &Tuning) -> Option<JumpKind> {
        if !self.is_jumping {
            self.is_jumping = true;
            self.can_double_jump = true;
            self.has_double_jumped = false;
            self.velocity = tuning.jump_impulse;
            Some(JumpKind::First)
        } else if self.can_double_jump && !self.has_double_jumped {
            self.has_double_jumped = true;
            self.can_double_jump = false;
            self.velocity = tuning.double_jump_impulse;
            Some(JumpKind::Double)
        } else {
            None
        }
    }

    /// Semi-implicit Euler step. Returns true on the tick the player lands.
    pub fn integrate(&mut self, gravity: f32) -> bool {
        if !self.is_jumping {
            return false;
        }
        self.offset += self.velocity;
        self.velocity += gravity;

        if self.offset >= 0.0 {
            self.land();
            return true;
        }
        false
    }

    fn land(&mut self) {
        self.offset = 0.0;
        self.velocity = 0.0;
        self.is_jumping = false;
        self.can_double_jump = false;
        self.has_double_jumped = false;
    }
}

/// Obstacle categories. Purely cosmetic, all share one hitbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    Cado,
    Tomato,
    Lemon,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 3] = [ObstacleKind::Cado, ObstacleKind::Tomato, ObstacleKind::Lemon];

    pub fn as_str(&self) -> &'static str {
        match self {
            ObstacleKind::Cado => "cado",
            ObstacleKind::Tomato => "tomato",
            ObstacleKind::Lemon => "lemon",
        }
    }
}

/// An obstacle scrolling toward the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u64,
    /// Horizontal position (decreases as it scrolls left)
    pub x: f32,
    pub height: f32,
    pub kind: ObstacleKind,
}

/// Things that happened during a tick or input, drained by the driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A jump impulse was applied
    Jumped(JumpKind),
    /// Obstacle speed crossed a score milestone
    SpeedUp { speed: f32 },
    /// First overlap of the run; game over should follow after the delay
    Collided { run_id: u64, obstacle_id: u64 },
    /// The run ended
    GameOver { score: u64, new_high_score: bool },
}

/// Read-only view handed to the renderer each frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: RunPhase,
    pub player_offset: f32,
    pub player_collided: bool,
    pub obstacles: Vec<Obstacle>,
    pub score: u64,
    pub high_score: u64,
    pub obstacle_speed: f32,
    pub is_playing: bool,
    pub is_game_over: bool,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Balance constants for this game
    pub tuning: Tuning,
    pub phase: RunPhase,
    /// Generation counter, bumped by every start/abandon
    pub run_id: u64,
    pub player: Player,
    /// Live obstacles, oldest first
    pub obstacles: Vec<Obstacle>,
    pub score: u64,
    /// Best score across runs (owned by the store, mirrored here)
    pub high_score: u64,
    pub obstacle_speed: f32,
    /// Ticks simulated in the current run
    pub time_ticks: u64,
    /// Seed the RNG was created from
    pub seed: u64,
    pub(super) rng: Pcg32,
    next_id: u64,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create an idle game. Call [`GameState::start`] to begin a run.
    pub fn new(seed: u64, high_score: u64, tuning: Tuning) -> Self {
        let obstacle_speed = tuning.base_speed;
        Self {
            tuning,
            phase: RunPhase::Idle,
            run_id: 0,
            player: Player::default(),
            obstacles: Vec::new(),
            score: 0,
            high_score,
            obstacle_speed,
            time_ticks: 0,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            events: Vec::new(),
        }
    }

    /// Begin a fresh run, discarding any run in progress
    pub fn start(&mut self) {
        self.run_id += 1;
        self.phase = RunPhase::Playing;
        self.player = Player::default();
        self.obstacles.clear();
        self.score = 0;
        self.obstacle_speed = self.tuning.base_speed;
        self.time_ticks = 0;
        log::info!("Run {} started (high score {})", self.run_id, self.high_score);
    }

    /// Return to the start screen without finishing the run
    pub fn abandon(&mut self) {
        if self.phase == RunPhase::Idle {
            return;
        }
        log::info!("Run {} abandoned at score {}", self.run_id, self.score);
        self.run_id += 1;
        self.phase = RunPhase::Idle;
        self.player = Player::default();
        self.obstacles.clear();
    }

    /// Handle a tap. Ignored unless a run is active and not over.
    pub fn jump(&mut self) -> bool {
        if !self.is_playing() || self.is_game_over() {
            return false;
        }
        match self.player.jump(&self.tuning) {
            Some(kind) => {
                self.events.push(GameEvent::Jumped(kind));
                true
            }
            None => false,
        }
    }

    /// Enter the impact pause. Only the first overlap of a run counts.
    pub fn register_collision(&mut self, obstacle_id: u64) -> bool {
        if self.phase != RunPhase::Playing {
            return false;
        }
        self.phase = RunPhase::Collided;
        log::debug!(
            "Run {} collided with obstacle {} at score {}",
            self.run_id,
            obstacle_id,
            self.score
        );
        self.events.push(GameEvent::Collided {
            run_id: self.run_id,
            obstacle_id,
        });
        true
    }

    /// Deferred end of the impact pause. Stale requests from an earlier run
    /// are ignored.
    pub fn finish_run(&mut self, run_id: u64) -> bool {
        if run_id != self.run_id || self.phase != RunPhase::Collided {
            log::debug!("Ignoring stale game over for run {run_id} (current {})", self.run_id);
            return false;
        }
        self.phase = RunPhase::GameOver;

        let new_high_score = self.score > self.high_score;
        if new_high_score {
            self.high_score = self.score;
        }
        log::info!(
            "Run {} over: score {}{}",
            self.run_id,
            self.score,
            if new_high_score { " (new high score!)" } else { "" }
        );
        self.events.push(GameEvent::GameOver {
            score: self.score,
            new_high_score,
        });
        true
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Queue an event for the driver
    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// A run has been started and not abandoned (stays true through game over)
    pub fn is_playing(&self) -> bool {
        self.phase != RunPhase::Idle
    }

    pub fn is_collided(&self) -> bool {
        matches!(self.phase, RunPhase::Collided | RunPhase::GameOver)
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == RunPhase::GameOver
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            player_offset: self.player.offset,
            player_collided: self.is_collided(),
            obstacles: self.obstacles.clone(),
            score: self.score,
            high_score: self.high_score,
            obstacle_speed: self.obstacle_speed,
            is_playing: self.is_playing(),
            is_game_over: self.is_game_over(),
        }
    }
}
