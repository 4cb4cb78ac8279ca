//! Avo Jump - A single-lane tap-to-jump arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, game state)
//! - `clock`: Fixed-period simulation clock
//! - `game`: Composition root wiring the simulation to its collaborators
//! - `highscore`: Best-score persistence
//! - `haptics`: Jump/collision feedback signals
//! - `platform`: Browser/native platform defaults
//! - `tuning`: Data-driven game balance

pub mod clock;
pub mod game;
pub mod haptics;
pub mod highscore;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use clock::SimulationClock;
pub use game::Game;
pub use haptics::{Haptic, HapticNotifier};
pub use highscore::HighScoreStore;
pub use settings::{HapticStrength, Settings};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation period (50 Hz)
    pub const TICK_MS: u64 = 20;
    /// Maximum catch-up steps per advance to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Elapsed time beyond this is dropped (tab switch, debugger pause)
    pub const MAX_FRAME_MS: u64 = 250;
}
