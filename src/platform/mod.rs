//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Logger setup
//! - Run seeds
//! - High score and settings storage (LocalStorage on web, JSON files on native)
//! - Haptics (navigator.vibrate on web, log on native)
//!
//! This is the only place the simulation's collaborators are picked per
//! target; the rest of the crate is platform-agnostic.

use crate::game::Game;
use crate::haptics::HapticNotifier;
use crate::highscore::HighScoreStore;
use crate::settings::Settings;
use crate::tuning::Tuning;

#[cfg(not(target_arch = "wasm32"))]
pub type PlatformStore = crate::highscore::FileStore;
#[cfg(target_arch = "wasm32")]
pub type PlatformStore = crate::highscore::LocalStorageStore;

#[cfg(not(target_arch = "wasm32"))]
pub type PlatformNotifier = crate::haptics::LogNotifier;
#[cfg(target_arch = "wasm32")]
pub type PlatformNotifier = crate::haptics::VibrationNotifier;

/// Default high score file name (native)
#[cfg(not(target_arch = "wasm32"))]
pub const HIGH_SCORE_FILE: &str = "avo_jump_highscore.json";

/// Settings file name (native)
#[cfg(not(target_arch = "wasm32"))]
pub const SETTINGS_FILE: &str = "avo_jump_settings.json";

/// Install the logger. Safe to call more than once.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Seed for a new game from the wall clock
#[cfg(not(target_arch = "wasm32"))]
pub fn default_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(target_arch = "wasm32")]
pub fn default_seed() -> u64 {
    js_sys::Date::now() as u64
}

/// Directory for saved files (native). `AVO_JUMP_DATA` overrides the default `.`
#[cfg(not(target_arch = "wasm32"))]
pub fn data_dir() -> std::path::PathBuf {
    std::env::var_os("AVO_JUMP_DATA")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|| std::path::PathBuf::from("."))
}

/// High score store for this target
#[cfg(not(target_arch = "wasm32"))]
pub fn default_store() -> PlatformStore {
    crate::highscore::FileStore::new(data_dir().join(HIGH_SCORE_FILE))
}

#[cfg(target_arch = "wasm32")]
pub fn default_store() -> PlatformStore {
    crate::highscore::LocalStorageStore::new()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn default_notifier() -> PlatformNotifier {
    crate::haptics::LogNotifier
}

#[cfg(target_arch = "wasm32")]
pub fn default_notifier() -> PlatformNotifier {
    crate::haptics::VibrationNotifier::new()
}

/// Build a game wired to this platform's store, notifier and saved settings
pub fn new_game(tuning: Tuning) -> Game<PlatformStore, PlatformNotifier> {
    let settings = Settings::load();
    Game::new(default_store(), default_notifier(), tuning, default_seed()).with_settings(settings)
}

/// Apply new preferences to a running game and remember them for next time
pub fn change_settings<S: HighScoreStore, N: HapticNotifier>(
    game: &mut Game<S, N>,
    settings: Settings,
) {
    log::info!("Settings changed: {}", settings.describe());
    settings.save();
    game.set_settings(settings);
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::haptics::{Haptic, RecordingNotifier};
    use crate::highscore::MemoryStore;
    use crate::settings::HapticStrength;

    #[test]
    fn test_default_store_file_name() {
        let store = default_store();
        assert!(store.path().ends_with(HIGH_SCORE_FILE));
    }

    #[test]
    fn test_seed_is_nonzero() {
        assert!(default_seed() > 0);
    }

    #[test]
    fn test_init_logging_twice() {
        init_logging();
        init_logging();
    }

    #[test]
    fn test_native_notifier_accepts_signals() {
        let mut n = default_notifier();
        n.notify_jump(HapticStrength::Light);
        // FileStore trait is usable through the alias
        let store: PlatformStore = crate::highscore::FileStore::new(
            std::env::temp_dir().join(format!("avo_jump_platform_{}.json", std::process::id())),
        );
        assert_eq!(store.read(), 0);
    }

    #[test]
    fn test_change_settings_persists_and_applies() {
        let dir = std::env::temp_dir().join(format!("avo_jump_data_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        // SAFETY: only this test touches AVO_JUMP_DATA
        unsafe { std::env::set_var("AVO_JUMP_DATA", &dir) };

        let mut game = Game::new(
            MemoryStore::new(),
            RecordingNotifier::new(),
            Tuning::default().without_spawns(),
            1,
        );
        let mut settings = game.settings().clone();
        assert!(settings.apply_haptics_option("light"));
        change_settings(&mut game, settings.clone());

        assert_eq!(Settings::load(), settings);
        game.start();
        game.tap();
        assert_eq!(
            game.notifier().played,
            vec![(Haptic::Jump, HapticStrength::Light)]
        );

        unsafe { std::env::remove_var("AVO_JUMP_DATA") };
        let _ = std::fs::remove_dir_all(&dir);
    }
}
