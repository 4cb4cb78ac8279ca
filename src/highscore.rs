//! High score persistence
//!
//! The simulation reads the best score once at startup and writes it back
//! only when a run beats it. Stores never fail loudly: an unreadable store
//! reads as 0 and a failed write is logged.

use serde::{Deserialize, Serialize};

/// Key-value style store for the best score
pub trait HighScoreStore {
    fn read(&self) -> u64;
    fn write(&mut self, score: u64);
}

/// On-disk / LocalStorage record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub high_score: u64,
}

/// In-memory store (tests, hosts without persistence)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: u64,
    writes: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_score(value: u64) -> Self {
        Self { value, writes: 0 }
    }

    /// Number of writes received
    pub fn writes(&self) -> u32 {
        self.writes
    }
}

impl HighScoreStore for MemoryStore {
    fn read(&self) -> u64 {
        self.value
    }

    fn write(&mut self, score: u64) {
        self.value = score;
        self.writes += 1;
    }
}

/// JSON file store (native)
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileStore {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl HighScoreStore for FileStore {
    fn read(&self) -> u64 {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) => {
                log::info!("No high score at {} ({e}), starting fresh", self.path.display());
                return 0;
            }
        };
        match serde_json::from_str::<HighScoreRecord>(&json) {
            Ok(record) => {
                log::info!("Loaded high score {}", record.high_score);
                record.high_score
            }
            Err(e) => {
                log::warn!("Corrupt high score file {}: {e}", self.path.display());
                0
            }
        }
    }

    fn write(&mut self, score: u64) {
        let record = HighScoreRecord { high_score: score };
        let json = match serde_json::to_string(&record) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Failed to encode high score: {e}");
                return;
            }
        };
        match std::fs::write(&self.path, json) {
            Ok(()) => log::info!("High score {} saved", score),
            Err(e) => log::warn!("Failed to save high score to {}: {e}", self.path.display()),
        }
    }
}

/// Browser LocalStorage store (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    const STORAGE_KEY: &'static str = "avo_jump_high_score";

    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl HighScoreStore for LocalStorageStore {
    fn read(&self) -> u64 {
        if let Some(storage) = Self::storage() {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(record) = serde_json::from_str::<HighScoreRecord>(&json) {
                    log::info!("Loaded high score {}", record.high_score);
                    return record.high_score;
                }
            }
        }

        log::info!("No high score found, starting fresh");
        0
    }

    fn write(&mut self, score: u64) {
        if let Some(storage) = Self::storage() {
            if let Ok(json) = serde_json::to_string(&HighScoreRecord { high_score: score }) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("High score {} saved", score);
            }
        }
    }
}
