//! Player preferences
//!
//! Persisted separately from the high score: LocalStorage on web, a JSON
//! file next to the high score on native.

use serde::{Deserialize, Serialize};

/// Haptic strength levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum HapticStrength {
    Light,
    #[default]
    Medium,
    Strong,
}

impl HapticStrength {
    pub fn as_str(&self) -> &'static str {
        match self {
            HapticStrength::Light => "Light",
            HapticStrength::Medium => "Medium",
            HapticStrength::Strong => "Strong",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "light" => Some(HapticStrength::Light),
            "medium" | "med" => Some(HapticStrength::Medium),
            "strong" | "heavy" => Some(HapticStrength::Strong),
            _ => None,
        }
    }

    /// Vibration length multiplier (1.0 = medium)
    pub fn scale(&self) -> f32 {
        match self {
            HapticStrength::Light => 0.5,
            HapticStrength::Medium => 1.0,
            HapticStrength::Strong => 1.6,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Vibrate on jump and collision
    pub haptics: bool,
    pub haptic_strength: HapticStrength,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            haptics: true,
            haptic_strength: HapticStrength::Medium,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "avo_jump_settings";

    /// Parse saved settings; unknown or missing fields take their default
    pub fn from_json(json: &str) -> Option<Self> {
        match serde_json::from_str(json) {
            Ok(settings) => Some(settings),
            Err(e) => {
                log::warn!("Ignoring corrupt settings: {e}");
                None
            }
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Apply a haptics preference such as `off`, `on` or a strength name.
    /// Returns false if the value isn't recognised.
    pub fn apply_haptics_option(&mut self, value: &str) -> bool {
        match value.to_lowercase().as_str() {
            "off" | "none" => self.haptics = false,
            "on" => self.haptics = true,
            other => match HapticStrength::from_str(other) {
                Some(strength) => {
                    self.haptics = true;
                    self.haptic_strength = strength;
                }
                None => return false,
            },
        }
        true
    }

    /// Short human-readable summary for logs and menus
    pub fn describe(&self) -> String {
        if self.haptics {
            format!("haptics {}", self.haptic_strength.as_str())
        } else {
            "haptics off".to_string()
        }
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let saved = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .and_then(|storage| storage.get_item(Self::STORAGE_KEY).ok().flatten())
            .and_then(|json| Self::from_json(&json));

        match saved {
            Some(settings) => {
                log::info!("Loaded settings from LocalStorage ({})", settings.describe());
                settings
            }
            None => Self::default(),
        }
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        match storage {
            Some(storage) => {
                if storage.set_item(Self::STORAGE_KEY, &self.to_json()).is_err() {
                    log::warn!("Failed to save settings");
                }
            }
            None => log::warn!("No LocalStorage, settings not saved"),
        }
    }

    /// Load settings from the platform data directory (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::load_from(&crate::platform::data_dir().join(crate::platform::SETTINGS_FILE))
    }

    /// Save settings to the platform data directory (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        self.save_to(&crate::platform::data_dir().join(crate::platform::SETTINGS_FILE));
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Self {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|json| Self::from_json(&json))
            .unwrap_or_default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: &std::path::Path) {
        match std::fs::write(path, self.to_json()) {
            Ok(()) => log::info!("Settings saved ({})", self.describe()),
            Err(e) => log::warn!("Failed to save settings to {}: {e}", path.display()),
        }
    }
}
