//! Haptic feedback
//!
//! The simulation only asks for feedback; the platform decides what that
//! means. Implementations are chosen at composition time (see `platform`).

use crate::settings::HapticStrength;

/// Feedback signals the game requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Haptic {
    /// Player jumped (first or double)
    Jump,
    /// Player hit an obstacle
    Collision,
}

impl Haptic {
    /// Base vibration length in milliseconds
    pub fn base_duration_ms(&self) -> u32 {
        match self {
            Haptic::Jump => 15,
            Haptic::Collision => 120,
        }
    }

    /// Vibration length for a strength setting
    pub fn duration_ms(&self, strength: HapticStrength) -> u32 {
        (self.base_duration_ms() as f32 * strength.scale()).round() as u32
    }
}

/// Fire-and-forget feedback sink. Must never block the tick.
///
/// Strength comes with every signal so a settings change applies to the
/// very next one.
pub trait HapticNotifier {
    fn play(&mut self, haptic: Haptic, strength: HapticStrength);

    fn notify_jump(&mut self, strength: HapticStrength) {
        self.play(Haptic::Jump, strength);
    }

    fn notify_collision(&mut self, strength: HapticStrength) {
        self.play(Haptic::Collision, strength);
    }
}

/// Discards every signal
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotifier;

impl HapticNotifier for NullNotifier {
    fn play(&mut self, _haptic: Haptic, _strength: HapticStrength) {}
}

/// Logs signals (native hosts without a vibration motor)
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl HapticNotifier for LogNotifier {
    fn play(&mut self, haptic: Haptic, strength: HapticStrength) {
        log::debug!("haptic: {:?} ({} ms)", haptic, haptic.duration_ms(strength));
    }
}

/// Remembers every signal in order
#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    pub played: Vec<(Haptic, HapticStrength)>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, haptic: Haptic) -> usize {
        self.played.iter().filter(|(h, _)| *h == haptic).count()
    }
}

impl HapticNotifier for RecordingNotifier {
    fn play(&mut self, haptic: Haptic, strength: HapticStrength) {
        self.played.push((haptic, strength));
    }
}

/// Browser vibration via `navigator.vibrate`
#[cfg(target_arch = "wasm32")]
pub struct VibrationNotifier {
    navigator: Option<web_sys::Navigator>,
}

#[cfg(target_arch = "wasm32")]
impl VibrationNotifier {
    pub fn new() -> Self {
        let navigator = web_sys::window().map(|w| w.navigator());
        if navigator.is_none() {
            log::warn!("No window.navigator - haptics disabled");
        }
        Self { navigator }
    }
}

#[cfg(target_arch = "wasm32")]
impl Default for VibrationNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_arch = "wasm32")]
impl HapticNotifier for VibrationNotifier {
    fn play(&mut self, haptic: Haptic, strength: HapticStrength) {
        if let Some(navigator) = &self.navigator {
            // Returns false when the device can't vibrate; nothing to do then
            let _ = navigator.vibrate_with_duration(haptic.duration_ms(strength));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_durations_scale_with_strength() {
        assert_eq!(Haptic::Jump.duration_ms(HapticStrength::Medium), 15);
        assert_eq!(Haptic::Collision.duration_ms(HapticStrength::Light), 60);
        assert_eq!(Haptic::Collision.duration_ms(HapticStrength::Strong), 192);
        assert!(Haptic::Jump.base_duration_ms() < Haptic::Collision.base_duration_ms());
    }

    #[test]
    fn test_recording_notifier() {
        let mut n = RecordingNotifier::new();
        n.notify_jump(HapticStrength::Light);
        n.notify_jump(HapticStrength::Medium);
        n.notify_collision(HapticStrength::Strong);
        assert_eq!(n.count(Haptic::Jump), 2);
        assert_eq!(n.count(Haptic::Collision), 1);
        assert_eq!(
            n.played.last(),
            Some(&(Haptic::Collision, HapticStrength::Strong))
        );
    }
}
