//! Avo Jump headless runner
//!
//! Drives the simulation without a renderer: an autopilot taps when an
//! obstacle gets close, each run is logged, and the last snapshot is printed
//! as JSON. Usage: `avo-jump [runs] [tuning.json]`
//!
//! `AVO_JUMP_HAPTICS=off|on|light|medium|strong` changes the saved haptics
//! preference before the first run.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use avo_jump::Tuning;
    use avo_jump::platform;

    platform::init_logging();
    log::info!("Avo Jump (headless) starting...");

    let mut args = std::env::args().skip(1);
    let runs: u32 = args.next().and_then(|a| a.parse().ok()).unwrap_or(3);
    let tuning = match args.next() {
        Some(path) => load_tuning(&path),
        None => Tuning::default(),
    };

    let mut game = platform::new_game(tuning);
    if let Ok(value) = std::env::var("AVO_JUMP_HAPTICS") {
        let mut settings = game.settings().clone();
        if settings.apply_haptics_option(&value) {
            platform::change_settings(&mut game, settings);
        } else {
            log::warn!("Unknown AVO_JUMP_HAPTICS value {value:?}, keeping {}", settings.describe());
        }
    }
    for run in 1..=runs {
        game.start();
        let mut steps: u64 = 0;
        while game.step() {
            if autopilot_wants_tap(game.state()) {
                game.tap();
            }
            steps += 1;
            if steps >= MAX_STEPS_PER_RUN {
                log::info!("Run {run} hit the step limit, quitting");
                game.quit();
                break;
            }
        }
        let snap = game.snapshot();
        log::info!(
            "Run {run}: score {} (high {}) after {} steps",
            snap.score,
            snap.high_score,
            steps
        );
    }

    match serde_json::to_string_pretty(&game.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(e) => log::warn!("Failed to encode snapshot: {e}"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM hosts embed the library directly, this is just to satisfy the compiler
}

/// Ten minutes of play at 50 Hz
#[cfg(not(target_arch = "wasm32"))]
const MAX_STEPS_PER_RUN: u64 = 30_000;

#[cfg(not(target_arch = "wasm32"))]
fn load_tuning(path: &str) -> avo_jump::Tuning {
    let parsed = std::fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|json| avo_jump::Tuning::from_json(&json).map_err(|e| e.to_string()));
    match parsed {
        Ok(tuning) => {
            log::info!("Loaded tuning from {path}");
            tuning
        }
        Err(e) => {
            log::warn!("Bad tuning file {path} ({e}), using defaults");
            avo_jump::Tuning::default()
        }
    }
}

/// Jump when the nearest incoming obstacle is just outside the hitbox; use
/// the double jump if the first one is coming down on top of it.
#[cfg(not(target_arch = "wasm32"))]
fn autopilot_wants_tap(state: &avo_jump::sim::GameState) -> bool {
    if state.phase != avo_jump::sim::RunPhase::Playing {
        return false;
    }
    let t = &state.tuning;
    // Lead by a couple of ticks so the player is clear when it arrives
    let lead = t.collision_radius + state.obstacle_speed * 3.0;
    let nearest = state
        .obstacles
        .iter()
        .map(|o| o.x - t.player_anchor_x)
        .filter(|dx| *dx > -t.collision_radius)
        .fold(f32::INFINITY, f32::min);

    let player = &state.player;
    if !player.is_jumping {
        return nearest <= lead;
    }
    let falling_into_it = player.velocity > 0.0 && player.offset > t.clearance_offset * 2.0;
    player.can_double_jump && falling_into_it && nearest.abs() < t.collision_radius * 2.0
}
