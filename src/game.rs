//! Game driver
//!
//! Owns one [`GameState`] plus everything around it: the clock that ticks it,
//! the deferred game-over task, the high score store, the haptic notifier and
//! the snapshot observers. Hosts feed it taps and elapsed time.

use std::ops::ControlFlow;
use std::time::Duration;

use crate::clock::SimulationClock;
use crate::haptics::HapticNotifier;
use crate::highscore::HighScoreStore;
use crate::settings::Settings;
use crate::sim::{Deferred, GameEvent, GameState, ScheduledTask, Scheduler, Snapshot, tick};
use crate::tuning::Tuning;

type Observer = Box<dyn FnMut(&Snapshot)>;

pub struct Game<S: HighScoreStore, N: HapticNotifier> {
    state: GameState,
    clock: SimulationClock,
    scheduler: Scheduler,
    store: S,
    notifier: N,
    settings: Settings,
    observers: Vec<Observer>,
}

impl<S: HighScoreStore, N: HapticNotifier> Game<S, N> {
    /// Create an idle game. The store is read once, here.
    pub fn new(store: S, notifier: N, tuning: Tuning, seed: u64) -> Self {
        let high_score = store.read();
        Self {
            state: GameState::new(seed, high_score, tuning),
            clock: SimulationClock::default(),
            scheduler: Scheduler::new(),
            store,
            notifier,
            settings: Settings::default(),
            observers: Vec::new(),
        }
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Start a run, discarding any run in progress
    pub fn start(&mut self) {
        // A pending game over belongs to the run being discarded
        if !self.scheduler.is_empty() {
            log::debug!("Discarding {} pending task(s)", self.scheduler.len());
            self.scheduler.clear();
        }
        self.state.start();
        self.state.drain_events();
        self.clock.start();
        self.publish();
    }

    /// Tap input. Returns true if it produced a jump.
    pub fn tap(&mut self) -> bool {
        let jumped = self.state.jump();
        self.dispatch_events();
        if jumped {
            self.publish();
        }
        jumped
    }

    /// Leave the run (back to the start screen) and stop the clock
    pub fn quit(&mut self) {
        self.scheduler.cancel_run(self.state.run_id);
        self.state.abandon();
        self.state.drain_events();
        if self.clock.stop() {
            log::debug!("Clock stopped on quit");
        }
        self.publish();
    }

    /// Feed elapsed real time. Returns the number of steps run.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        let due = self.clock.accumulate(elapsed);
        let mut ran = 0;
        for _ in 0..due {
            if !self.step() {
                break;
            }
            ran += 1;
        }
        ran
    }

    /// Run exactly one clock period. Returns false if the clock is stopped.
    pub fn step(&mut self) -> bool {
        if !self.clock.is_running() {
            return false;
        }
        self.clock.advance_step();
        self.settle();

        let flow = tick(&mut self.state);
        match flow {
            ControlFlow::Break(()) => {
                self.clock.stop();
                log::debug!("Clock stopped at {:?}", self.clock.now());
            }
            ControlFlow::Continue(()) => self.settle(),
        }
        self.publish();
        flow.is_continue()
    }

    /// Register a callback that receives a snapshot after every change
    pub fn subscribe(&mut self, observer: impl FnMut(&Snapshot) + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable access for scripted scenarios and tools
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Takes effect from the next signal on
    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    /// Number of deferred tasks waiting to fire
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.len()
    }

    /// Handle queued events and fire due tasks until nothing is left
    fn settle(&mut self) {
        loop {
            self.dispatch_events();
            let due = self.scheduler.take_due(self.clock.now());
            if due.is_empty() {
                break;
            }
            for task in due {
                self.run_task(task);
            }
        }
    }

    fn run_task(&mut self, task: ScheduledTask) {
        match task.action {
            Deferred::GameOver => {
                self.state.finish_run(task.run_id);
            }
        }
    }

    fn dispatch_events(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::Jumped(_) => {
                    if self.settings.haptics {
                        self.notifier.notify_jump(self.settings.haptic_strength);
                    }
                }
                GameEvent::Collided { run_id, .. } => {
                    if self.settings.haptics {
                        self.notifier.notify_collision(self.settings.haptic_strength);
                    }
                    let delay = Duration::from_millis(self.state.tuning.game_over_delay_ms);
                    self.scheduler
                        .schedule(self.clock.now() + delay, run_id, Deferred::GameOver);
                }
                GameEvent::GameOver {
                    score,
                    new_high_score,
                } => {
                    if new_high_score {
                        self.store.write(score);
                    }
                }
                GameEvent::SpeedUp { .. } => {}
            }
        }
    }

    fn publish(&mut self) {
        if self.observers.is_empty() {
            return;
        }
        let snapshot = self.state.snapshot();
        for observer in &mut self.observers {
            observer(&snapshot);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::haptics::{Haptic, RecordingNotifier};
    use crate::highscore::MemoryStore;
    use crate::settings::HapticStrength;
    use crate::sim::{Obstacle, ObstacleKind, RunPhase};

    type TestGame = Game<MemoryStore, RecordingNotifier>;

    fn quiet_game(high_score: u64) -> TestGame {
        Game::new(
            MemoryStore::with_score(high_score),
            RecordingNotifier::new(),
            Tuning::default().without_spawns(),
            42,
        )
    }

    fn place(game: &mut TestGame, x: f32) {
        let state = game.state_mut();
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id,
            x,
            height: 20.0,
            kind: ObstacleKind::Cado,
        });
    }

    #[test]
    fn test_new_reads_store() {
        let game = quiet_game(77);
        assert_eq!(game.state().high_score, 77);
        assert_eq!(game.state().phase, RunPhase::Idle);
        assert!(!game.clock().is_running());
    }

    #[test]
    fn test_step_requires_start() {
        let mut game = quiet_game(0);
        assert!(!game.step());
        assert_eq!(game.advance(Duration::from_millis(100)), 0);
        game.start();
        assert!(game.step());
        assert_eq!(game.state().score, 1);
    }

    #[test]
    fn test_advance_runs_whole_periods() {
        let mut game = quiet_game(0);
        game.start();
        assert_eq!(game.advance(Duration::from_millis(50)), 2);
        assert_eq!(game.advance(Duration::from_millis(10)), 1);
        assert_eq!(game.state().score, 3);
    }

    #[test]
    fn test_game_over_after_exact_delay() {
        let mut game = quiet_game(0);
        game.start();
        place(&mut game, 24.0);

        assert!(game.step());
        assert_eq!(game.state().phase, RunPhase::Collided);
        assert_eq!(game.pending_tasks(), 1);
        let score = game.state().score;

        // 300 ms / 20 ms = 15 steps; the 15th ends the run
        for _ in 0..14 {
            assert!(game.step());
            assert!(!game.state().is_game_over());
        }
        assert!(!game.step());
        assert!(game.state().is_game_over());
        assert!(!game.clock().is_running());
        assert_eq!(game.state().score, score);
        assert_eq!(game.pending_tasks(), 0);

        // Runaway ticks stay inert
        assert!(!game.step());
        assert!(game.state().is_game_over());
    }

    #[test]
    fn test_zero_delay_ends_on_next_step() {
        let mut game = Game::new(
            MemoryStore::new(),
            RecordingNotifier::new(),
            Tuning::classic().without_spawns(),
            1,
        );
        game.start();
        place(&mut game, 17.0);
        assert!(game.step());
        assert!(game.state().is_game_over());
        assert!(!game.step());
        assert!(!game.clock().is_running());
    }

    #[test]
    fn test_new_high_score_persisted() {
        let mut game = quiet_game(3);
        game.start();
        for _ in 0..9 {
            game.step();
        }
        place(&mut game, 23.0);
        game.step();
        game.advance(Duration::from_millis(200));
        game.advance(Duration::from_millis(200));
        assert!(game.state().is_game_over());
        assert_eq!(game.state().high_score, 10);
        assert_eq!(game.store().read(), 10);
        assert_eq!(game.store().writes(), 1);
    }

    #[test]
    fn test_lower_score_not_persisted() {
        let mut game = quiet_game(500);
        game.start();
        place(&mut game, 23.0);
        for _ in 0..20 {
            game.step();
        }
        assert!(game.state().is_game_over());
        assert_eq!(game.state().high_score, 500);
        assert_eq!(game.store().writes(), 0);
    }

    #[test]
    fn test_restart_during_pause_drops_stale_game_over() {
        let mut game = quiet_game(0);
        game.start();
        for _ in 0..30 {
            game.step();
        }
        place(&mut game, 23.0);
        game.step();
        assert_eq!(game.state().phase, RunPhase::Collided);

        game.start();
        assert_eq!(game.pending_tasks(), 0);
        for _ in 0..40 {
            assert!(game.step());
        }
        assert_eq!(game.state().phase, RunPhase::Playing);
        assert_eq!(game.state().score, 40);
        assert_eq!(game.store().writes(), 0);
    }

    #[test]
    fn test_haptics_follow_events() {
        let mut game = quiet_game(0);
        game.start();
        assert!(game.tap());
        game.step();
        assert!(game.tap());
        assert!(!game.tap());
        assert_eq!(game.notifier().count(Haptic::Jump), 2);

        game.state_mut().player = Default::default();
        place(&mut game, 23.0);
        for _ in 0..20 {
            game.step();
        }
        assert_eq!(game.notifier().count(Haptic::Collision), 1);
    }

    #[test]
    fn test_haptics_disabled_by_settings() {
        let mut game = quiet_game(0).with_settings(Settings {
            haptics: false,
            ..Settings::default()
        });
        game.start();
        game.tap();
        assert!(game.notifier().played.is_empty());
        assert!(game.state().player.is_jumping);
    }

    #[test]
    fn test_strength_change_reaches_notifier() {
        let mut game = quiet_game(0);
        game.start();
        assert!(game.tap());
        game.step();
        game.set_settings(Settings {
            haptic_strength: HapticStrength::Strong,
            ..Settings::default()
        });
        assert!(game.tap());
        assert_eq!(
            game.notifier().played,
            vec![
                (Haptic::Jump, HapticStrength::Medium),
                (Haptic::Jump, HapticStrength::Strong),
            ]
        );
    }

    #[test]
    fn test_tap_ignored_when_not_playing() {
        let mut game = quiet_game(0);
        assert!(!game.tap());
        game.start();
        place(&mut game, 23.0);
        for _ in 0..20 {
            game.step();
        }
        assert!(game.state().is_game_over());
        assert!(!game.tap());
        assert!(game.notifier().played.iter().all(|(h, _)| *h == Haptic::Collision));
    }

    #[test]
    fn test_quit_stops_clock_and_pending() {
        let mut game = quiet_game(0);
        game.start();
        place(&mut game, 23.0);
        game.step();
        assert_eq!(game.pending_tasks(), 1);
        game.quit();
        assert!(!game.clock().is_running());
        assert_eq!(game.pending_tasks(), 0);
        assert_eq!(game.state().phase, RunPhase::Idle);
        assert!(!game.step());
    }

    #[test]
    fn test_observers_see_every_step() {
        let mut game = quiet_game(0);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        game.subscribe(move |snap: &Snapshot| sink.borrow_mut().push(snap.score));
        game.start();
        for _ in 0..3 {
            game.step();
        }
        assert_eq!(*seen.borrow(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_observers_see_game_over() {
        let mut game = quiet_game(0);
        let over = Rc::new(RefCell::new(false));
        let sink = Rc::clone(&over);
        game.subscribe(move |snap: &Snapshot| *sink.borrow_mut() = snap.is_game_over);
        game.start();
        place(&mut game, 23.0);
        while game.step() {}
        assert!(*over.borrow());
    }

    #[test]
    fn test_observers_see_jumps() {
        let mut game = quiet_game(0);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        game.subscribe(move |snap: &Snapshot| sink.borrow_mut().push(snap.player_offset));
        game.start();
        assert!(game.tap());
        game.step();
        assert!(game.tap());
        // Third tap in the same airborne period is ignored and not published
        assert!(!game.tap());
        // start, first tap, step, second tap
        assert_eq!(seen.borrow().len(), 4);
        assert!(seen.borrow()[2] < 0.0);
    }
}
