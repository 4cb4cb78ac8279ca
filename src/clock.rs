//! Fixed-period simulation clock
//!
//! Converts wall-clock frame time into a whole number of simulation steps.
//! Simulation time only moves forward while the clock is running and only in
//! whole periods, so deferred tasks land on exact step boundaries.

use std::time::Duration;

use crate::consts::{MAX_FRAME_MS, MAX_SUBSTEPS, TICK_MS};

pub struct SimulationClock {
    /// Length of one simulation step
    period: Duration,
    /// Total simulated time (never reset, spans runs)
    now: Duration,
    /// Real time not yet consumed by a step
    accumulator: Duration,
    running: bool,
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(Duration::from_millis(TICK_MS))
    }
}

impl SimulationClock {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            now: Duration::ZERO,
            accumulator: Duration::ZERO,
            running: false,
        }
    }

    /// Start (or restart) ticking. Leftover frame time is discarded.
    pub fn start(&mut self) {
        self.running = true;
        self.accumulator = Duration::ZERO;
    }

    /// Stop ticking. Returns false if the clock was already stopped.
    pub fn stop(&mut self) -> bool {
        let was_running = self.running;
        self.running = false;
        self.accumulator = Duration::ZERO;
        was_running
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    /// Feed elapsed real time. Returns how many steps are due, capped at
    /// `MAX_SUBSTEPS`; time beyond the cap is dropped.
    pub fn accumulate(&mut self, elapsed: Duration) -> u32 {
        if !self.running || self.period.is_zero() {
            return 0;
        }
        self.accumulator += elapsed.min(Duration::from_millis(MAX_FRAME_MS));

        let mut steps = 0;
        while self.accumulator >= self.period && steps < MAX_SUBSTEPS {
            self.accumulator -= self.period;
            steps += 1;
        }
        if steps == MAX_SUBSTEPS && self.accumulator >= self.period {
            log::debug!("Clock fell behind, dropping {:?}", self.accumulator);
            self.accumulator = Duration::ZERO;
        }
        steps
    }

    /// Move simulated time forward by one period
    pub fn advance_step(&mut self) -> Duration {
        self.now += self.period;
        self.now
    }
}
