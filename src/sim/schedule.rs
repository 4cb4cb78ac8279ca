//! Deferred tasks keyed to a run generation
//!
//! A task carries the `run_id` it was scheduled for. Starting a new run
//! clears the queue, and the state re-checks the generation when a task
//! fires, so a stale task can never act on a newer run.

use std::time::Duration;

/// What to do when a task comes due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    /// End the impact pause
    GameOver,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledTask {
    /// Simulation time the task becomes due
    pub due: Duration,
    pub run_id: u64,
    pub action: Deferred,
}

/// Pending deferred tasks, fired in due order
#[derive(Debug, Default)]
pub struct Scheduler {
    tasks: Vec<ScheduledTask>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    pub fn schedule(&mut self, due: Duration, run_id: u64, action: Deferred) {
        self.tasks.push(ScheduledTask { due, run_id, action });
    }

    /// Remove and return every task due at or before `now`, earliest first
    pub fn take_due(&mut self, now: Duration) -> Vec<ScheduledTask> {
        let (mut due, pending): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.tasks).into_iter().partition(|t| t.due <= now);
        self.tasks = pending;
        due.sort_by_key(|t| t.due);
        due
    }

    /// Drop tasks belonging to a run. Returns how many were dropped.
    pub fn cancel_run(&mut self, run_id: u64) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.run_id != run_id);
        before - self.tasks.len()
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
