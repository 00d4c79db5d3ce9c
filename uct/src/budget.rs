//! Budget controller for the search loop.
//!
//! Tracks iteration count and elapsed wall-clock time since a search began,
//! and decides when the loop stops. No state persists beyond one search
//! invocation.

use std::time::{Duration, Instant};

use crate::config::UctConfig;

/// Per-search budget tracker.
///
/// Also accumulates per-iteration timing for the diagnostics surface.
#[derive(Debug)]
pub struct SearchBudget {
    started: Instant,
    iteration_started: Instant,
    iterations: u32,
    total_iteration_time: Duration,
}

impl SearchBudget {
    /// Start tracking; call at the top of a search invocation.
    pub fn start() -> Self {
        let now = Instant::now();
        Self {
            started: now,
            iteration_started: now,
            iterations: 0,
            total_iteration_time: Duration::ZERO,
        }
    }

    /// Mark the beginning of one select/expand/simulate/backpropagate cycle.
    pub fn iteration_start(&mut self) {
        self.iteration_started = Instant::now();
    }

    /// Mark the end of one cycle, counting it against the iteration budget.
    pub fn iteration_end(&mut self) {
        self.iterations += 1;
        self.total_iteration_time += self.iteration_started.elapsed();
    }

    /// Iterations completed so far.
    #[inline]
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Wall-clock time since the search began.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// True once the iteration budget is reached. Only meaningful for a
    /// non-zero limit; 0 disables it.
    #[inline]
    pub fn iteration_limit_reached(&self, max_iterations: u32) -> bool {
        max_iterations > 0 && self.iterations >= max_iterations
    }

    /// True once the wall-clock budget is reached. Only meaningful for a
    /// non-zero limit; 0 disables it.
    #[inline]
    pub fn time_limit_reached(&self, max_time_millis: u64) -> bool {
        max_time_millis > 0 && self.elapsed() >= Duration::from_millis(max_time_millis)
    }

    /// True once either enabled limit is reached.
    pub fn exhausted(&self, config: &UctConfig) -> bool {
        self.iteration_limit_reached(config.max_iterations)
            || self.time_limit_reached(config.max_time_millis)
    }

    /// Timing diagnostics for the completed search.
    pub fn report(&self) -> BudgetReport {
        let avg_iteration = if self.iterations > 0 {
            self.total_iteration_time / self.iterations
        } else {
            Duration::ZERO
        };
        BudgetReport {
            iterations: self.iterations,
            elapsed: self.elapsed(),
            avg_iteration,
        }
    }
}

/// Timing statistics from one search invocation.
#[derive(Debug, Clone)]
pub struct BudgetReport {
    /// Total iterations executed
    pub iterations: u32,
    /// Wall-clock duration of the whole search
    pub elapsed: Duration,
    /// Average duration of one iteration
    pub avg_iteration: Duration,
}
