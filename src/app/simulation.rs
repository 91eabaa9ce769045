use std::time::{Duration, Instant};

use crate::constants::{DEMO_RESET_COUNTS, TIME_SETTINGS};

use super::{App, COMPLETED, IN_PROGRESS, LATE, NOT_STARTED};

impl App {
    pub(super) fn tick_simulation(&mut self) {
        if self.paused {
            return;
        }
        if self.started_at.elapsed() < Duration::from_millis(TIME_SETTINGS.warmup_ms) {
            return;
        }

        if self.last_not_started.elapsed() >= Duration::from_millis(TIME_SETTINGS.not_started_ms) {
            self.transfer(NOT_STARTED, IN_PROGRESS);
            self.last_not_started = Instant::now();
        }

        if self.last_in_progress.elapsed() >= Duration::from_millis(TIME_SETTINGS.in_progress_ms) {
            self.transfer(IN_PROGRESS, COMPLETED);
            self.last_in_progress = Instant::now();
        }

        if self.last_late.elapsed() >= Duration::from_millis(TIME_SETTINGS.late_ms) {
            self.transfer(LATE, COMPLETED);
            self.last_late = Instant::now();
        }
    }

    // Moves one task from one bucket to the next. An empty source bucket is
    // the cue to check whether the whole board is done.
    fn transfer(&mut self, from: usize, to: usize) {
        let available = self
            .pie
            .get_category(from)
            .ok()
            .and_then(|c| c.count)
            .unwrap_or(0.0);

        if available < 1.0 {
            self.reset_if_all_done();
            return;
        }

        let _ = self.pie.edit(|p| {
            p.decrease(from, 1.0)?;
            p.increase(to, 1.0)
        });
    }

    pub(super) fn reset_if_all_done(&mut self) {
        if self.pie.total_left().unwrap_or(0.0) > 0.0 {
            return;
        }
        self.reset_counts();
    }

    pub(super) fn reset_counts(&mut self) {
        let counts: Vec<Option<f64>> = DEMO_RESET_COUNTS.iter().map(|c| Some(*c)).collect();
        let _ = self.pie.edit(|p| p.set_counts(&counts));
    }
}
