//! Run statistics collected by the aggregator.

use crate::action::Outcome;
use std::collections::HashMap;
use std::time::Duration;

/// Final tally of one run.
///
/// Accumulation is commutative, so the order in which outcomes arrive does
/// not matter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunStatistics {
    /// Number of successful actions.
    pub success: u64,
    /// Number of failed actions.
    pub failure: u64,
    /// Successful actions per label.
    pub per_label: HashMap<&'static str, u64>,
    /// Wall-clock time from the first token to the end of the drain.
    pub elapsed: Duration,
}

impl RunStatistics {
    /// Record one outcome.
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Success(label) => {
                self.success += 1;
                *self.per_label.entry(label).or_insert(0) += 1;
            }
            Outcome::Failure => self.failure += 1,
        }
    }

    /// Total outcomes seen.
    pub fn completed(&self) -> u64 {
        self.success + self.failure
    }

    /// Sum of the per-label counts; always equal to `success`.
    pub fn label_total(&self) -> u64 {
        self.per_label.values().sum()
    }

    /// Completed actions per second.
    ///
    /// Returns 0.0 when no time has elapsed rather than dividing by zero.
    pub fn throughput(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.completed() as f64 / secs
        } else {
            0.0
        }
    }

    /// Fraction of completed actions that failed (0.0 for an empty run).
    pub fn error_rate(&self) -> f64 {
        match self.completed() {
            0 => 0.0,
            n => self.failure as f64 / n as f64,
        }
    }

    /// Per-label counts, highest first. Ties are ordered by label.
    pub fn distribution(&self) -> Vec<(&'static str, u64)> {
        let mut entries: Vec<_> = self.per_label.iter().map(|(k, v)| (*k, *v)).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }
}
