//! Aggregator: the single consumer of the result sink.

use crate::action::Outcome;
use crate::metrics::RunStatistics;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::info;

/// Drains outcomes into [`RunStatistics`].
///
/// This is the only writer of the statistics, so no locking is involved.
/// A progress line is logged at every 10% of the expected total.
pub struct Aggregator {
    expected: u64,
    milestone: u64,
    stats: RunStatistics,
}

impl Aggregator {
    pub fn new(expected: u64) -> Self {
        let milestone = if expected >= 10 { expected / 10 } else { 1 };
        Self {
            expected,
            milestone,
            stats: RunStatistics::default(),
        }
    }

    /// Record one outcome and report progress on milestones.
    pub fn consume(&mut self, outcome: Outcome) {
        self.stats.record(outcome);

        let completed = self.stats.completed();
        if self.expected > 0 && completed % self.milestone == 0 {
            info!(
                "Progress: {}/{} ({:.0}%)",
                completed,
                self.expected,
                completed as f64 / self.expected as f64 * 100.0
            );
        }
    }

    /// Drain `results` until every sender is gone, then stamp the elapsed time
    /// measured from `started`.
    pub async fn drain(
        mut self,
        results: &mut mpsc::Receiver<Outcome>,
        started: Instant,
    ) -> RunStatistics {
        while let Some(outcome) = results.recv().await {
            self.consume(outcome);
        }
        self.finish(started)
    }

    pub fn finish(mut self, started: Instant) -> RunStatistics {
        self.stats.elapsed = started.elapsed();
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_drain_until_closed() {
        let (tx, mut rx) = mpsc::channel(16);
        let started = Instant::now();

        tokio::spawn(async move {
            for i in 0..12 {
                let outcome = if i % 4 == 0 {
                    Outcome::Failure
                } else {
                    Outcome::Success("[HR] Dept Roster")
                };
                tx.send(outcome).await.unwrap();
            }
        });

        let stats = Aggregator::new(12).drain(&mut rx, started).await;

        assert_eq!(stats.success, 9);
        assert_eq!(stats.failure, 3);
        assert_eq!(stats.per_label["[HR] Dept Roster"], 9);
    }

    #[tokio::test]
    async fn test_drain_empty_sink() {
        let (tx, mut rx) = mpsc::channel::<Outcome>(1);
        drop(tx);

        let stats = Aggregator::new(0).drain(&mut rx, Instant::now()).await;

        assert_eq!(stats.completed(), 0);
        assert!(stats.per_label.is_empty());
        assert!(stats.throughput().is_finite());
    }

    #[test]
    fn test_small_totals_use_unit_milestone() {
        assert_eq!(Aggregator::new(3).milestone, 1);
        assert_eq!(Aggregator::new(0).milestone, 1);
        assert_eq!(Aggregator::new(250).milestone, 25);
    }
}
