//! Job feed: a finite stream of work tokens shared by all workers.

use std::sync::Arc;
use tokio::sync::{mpsc, watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// One unit of requested work. The sequence number is informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobToken(pub u64);

/// Receiving end of the job feed, cloneable across workers.
///
/// The receiver sits behind a mutex so each token is handed to exactly one
/// worker. `next` returns `None` once the feed is closed and drained.
#[derive(Clone)]
pub struct JobQueue {
    rx: Arc<Mutex<mpsc::Receiver<JobToken>>>,
}

impl JobQueue {
    pub fn new(rx: mpsc::Receiver<JobToken>) -> Self {
        Self {
            rx: Arc::new(Mutex::new(rx)),
        }
    }

    /// Wait for the next token. Cancel safe.
    pub async fn next(&self) -> Option<JobToken> {
        self.rx.lock().await.recv().await
    }
}

/// Spawn the producer task that emits `total` tokens and then closes the feed.
///
/// `capacity` should be at least `total` so the producer never blocks. The
/// producer stops early if `shutdown` flips to `true`. The handle resolves to
/// the number of tokens actually emitted.
pub fn spawn_job_feed(
    total: u64,
    capacity: usize,
    shutdown: watch::Receiver<bool>,
) -> (JoinHandle<u64>, JobQueue) {
    let (tx, rx) = mpsc::channel(capacity);

    let handle = tokio::spawn(async move {
        let mut emitted = 0u64;
        for seq in 0..total {
            let stopping = *shutdown.borrow();
            if stopping {
                warn!("Job feed stopped early after {} of {} tokens", emitted, total);
                break;
            }
            if tx.send(JobToken(seq)).await.is_err() {
                // Every worker is gone
                break;
            }
            emitted += 1;
        }
        debug!("Job feed closed after {} tokens", emitted);
        emitted
    });

    (handle, JobQueue::new(rx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[tokio::test]
    async fn test_feed_emits_exactly_total() {
        let (_stop_tx, stop_rx) = watch::channel(false);
        let (handle, queue) = spawn_job_feed(25, 25, stop_rx);

        let mut seen = Vec::new();
        while let Some(token) = queue.next().await {
            seen.push(token.0);
        }

        assert_eq!(handle.await.unwrap(), 25);
        assert_eq!(seen, (0..25).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_feed_with_zero_total_closes_immediately() {
        let (_stop_tx, stop_rx) = watch::channel(false);
        let (handle, queue) = spawn_job_feed(0, 1, stop_rx);

        assert_eq!(queue.next().await, None);
        assert_eq!(handle.await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_tokens_split_between_consumers() {
        let (_stop_tx, stop_rx) = watch::channel(false);
        let (handle, queue) = spawn_job_feed(200, 200, stop_rx);

        let consumers: Vec<_> = (0..4)
            .map(|_| {
                let queue = queue.clone();
                tokio::spawn(async move {
                    let mut got = Vec::new();
                    while let Some(token) = queue.next().await {
                        got.push(token.0);
                    }
                    got
                })
            })
            .collect();

        let mut all = Vec::new();
        for consumer in consumers {
            all.extend(consumer.await.unwrap());
        }
        handle.await.unwrap();

        let unique: HashSet<u64> = all.iter().copied().collect();
        assert_eq!(all.len(), 200);
        assert_eq!(unique.len(), 200);
    }

    #[tokio::test]
    async fn test_feed_stops_on_shutdown() {
        let (stop_tx, stop_rx) = watch::channel(true);
        let (handle, queue) = spawn_job_feed(1_000, 1_000, stop_rx);

        assert_eq!(queue.next().await, None);
        assert_eq!(handle.await.unwrap(), 0);
        drop(stop_tx);
    }
}
