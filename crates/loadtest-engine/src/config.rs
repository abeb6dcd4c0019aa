//! Configuration types for the execution engine.

use crate::error::EngineError;
use std::time::Duration;

/// Configuration for one load test run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Number of job tokens to emit (one action per token).
    pub total_requests: u64,
    /// Number of concurrent workers.
    pub concurrency: usize,
    /// Upper bound on a single action; exceeding it counts as a failure.
    pub query_timeout: Option<Duration>,
    /// Base seed for per-worker random generators (None = OS entropy).
    pub seed: Option<u64>,
}

impl EngineConfig {
    /// Create a new engine configuration.
    pub fn new(total_requests: u64, concurrency: usize) -> Self {
        Self {
            total_requests,
            concurrency,
            query_timeout: None,
            seed: None,
        }
    }

    /// Bound every action by `timeout`.
    pub fn with_query_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.query_timeout = timeout;
        self
    }

    /// Make worker random streams reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Capacity of the job feed and result sink.
    ///
    /// Equal to `total_requests` so producing and forwarding never block.
    /// Clamped to what a tokio channel accepts (at least 1).
    pub fn channel_capacity(&self) -> usize {
        usize::try_from(self.total_requests)
            .unwrap_or(usize::MAX)
            .clamp(1, tokio::sync::Semaphore::MAX_PERMITS)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.concurrency == 0 {
            return Err(EngineError::InvalidConfig(
                "concurrency must be at least 1".to_string(),
            ));
        }
        if self.query_timeout == Some(Duration::ZERO) {
            return Err(EngineError::InvalidConfig(
                "query timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
