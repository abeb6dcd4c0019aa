//! Load test pipeline orchestration.

use crate::action::Action;
use crate::aggregate::Aggregator;
use crate::catalog::Catalog;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::feed::spawn_job_feed;
use crate::metrics::RunStatistics;
use crate::worker::{spawn_closer, spawn_workers, ExecutionContext, WorkerSummary};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::time::Instant;
use tracing::{error, info, warn};

/// Result of one run, before formatting.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub stats: RunStatistics,
    /// One summary per worker, in spawn order.
    pub workers: Vec<WorkerSummary>,
    /// Tokens the feed actually emitted.
    pub produced: u64,
    /// Tokens that were requested.
    pub requested: u64,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

impl RunOutput {
    /// True when a shutdown request cut the run short.
    pub fn interrupted(&self) -> bool {
        self.stats.completed() < self.requested
    }
}

/// Drives a catalog of actions against a shared resource.
pub struct LoadTestPipeline<A, R> {
    config: EngineConfig,
    catalog: Arc<Catalog<A>>,
    resource: Arc<R>,
}

impl<A, R> LoadTestPipeline<A, R>
where
    A: Action<R> + 'static,
    R: Send + Sync + 'static,
{
    /// Create a new pipeline. Fails on invalid configuration.
    pub fn new(
        config: EngineConfig,
        catalog: Catalog<A>,
        resource: Arc<R>,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            config,
            catalog: Arc::new(catalog),
            resource,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run to completion with no way to stop early.
    pub async fn run(&self) -> Result<RunOutput, EngineError> {
        let (_stop_tx, stop_rx) = watch::channel(false);
        self.run_until(stop_rx).await
    }

    /// Run until every token is consumed or `shutdown` flips to `true`.
    ///
    /// On shutdown the feed stops emitting, each worker finishes the action it
    /// is executing (and reports it), then exits.
    pub async fn run_until(
        &self,
        shutdown: watch::Receiver<bool>,
    ) -> Result<RunOutput, EngineError> {
        let total = self.config.total_requests;
        let capacity = self.config.channel_capacity();
        let (results_tx, mut results_rx) = mpsc::channel(capacity);

        let started_at = Utc::now();
        let started = Instant::now();

        info!("Spawning job feed ({} tokens)...", total);
        let (feed, jobs) = spawn_job_feed(total, capacity, shutdown.clone());

        info!("Spawning {} workers...", self.config.concurrency);
        let ctx = ExecutionContext {
            jobs,
            results: results_tx.clone(),
            shutdown,
            query_timeout: self.config.query_timeout,
            seed: self.config.seed,
        };
        let handles = spawn_workers(
            ctx,
            self.config.concurrency,
            self.catalog.clone(),
            self.resource.clone(),
        );
        let closer = spawn_closer(handles, results_tx);

        let stats = Aggregator::new(total).drain(&mut results_rx, started).await;
        let workers = match closer.await? {
            Ok(workers) => workers,
            Err(e) => {
                error!(
                    "Run aborted ({}) after {:?}: {} succeeded, {} failed of {} requested",
                    e, stats.elapsed, stats.success, stats.failure, total
                );
                for (label, count) in stats.distribution() {
                    error!("  {}: {}", label, count);
                }
                return Err(e);
            }
        };
        let produced = feed.await?;

        if stats.completed() < total {
            warn!(
                "Run interrupted: {} of {} requests completed",
                stats.completed(),
                total
            );
        }
        info!(
            "Run finished in {:?}: {} succeeded, {} failed",
            stats.elapsed, stats.success, stats.failure
        );

        Ok(RunOutput {
            stats,
            workers,
            produced,
            requested: total,
            started_at,
            completed_at: Utc::now(),
        })
    }
}
