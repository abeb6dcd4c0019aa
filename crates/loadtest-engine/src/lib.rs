//! Worker-pool execution engine for database load generation.
//!
//! The engine drives a fixed number of requests through a pool of concurrent
//! workers and tallies what happened:
//! 1. A job feed emits exactly `total_requests` tokens, then closes
//! 2. `concurrency` workers pull tokens, sample an action from a weighted
//!    catalog and execute it against a shared resource (usually a connection pool)
//! 3. Outcomes flow through a result sink that a closer task shuts once every
//!    worker has exited
//! 4. A single aggregator drains the sink into [`RunStatistics`]
//!
//! The engine knows nothing about SQL. Anything implementing [`Action`] for a
//! resource type can be driven by it.
//!
//! # Example
//!
//! ```ignore
//! use loadtest_engine::{Catalog, EngineConfig, LoadTestPipeline};
//!
//! let catalog = Catalog::new(vec![MyAction::Read, MyAction::Read, MyAction::Write])?;
//! let config = EngineConfig::new(10_000, 32).with_seed(42);
//!
//! let pipeline = LoadTestPipeline::new(config, catalog, pool)?;
//! let output = pipeline.run().await?;
//! println!("{} ok / {} failed", output.stats.success, output.stats.failure);
//! ```

pub mod action;
pub mod aggregate;
pub mod catalog;
pub mod config;
pub mod error;
pub mod feed;
pub mod metrics;
pub mod pipeline;
pub mod report;
pub mod worker;

pub use action::{Action, Outcome};
pub use aggregate::Aggregator;
pub use catalog::Catalog;
pub use config::EngineConfig;
pub use error::EngineError;
pub use feed::{spawn_job_feed, JobQueue, JobToken};
pub use metrics::RunStatistics;
pub use pipeline::{LoadTestPipeline, RunOutput};
pub use report::{RunReport, RunSummary};
pub use worker::{spawn_closer, spawn_workers, ExecutionContext, WorkerSummary};
