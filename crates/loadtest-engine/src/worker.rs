//! Worker pool and the completion signal that closes the result sink.
//!
//! Each worker is an independent tokio task running the same loop:
//! - take the next token from the [`JobQueue`] (exit when it is closed and drained),
//! - sample an action from the shared [`Catalog`] with a worker-local rng,
//! - execute it against the shared resource,
//! - forward the [`Outcome`] to the result sink.
//!
//! Workers never talk to each other. The only state they all touch is the
//! resource itself, whose thread safety is its own concern (a connection pool
//! hands out one connection per call). A failing action is counted and the
//! worker moves on; only an exhausted feed or a shutdown request ends it.
//!
//! The closer task owns the original sender of the result sink. It joins every
//! worker and only then drops that sender, so the aggregator can never see the
//! sink close while a worker is still running.

use crate::action::{Action, Outcome};
use crate::catalog::Catalog;
use crate::error::EngineError;
use crate::feed::JobQueue;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// Everything a worker needs besides the catalog and the resource.
#[derive(Clone)]
pub struct ExecutionContext {
    pub jobs: JobQueue,
    pub results: mpsc::Sender<Outcome>,
    pub shutdown: watch::Receiver<bool>,
    pub query_timeout: Option<Duration>,
    pub seed: Option<u64>,
}

/// What a worker reports when it exits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerSummary {
    pub worker_id: usize,
    /// Actions executed (successful or not).
    pub executed: u64,
}

/// Spawn exactly `workers` tasks bound to the same catalog and resource.
///
/// `ctx` is consumed; every worker gets its own clone of the result sender,
/// so once the caller hands the original to [`spawn_closer`] the sink closes
/// exactly when the closer is done.
pub fn spawn_workers<A, R>(
    ctx: ExecutionContext,
    workers: usize,
    catalog: Arc<Catalog<A>>,
    resource: Arc<R>,
) -> Vec<JoinHandle<WorkerSummary>>
where
    A: Action<R> + 'static,
    R: Send + Sync + 'static,
{
    (0..workers)
        .map(|worker_id| {
            let ctx = ctx.clone();
            let catalog = catalog.clone();
            let resource = resource.clone();
            tokio::spawn(run_worker(worker_id, ctx, catalog, resource))
        })
        .collect()
}

/// Spawn the task that waits for every worker and then closes the result sink.
///
/// `results` must be the last sender not owned by a worker. Panicked workers
/// are reported after all others have been joined.
pub fn spawn_closer(
    handles: Vec<JoinHandle<WorkerSummary>>,
    results: mpsc::Sender<Outcome>,
) -> JoinHandle<Result<Vec<WorkerSummary>, EngineError>> {
    tokio::spawn(async move {
        let mut summaries = Vec::with_capacity(handles.len());
        let mut failure = None;

        for (worker_id, handle) in handles.into_iter().enumerate() {
            match handle.await {
                Ok(summary) => summaries.push(summary),
                Err(e) if e.is_panic() => {
                    error!("Worker {} panicked", worker_id);
                    failure.get_or_insert(EngineError::WorkerPanicked(worker_id));
                }
                Err(e) => {
                    error!("Worker {} could not be joined: {}", worker_id, e);
                    failure.get_or_insert(EngineError::Join(e));
                }
            }
        }

        drop(results);
        info!("{} workers finished, result sink closed", summaries.len());

        match failure {
            Some(e) => Err(e),
            None => Ok(summaries),
        }
    })
}

async fn run_worker<A, R>(
    worker_id: usize,
    mut ctx: ExecutionContext,
    catalog: Arc<Catalog<A>>,
    resource: Arc<R>,
) -> WorkerSummary
where
    A: Action<R> + 'static,
    R: Send + Sync + 'static,
{
    let mut rng = worker_rng(ctx.seed, worker_id);
    let mut executed = 0u64;

    loop {
        let token = tokio::select! {
            biased;
            _ = shutdown_requested(&mut ctx.shutdown) => None,
            token = ctx.jobs.next() => token,
        };
        if token.is_none() {
            break;
        }

        let action = catalog.sample(&mut rng);
        let outcome = execute_action(action, &*resource, &mut rng, ctx.query_timeout).await;
        executed += 1;

        if ctx.results.send(outcome).await.is_err() {
            // Aggregator went away; nothing left to report to
            break;
        }
    }

    debug!(worker_id, executed, "Worker finished");
    WorkerSummary {
        worker_id,
        executed,
    }
}

/// Run one action and map its result to an [`Outcome`].
///
/// Errors and timeouts both collapse to [`Outcome::Failure`]. There are no
/// retries.
pub async fn execute_action<A, R>(
    action: &A,
    resource: &R,
    rng: &mut StdRng,
    timeout: Option<Duration>,
) -> Outcome
where
    A: Action<R>,
{
    let call = action.execute(resource, rng);
    let succeeded = match timeout {
        Some(limit) => matches!(tokio::time::timeout(limit, call).await, Ok(Ok(()))),
        None => call.await.is_ok(),
    };

    if succeeded {
        Outcome::Success(action.label())
    } else {
        Outcome::Failure
    }
}

/// Resolves once shutdown is requested; never resolves if the signal is gone.
async fn shutdown_requested(shutdown: &mut watch::Receiver<bool>) {
    let signal_dropped = shutdown.wait_for(|stop| *stop).await.is_err();
    if signal_dropped {
        std::future::pending::<()>().await;
    }
}

fn worker_rng(seed: Option<u64>, worker_id: usize) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(worker_id as u64)),
        None => StdRng::from_entropy(),
    }
}
