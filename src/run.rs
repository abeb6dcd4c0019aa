//! Load test command runner.

use anyhow::Context;
use crm_workload::{crm_catalog, hris_catalog, ping, PoolSettings, Workload};
use loadtest_engine::{
    Action, Catalog, EngineConfig, LoadTestPipeline, RunOutput, RunReport, RunSummary,
};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::watch;

use crate::logging::mask_connection_password;
use crate::{MySqlOpts, RunOpts};

/// Engine configuration for a set of CLI options.
pub fn engine_config(opts: &RunOpts) -> anyhow::Result<EngineConfig> {
    let mut config = EngineConfig::new(opts.total_requests, opts.concurrency)
        .with_query_timeout(opts.query_timeout);
    if let Some(seed) = opts.seed {
        config = config.with_seed(seed);
    }
    config.validate().context("Invalid load test configuration")?;
    Ok(config)
}

/// Pool settings for a run: the pool is as large as the worker count unless overridden.
pub fn pool_settings(opts: &RunOpts, mysql: &MySqlOpts) -> PoolSettings {
    PoolSettings::new(
        mysql.mysql_connection_string.clone(),
        mysql.pool_size.unwrap_or(opts.concurrency),
    )
    .with_max_lifetime(mysql.conn_max_lifetime)
}

/// Run the load test end to end: connect, drive the workload, print the report.
///
/// Returns `None` in dry-run mode.
pub async fn run_load_test(
    opts: RunOpts,
    mysql: MySqlOpts,
    shutdown: watch::Receiver<bool>,
) -> anyhow::Result<Option<RunSummary>> {
    println!(
        "{}",
        RunReport::banner(opts.workload.name(), opts.total_requests, opts.concurrency)
    );

    let config = engine_config(&opts)?;
    let settings = pool_settings(&opts, &mysql);
    let masked = mask_connection_password(&settings.connection_string);

    if opts.dry_run {
        settings
            .pool_opts()
            .context("Invalid connection pool settings")?;
        tracing::info!(
            "[DRY-RUN] Would run {} requests of the {} workload with {} workers",
            opts.total_requests,
            opts.workload,
            opts.concurrency
        );
        tracing::info!("[DRY-RUN] Connection: {}", masked);
        tracing::info!(
            "[DRY-RUN] Pool size {} (max lifetime {:?})",
            settings.max_connections,
            settings.max_lifetime
        );
        return Ok(None);
    }

    let pool = settings
        .build_pool()
        .with_context(|| format!("Failed to configure MySQL pool for {masked}"))?;

    tracing::info!("Connecting to MySQL at {}", masked);
    ping(&pool)
        .await
        .with_context(|| format!("Failed to connect to MySQL at {masked}"))?;

    let executor = Arc::new(pool.clone());
    let output = match opts.workload {
        Workload::Crm => execute_workload(config, crm_catalog()?, executor, shutdown).await?,
        Workload::Hris => execute_workload(config, hris_catalog()?, executor, shutdown).await?,
    };

    let report = RunReport::new(opts.workload.name(), opts.concurrency, output);
    println!("{}", report.render());

    let summary = report.summary();
    if let Some(path) = &opts.metrics_output {
        write_summary(path, &summary)?;
    }

    if let Err(e) = pool.disconnect().await {
        tracing::warn!("Failed to close MySQL pool cleanly: {}", e);
    }

    Ok(Some(summary))
}

/// Drive `catalog` against `executor` until done or `shutdown` fires.
pub async fn execute_workload<A, E>(
    config: EngineConfig,
    catalog: Catalog<A>,
    executor: Arc<E>,
    shutdown: watch::Receiver<bool>,
) -> anyhow::Result<RunOutput>
where
    A: Action<E> + 'static,
    E: Send + Sync + 'static,
{
    let pipeline = LoadTestPipeline::new(config, catalog, executor)?;
    let output = pipeline
        .run_until(shutdown)
        .await
        .context("Load test run failed")?;
    Ok(output)
}

/// Write the run summary as pretty-printed JSON.
pub fn write_summary(path: &Path, summary: &RunSummary) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(summary)?;
    std::fs::write(path, &json)
        .with_context(|| format!("Failed to write metrics to {path:?}"))?;
    tracing::info!("Metrics written to {:?}", path);
    Ok(())
}
