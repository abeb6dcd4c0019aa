//! Command-line interface for crm-loadtest
//!
//! # Usage Examples
//!
//! ```bash
//! # Pooled CRM simulation: 1000 requests over 50 workers
//! crm-loadtest 1000 50
//!
//! # Reproducible HRIS run with a smaller pool
//! crm-loadtest 20000 64 --workload hris --pool-size 32 --seed 42
//!
//! # Check the configuration without touching the database
//! crm-loadtest 1000 50 --dry-run
//! ```
//!
//! Press Ctrl+C to stop early; in-flight queries finish and the partial
//! report is still printed. A second Ctrl+C exits at once with status 130.

use clap::Parser;
use crm_loadtest::run::run_load_test;
use crm_loadtest::shutdown::{handle_interrupts, ABORT_EXIT_CODE};
use crm_loadtest::{MySqlOpts, RunOpts};
use tokio::sync::watch;

#[derive(Parser)]
#[command(name = "crm-loadtest")]
#[command(about = "Pooled CRM query load generator for the MySQL employees database")]
#[command(long_about = None)]
struct Cli {
    #[command(flatten)]
    run: RunOpts,

    #[command(flatten)]
    mysql: MySqlOpts,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let shutdown = setup_shutdown_handler();
    run_load_test(cli.run, cli.mysql, shutdown).await?;

    Ok(())
}

/// First Ctrl+C drains the run; a second one exits immediately.
fn setup_shutdown_handler() -> watch::Receiver<bool> {
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    tokio::spawn(async move {
        handle_interrupts(tokio::signal::ctrl_c, shutdown_tx).await;
        std::process::exit(ABORT_EXIT_CODE);
    });

    shutdown_rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use crm_workload::Workload;
    use std::time::Duration;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_positionals_and_defaults() {
        let cli = Cli::try_parse_from(["crm-loadtest", "1000", "50"]).unwrap();

        assert_eq!(cli.run.total_requests, 1000);
        assert_eq!(cli.run.concurrency, 50);
        assert_eq!(cli.run.workload, Workload::Crm);
        assert_eq!(cli.mysql.pool_size, None);
        assert_eq!(cli.mysql.conn_max_lifetime, Duration::from_secs(300));
        assert!(!cli.run.dry_run);
    }

    #[test]
    fn test_options() {
        let cli = Cli::try_parse_from([
            "crm-loadtest",
            "500",
            "8",
            "--workload",
            "hris",
            "--pool-size",
            "4",
            "--query-timeout",
            "750ms",
            "--seed",
            "9",
        ])
        .unwrap();

        assert_eq!(cli.run.workload, Workload::Hris);
        assert_eq!(cli.mysql.pool_size, Some(4));
        assert_eq!(cli.run.query_timeout, Some(Duration::from_millis(750)));
        assert_eq!(cli.run.seed, Some(9));
    }

    #[test]
    fn test_rejects_bad_numbers() {
        for args in [
            ["crm-loadtest", "lots", "50"],
            ["crm-loadtest", "1000", "many"],
            ["crm-loadtest", "1000", "0"],
            ["crm-loadtest", "-5", "10"],
        ] {
            assert!(Cli::try_parse_from(args).is_err(), "{args:?}");
        }
    }

    #[test]
    fn test_missing_positionals() {
        assert!(Cli::try_parse_from(["crm-loadtest", "1000"]).is_err());
    }
}
