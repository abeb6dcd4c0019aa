//! Interrupt handling: the first Ctrl+C drains, the second aborts.

use std::future::Future;
use tokio::sync::watch;
use tracing::{info, warn};

/// Exit status used when a second interrupt aborts the process (128 + SIGINT).
pub const ABORT_EXIT_CODE: i32 = 130;

/// Raise `shutdown` on the first interrupt and return on the second.
///
/// `interrupt` is called once per signal to wait for. If it fails to install,
/// the flag is never raised and this never returns; `shutdown` stays alive so
/// workers keep running.
pub async fn handle_interrupts<F, Fut>(mut interrupt: F, shutdown: watch::Sender<bool>)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = std::io::Result<()>>,
{
    if let Err(e) = interrupt().await {
        warn!("Failed to install Ctrl+C handler: {}", e);
        std::future::pending::<()>().await;
    }

    info!("Received interrupt signal (Ctrl+C), finishing in-flight queries");
    info!("Press Ctrl+C again to abort");
    let _ = shutdown.send(true);

    if let Err(e) = interrupt().await {
        warn!("Failed to wait for a second Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    warn!("Second interrupt received, aborting");
}
