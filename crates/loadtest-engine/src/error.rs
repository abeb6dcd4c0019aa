//! Error types for the execution engine.

use thiserror::Error;

/// Errors that can occur while setting up or running a load test.
///
/// Individual action failures are not errors at this level; they are counted
/// as [`crate::Outcome::Failure`] and the run continues.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The action catalog has no entries to sample from.
    #[error("Action catalog is empty")]
    EmptyCatalog,

    /// Configuration error.
    #[error("Configuration error: {0}")]
    InvalidConfig(String),

    /// A worker task panicked while executing actions.
    #[error("Worker {0} panicked")]
    WorkerPanicked(usize),

    /// A background task could not be joined.
    #[error("Task join error: {0}")]
    Join(#[from] tokio::task::JoinError),
}
