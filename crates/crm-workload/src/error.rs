//! Error types for workload execution and pool setup.

use thiserror::Error;

/// Errors that can occur while setting up the pool or running a query.
#[derive(Error, Debug)]
pub enum WorkloadError {
    /// MySQL connection or query error.
    #[error("MySQL error: {0}")]
    MySQL(#[from] mysql_async::Error),

    /// Malformed connection string.
    #[error("Invalid connection string: {0}")]
    Url(#[from] mysql_async::UrlError),

    /// Query rejected by a non-MySQL executor.
    #[error("Query failed: {0}")]
    Query(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}
