//! In-memory executor for exercising workloads without a MySQL server.

use crate::error::WorkloadError;
use crate::executor::SqlExecutor;
use crate::statement::Statement;
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// How the mock answers every statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockMode {
    Succeed,
    Fail,
}

/// Records every statement it is given and answers according to its [`MockMode`].
#[derive(Debug)]
pub struct MockExecutor {
    mode: MockMode,
    latency: Option<Duration>,
    calls: AtomicU64,
    statements: Mutex<Vec<Statement>>,
}

impl MockExecutor {
    pub fn succeeding() -> Self {
        Self::new(MockMode::Succeed)
    }

    pub fn failing() -> Self {
        Self::new(MockMode::Fail)
    }

    fn new(mode: MockMode) -> Self {
        Self {
            mode,
            latency: None,
            calls: AtomicU64::new(0),
            statements: Mutex::new(Vec::new()),
        }
    }

    /// Sleep this long inside every call.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }

    /// Statements seen so far, in arrival order.
    pub fn statements(&self) -> Vec<Statement> {
        match self.statements.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[async_trait]
impl SqlExecutor for MockExecutor {
    async fn execute(&self, statement: Statement) -> Result<(), WorkloadError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let sql = statement.sql;
        match self.statements.lock() {
            Ok(mut guard) => guard.push(statement),
            Err(poisoned) => poisoned.into_inner().push(statement),
        }

        match self.mode {
            MockMode::Succeed => Ok(()),
            MockMode::Fail => Err(WorkloadError::Query(format!("mock rejected: {sql}"))),
        }
    }
}
