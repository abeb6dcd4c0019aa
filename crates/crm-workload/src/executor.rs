//! The connection contract actions run against.

use crate::error::WorkloadError;
use crate::statement::Statement;
use async_trait::async_trait;
use mysql_async::{prelude::*, Params, Pool, Value};

/// Something that can run one statement and discard its rows.
///
/// Implementations must be safe to share between workers; each call borrows
/// whatever connection it needs and gives it back before returning.
#[async_trait]
pub trait SqlExecutor: Send + Sync {
    async fn execute(&self, statement: Statement) -> Result<(), WorkloadError>;
}

#[async_trait]
impl SqlExecutor for Pool {
    async fn execute(&self, statement: Statement) -> Result<(), WorkloadError> {
        // Dropping the connection returns it to the pool
        let mut conn = self.get_conn().await?;

        if statement.params.is_empty() {
            conn.query_drop(statement.sql).await?;
        } else {
            let params: Vec<Value> = statement.params.into_iter().map(Value::from).collect();
            conn.exec_drop(statement.sql, Params::Positional(params)).await?;
        }

        Ok(())
    }
}
