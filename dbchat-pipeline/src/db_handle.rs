//! Seam between the pipeline and the database layer.

use async_trait::async_trait;
use dbchat_core::ChatResult;
use dbchat_db::DbClient;

/// The two database operations the pipeline consumes.
///
/// Implemented by the real PostgreSQL client and by test doubles.
#[async_trait]
pub trait DatabaseHandle: Send + Sync {
    /// Textual description of tables and columns, recomputed per call.
    async fn schema_description(&self) -> ChatResult<String>;

    /// Run a SQL statement verbatim and return its rendered result.
    async fn run_query(&self, sql: &str) -> ChatResult<String>;
}

#[async_trait]
impl DatabaseHandle for DbClient {
    async fn schema_description(&self) -> ChatResult<String> {
        DbClient::schema_description(self).await
    }

    async fn run_query(&self, sql: &str) -> ChatResult<String> {
        DbClient::run_query(self, sql).await
    }
}
