//! Database client wrapper.

use crate::DbConfig;
use dbchat_core::{ChatResult, DbError};
use deadpool_postgres::Pool;
use tokio_postgres::SimpleQueryMessage;
use tracing::debug;

/// Database client that wraps a connection pool.
///
/// Exposes exactly the two operations the question pipeline consumes: a
/// textual schema description and raw text query execution.
#[derive(Clone)]
pub struct DbClient {
    pool: Pool,
}

impl DbClient {
    /// Create a new database client with the given pool.
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Create a client from configuration and verify connectivity.
    ///
    /// Bad credentials or an unreachable host surface here, at the
    /// connection-setup boundary, not later in the pipeline.
    pub async fn connect(config: &DbConfig) -> ChatResult<Self> {
        let pool = config.create_pool()?;
        let client = Self::new(pool);

        let conn = client.get_conn().await?;
        conn.simple_query("SELECT 1")
            .await
            .map_err(|e| DbError::ConnectionFailed {
                reason: e.to_string(),
            })?;

        debug!(host = %config.host, dbname = %config.dbname, "database connection verified");
        Ok(client)
    }

    /// Get a connection from the pool.
    async fn get_conn(&self) -> ChatResult<deadpool_postgres::Object> {
        self.pool.get().await.map_err(|e| {
            DbError::ConnectionFailed {
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Produce a textual description of the public schema.
    ///
    /// Recomputed from the live database on every call; the pipeline never
    /// caches it.
    pub async fn schema_description(&self) -> ChatResult<String> {
        let conn = self.get_conn().await?;

        let rows = conn
            .query(
                "SELECT table_name, column_name, data_type \
                 FROM information_schema.columns \
                 WHERE table_schema = 'public' \
                 ORDER BY table_name, ordinal_position",
                &[],
            )
            .await
            .map_err(|e| DbError::IntrospectionFailed {
                reason: e.to_string(),
            })?;

        let mut description = String::new();
        let mut current_table: Option<String> = None;

        for row in rows {
            let table: String = row.get(0);
            let column: String = row.get(1);
            let data_type: String = row.get(2);

            if current_table.as_deref() != Some(table.as_str()) {
                if current_table.is_some() {
                    description.push('\n');
                }
                description.push_str(&format!("Table \"{}\"\n", table));
                current_table = Some(table);
            }
            description.push_str(&format!("  {} {}\n", column, data_type));
        }

        Ok(description)
    }

    /// Run a SQL statement verbatim and render its rows as text.
    ///
    /// Uses the simple query protocol so every cell arrives as text
    /// regardless of its PostgreSQL type. Statements that return no rows
    /// (DDL, DML) render as an empty row list.
    pub async fn run_query(&self, sql: &str) -> ChatResult<String> {
        let conn = self.get_conn().await?;

        let messages = conn
            .simple_query(sql)
            .await
            .map_err(|e| DbError::QueryFailed {
                reason: e.to_string(),
            })?;

        let mut rows: Vec<Vec<Option<String>>> = Vec::new();
        for message in messages {
            if let SimpleQueryMessage::Row(row) = message {
                let mut cells = Vec::with_capacity(row.len());
                for i in 0..row.len() {
                    cells.push(row.get(i).map(|s| s.to_string()));
                }
                rows.push(cells);
            }
        }

        debug!(rows = rows.len(), "query executed");
        Ok(render_rows(&rows))
    }
}

/// Render rows as a list of tuples, e.g. `[(42,), (Alice, 30)]`.
///
/// This is the exact text the answer-composition prompt sees; it is never
/// inspected structurally downstream.
fn render_rows(rows: &[Vec<Option<String>>]) -> String {
    let tuples: Vec<String> = rows
        .iter()
        .map(|cells| {
            let values: Vec<&str> = cells
                .iter()
                .map(|c| c.as_deref().unwrap_or("NULL"))
                .collect();
            if values.len() == 1 {
                format!("({},)", values[0])
            } else {
                format!("({})", values.join(", "))
            }
        })
        .collect();
    format!("[{}]", tuples.join(", "))
}

impl std::fmt::Debug for DbClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = self.pool.status();
        f.debug_struct("DbClient")
            .field("pool_size", &status.size)
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_rows_empty() {
        assert_eq!(render_rows(&[]), "[]");
    }

    #[test]
    fn test_render_rows_single_column_gets_trailing_comma() {
        let rows = vec![vec![Some("42".to_string())]];
        assert_eq!(render_rows(&rows), "[(42,)]");
    }

    #[test]
    fn test_render_rows_multiple_columns() {
        let rows = vec![
            vec![Some("Alice".to_string()), Some("30".to_string())],
            vec![Some("Bob".to_string()), None],
        ];
        assert_eq!(render_rows(&rows), "[(Alice, 30), (Bob, NULL)]");
    }
}
