//! Query execution with the dialect patch rules applied.

use crate::db_handle::DatabaseHandle;
use crate::rewrite::apply_rewrites;
use tracing::{debug, warn};

/// Literal prefix of every execution-error result.
pub const QUERY_ERROR_PREFIX: &str = "An error occurred while running the query: ";

/// Run generated SQL against the database and return the result as text.
///
/// Never fails past this boundary: any database error is converted into a
/// descriptive string and fed forward so the answer composer can translate
/// it into the fallback sentence. No transaction, no timeout, no statement
/// filtering - the text runs verbatim after the rewrite rules.
pub async fn execute_query(db: &dyn DatabaseHandle, sql: &str) -> String {
    let patched = apply_rewrites(sql);
    debug!(sql = %patched, "executing generated query");

    match db.run_query(&patched).await {
        Ok(result) => result,
        Err(e) => {
            warn!(error = %e, "query execution failed");
            format!("{}{}", QUERY_ERROR_PREFIX, e)
        }
    }
}
