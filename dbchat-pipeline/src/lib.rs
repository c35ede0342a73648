//! DBCHAT pipeline - the question-to-answer flow.
//!
//! One user question triggers exactly one run through:
//! prompt composition -> SQL generation -> query execution -> answer
//! composition. The two LLM calls are strictly sequential; the second
//! depends on the first's output.

mod db_handle;
mod executor;
mod generator;
pub mod prompt;
pub mod rewrite;
mod session;

pub use db_handle::DatabaseHandle;
pub use executor::{execute_query, QUERY_ERROR_PREFIX};
pub use generator::{compose_answer, generate_sql};
pub use session::{ChatSession, GREETING};
