//! SQL generation and answer composition via the completion provider.
//!
//! Both calls sit behind an explicit failure boundary: provider errors come
//! back as typed results, mirroring how execution errors are handled,
//! instead of escaping the pipeline.

use crate::prompt;
use dbchat_core::{ChatResult, Transcript};
use dbchat_llm::ChatCompletionProvider;
use tracing::debug;

/// Ask the provider for a SQL statement answering the question.
///
/// The returned text is trimmed of surrounding whitespace but otherwise
/// opaque: the single-statement, no-commentary convention is enforced only
/// by the prompt wording, and violations flow downstream as-is.
pub async fn generate_sql(
    provider: &dyn ChatCompletionProvider,
    schema: &str,
    transcript: &Transcript,
    question: &str,
) -> ChatResult<String> {
    let prompt = prompt::sql_prompt(schema, transcript, question);
    let sql = provider.complete(&prompt).await?;
    let sql = sql.trim().to_string();
    debug!(model = provider.model_id(), %sql, "generated SQL");
    Ok(sql)
}

/// Ask the provider to phrase the execution result as a natural-language
/// answer. The result may be row text or an execution-error string; this
/// component cannot tell and does not care.
pub async fn compose_answer(
    provider: &dyn ChatCompletionProvider,
    schema: &str,
    transcript: &Transcript,
    question: &str,
    sql: &str,
    response: &str,
) -> ChatResult<String> {
    let prompt = prompt::answer_prompt(schema, transcript, question, sql, response);
    let answer = provider.complete(&prompt).await?;
    Ok(answer.trim().to_string())
}

// =============================================================================
// TESTS
// =============================================================================
