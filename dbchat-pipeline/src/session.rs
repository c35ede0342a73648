//! Chat session: connection, transcript and the per-question state machine.

use crate::db_handle::DatabaseHandle;
use crate::executor::execute_query;
use crate::generator::{compose_answer, generate_sql};
use dbchat_core::{ChatResult, Transcript};
use dbchat_llm::ChatCompletionProvider;
use std::sync::Arc;
use tracing::{info, instrument};

/// Greeting seeded into every new session's transcript.
pub const GREETING: &str = "Hello! I'm a SQL assistant. Ask me anything about your database.";

/// A connected chat session.
///
/// Owns the database handle, the completion provider and the transcript.
/// Created on connect, dropped on disconnect; there is no other lifecycle.
/// One `submit` call runs the whole pipeline synchronously before control
/// returns - no partial states, no cancellation.
pub struct ChatSession {
    db: Arc<dyn DatabaseHandle>,
    provider: Arc<dyn ChatCompletionProvider>,
    transcript: Transcript,
}

impl ChatSession {
    /// Create a session over a live database handle and provider.
    pub fn new(db: Arc<dyn DatabaseHandle>, provider: Arc<dyn ChatCompletionProvider>) -> Self {
        let mut transcript = Transcript::new();
        transcript.push_ai(GREETING);
        Self {
            db,
            provider,
            transcript,
        }
    }

    /// The conversation so far, oldest turn first.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Answer one user question.
    ///
    /// Empty or whitespace-only input is ignored: nothing is appended to
    /// the transcript and no provider or database call happens.
    ///
    /// On success the question and the answer are appended as turns and the
    /// answer is returned. A schema or provider failure leaves the
    /// transcript with at most the question appended and surfaces as a
    /// typed error; execution failures never surface here - they are folded
    /// into the answer by design.
    #[instrument(skip_all)]
    pub async fn submit(&mut self, input: &str) -> ChatResult<Option<String>> {
        let question = input.trim();
        if question.is_empty() {
            return Ok(None);
        }

        // Schema is recomputed per request; caching belongs to the database,
        // not this pipeline.
        let schema = self.db.schema_description().await?;

        let sql = generate_sql(self.provider.as_ref(), &schema, &self.transcript, question).await?;
        self.transcript.push_human(question);

        let response = execute_query(self.db.as_ref(), &sql).await;

        let answer = compose_answer(
            self.provider.as_ref(),
            &schema,
            &self.transcript,
            question,
            &sql,
            &response,
        )
        .await?;

        self.transcript.push_ai(answer.clone());
        info!(turns = self.transcript.len(), "question answered");
        Ok(Some(answer))
    }
}

impl std::fmt::Debug for ChatSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSession")
            .field("turns", &self.transcript.len())
            .finish()
    }
}
