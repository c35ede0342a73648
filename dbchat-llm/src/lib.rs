//! DBCHAT LLM - chat-completion provider abstraction.
//!
//! Provider-agnostic trait for "prompt in, text out" generation plus the
//! Groq implementation used in production. The rest of dbchat depends only
//! on the trait, nothing about the transport.

pub mod providers;

pub use providers::groq::completion::DEFAULT_MODEL;
pub use providers::groq::{GroqClient, GroqCompletionProvider};

use async_trait::async_trait;
use dbchat_core::{ChatResult, LlmError};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

// ============================================================================
// COMPLETION PROVIDER TRAIT
// ============================================================================

/// Trait for chat-completion providers.
/// Implementations must be thread-safe (Send + Sync).
///
/// dbchat only depends on prompt-in, text-out semantics; everything about
/// the transport is the implementation's concern.
#[async_trait]
pub trait ChatCompletionProvider: Send + Sync {
    /// Generate a completion for a single prompt.
    ///
    /// # Returns
    /// * `Ok(String)` - The completion text
    /// * `Err(ChatError::Llm)` - If the provider call fails
    async fn complete(&self, prompt: &str) -> ChatResult<String>;

    /// Model identifier this provider generates with.
    fn model_id(&self) -> &str;
}

// ============================================================================
// MOCK PROVIDER FOR TESTING
// ============================================================================

/// Mock completion provider for testing.
///
/// Replies with queued canned responses in order and counts calls, so tests
/// can assert both the produced text and how many provider round-trips a
/// pipeline performed.
pub struct MockCompletionProvider {
    replies: Mutex<VecDeque<String>>,
    calls: AtomicUsize,
}

impl MockCompletionProvider {
    /// Create a mock that serves the given replies in order.
    pub fn new(replies: Vec<String>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Create a mock with a single queued reply.
    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self::new(vec![reply.into()])
    }

    /// How many times complete() has been called.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl ChatCompletionProvider for MockCompletionProvider {
    async fn complete(&self, _prompt: &str) -> ChatResult<String> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        let mut replies = self
            .replies
            .lock()
            .map_err(|_| LlmError::InvalidResponse {
                provider: "mock".to_string(),
                reason: "reply queue poisoned".to_string(),
            })?;
        replies.pop_front().ok_or_else(|| {
            LlmError::EmptyCompletion {
                provider: "mock".to_string(),
            }
            .into()
        })
    }

    fn model_id(&self) -> &str {
        "mock"
    }
}

impl std::fmt::Debug for MockCompletionProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockCompletionProvider")
            .field("calls", &self.call_count())
            .finish()
    }
}

// ============================================================================
// UNIT TESTS
// ============================================================================


// ============================================================================
// PROPERTY-BASED TESTS
// ============================================================================

#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Replies come back in queue order regardless of count or content,
        /// and every call past the queue is a typed error.
        #[test]
        fn prop_mock_replies_served_in_order(
            replies in prop::collection::vec("[ -~]{0,40}", 1..10)
        ) {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .build()
                .unwrap();
            let provider = MockCompletionProvider::new(replies.clone());

            runtime.block_on(async {
                for expected in &replies {
                    let got = provider.complete("prompt").await.unwrap();
                    assert_eq!(&got, expected);
                }
                assert!(provider.complete("prompt").await.is_err());
            });

            prop_assert_eq!(provider.call_count(), replies.len() + 1);
        }
    }
}
