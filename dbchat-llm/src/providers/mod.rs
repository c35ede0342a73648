//! LLM provider implementations
//!
//! Concrete implementations of the ChatCompletionProvider trait. Groq is the
//! only production provider; it speaks the OpenAI-compatible wire format.

pub mod groq;

pub use groq::{GroqClient, GroqCompletionProvider};

use dbchat_core::{ChatError, LlmError};

pub(crate) fn request_failed(
    provider: &str,
    status: i32,
    message: impl Into<String>,
) -> ChatError {
    ChatError::Llm(LlmError::RequestFailed {
        provider: provider.to_string(),
        status,
        message: message.into(),
    })
}

pub(crate) fn rate_limited(provider: &str, retry_after_ms: i64) -> ChatError {
    ChatError::Llm(LlmError::RateLimited {
        provider: provider.to_string(),
        retry_after_ms,
    })
}

pub(crate) fn invalid_response(provider: &str, reason: impl Into<String>) -> ChatError {
    ChatError::Llm(LlmError::InvalidResponse {
        provider: provider.to_string(),
        reason: reason.into(),
    })
}
