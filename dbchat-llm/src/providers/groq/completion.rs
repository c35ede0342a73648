//! Groq chat-completion provider implementation

use super::client::GroqClient;
use super::types::{CompletionRequest, CompletionResponse, Message};
use crate::providers::invalid_response;
use crate::ChatCompletionProvider;
use async_trait::async_trait;
use dbchat_core::ChatResult;

/// Default model, matching the provider's large-context Mixtral deployment.
pub const DEFAULT_MODEL: &str = "mixtral-8x7b-32768";

/// Groq chat-completion provider.
pub struct GroqCompletionProvider {
    client: GroqClient,
    model: String,
}

impl GroqCompletionProvider {
    /// Create a new Groq completion provider.
    ///
    /// # Arguments
    /// * `api_key` - Groq API key
    /// * `model` - Model name (e.g., "mixtral-8x7b-32768")
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self::with_rate_limit(api_key, model, 60)
    }

    /// Create a provider with an explicit requests-per-minute budget.
    pub fn with_rate_limit(
        api_key: impl Into<String>,
        model: impl Into<String>,
        requests_per_minute: u32,
    ) -> Self {
        Self {
            client: GroqClient::new(api_key, requests_per_minute),
            model: model.into(),
        }
    }

    /// Create a provider with the default model.
    pub fn with_default_model(api_key: impl Into<String>) -> Self {
        Self::new(api_key, DEFAULT_MODEL)
    }
}

#[async_trait]
impl ChatCompletionProvider for GroqCompletionProvider {
    async fn complete(&self, prompt: &str) -> ChatResult<String> {
        let request = CompletionRequest {
            model: self.model.clone(),
            messages: vec![Message {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            max_tokens: None,
            // SQL generation must be deterministic
            temperature: Some(0.0),
        };

        let response: CompletionResponse =
            self.client.request("chat/completions", request).await?;

        response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| invalid_response("groq", "No completion in response"))
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

impl std::fmt::Debug for GroqCompletionProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroqCompletionProvider")
            .field("model", &self.model)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_model() {
        let provider = GroqCompletionProvider::with_default_model("key");
        assert_eq!(provider.model_id(), DEFAULT_MODEL);
    }

    #[test]
    fn test_debug_redacts_key() {
        let provider = GroqCompletionProvider::new("secret-key", "mixtral-8x7b-32768");
        let debug = format!("{:?}", provider);
        assert!(!debug.contains("secret-key"));
    }
}
