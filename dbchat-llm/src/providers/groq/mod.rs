//! Groq provider implementation
//!
//! Groq exposes an OpenAI-compatible chat completions API with very low
//! generation latency, which keeps the two-call question pipeline snappy.

pub mod client;
pub mod completion;
pub mod types;

pub use client::GroqClient;
pub use completion::GroqCompletionProvider;
