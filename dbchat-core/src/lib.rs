//! DBCHAT core - conversation primitives and error taxonomy.
//!
//! Pure data types shared by every other dbchat crate. Provider traits and
//! orchestration live in dbchat-llm and dbchat-pipeline.

mod error;
mod transcript;

pub use error::{ChatError, ChatResult, ConfigError, DbError, LlmError};
pub use transcript::{ConversationTurn, Transcript, TurnRole, TurnRoleParseError};
