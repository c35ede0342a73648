//! Conversation turns and the append-only transcript.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Who produced a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnRole {
    /// The user asking questions
    Human,
    /// The assistant answering them
    Ai,
}

impl fmt::Display for TurnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TurnRole::Human => "Human",
            TurnRole::Ai => "AI",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for TurnRole {
    type Err = TurnRoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "human" => Ok(TurnRole::Human),
            "ai" => Ok(TurnRole::Ai),
            _ => Err(TurnRoleParseError(s.to_string())),
        }
    }
}

/// Error parsing TurnRole from string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnRoleParseError(pub String);

impl fmt::Display for TurnRoleParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid turn role: {}", self.0)
    }
}

impl std::error::Error for TurnRoleParseError {}

/// One exchange unit in the chat history.
///
/// Turns are created once and never mutated; the transcript retains them for
/// the lifetime of the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// Unique turn identifier
    pub turn_id: Uuid,
    /// Who produced this turn
    pub role: TurnRole,
    /// The text payload, stored verbatim
    pub content: String,
    /// When the turn was created
    pub created_at: DateTime<Utc>,
}

impl ConversationTurn {
    /// Create a human turn.
    pub fn human(content: impl Into<String>) -> Self {
        Self::new(TurnRole::Human, content)
    }

    /// Create an AI turn.
    pub fn ai(content: impl Into<String>) -> Self {
        Self::new(TurnRole::Ai, content)
    }

    fn new(role: TurnRole, content: impl Into<String>) -> Self {
        Self {
            turn_id: Uuid::now_v7(),
            role,
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}

/// Append-only ordered sequence of conversation turns.
///
/// Insertion order is significant: the transcript is fed to prompt templates
/// as literal chat history and is never reprocessed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    turns: Vec<ConversationTurn>,
}

impl Transcript {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Self { turns: Vec::new() }
    }

    /// Append a human turn.
    pub fn push_human(&mut self, content: impl Into<String>) -> &ConversationTurn {
        self.push(ConversationTurn::human(content))
    }

    /// Append an AI turn.
    pub fn push_ai(&mut self, content: impl Into<String>) -> &ConversationTurn {
        self.push(ConversationTurn::ai(content))
    }

    fn push(&mut self, turn: ConversationTurn) -> &ConversationTurn {
        self.turns.push(turn);
        self.turns.last().unwrap()
    }

    /// Iterate over turns in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ConversationTurn> {
        self.turns.iter()
    }

    /// Number of turns.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether the transcript holds no turns.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// The most recently appended turn, if any.
    pub fn last(&self) -> Option<&ConversationTurn> {
        self.turns.last()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_role_display() {
        assert_eq!(TurnRole::Human.to_string(), "Human");
        assert_eq!(TurnRole::Ai.to_string(), "AI");
    }

    #[test]
    fn test_turn_role_roundtrip() {
        for role in [TurnRole::Human, TurnRole::Ai] {
            let parsed: TurnRole = role.to_string().parse().unwrap();
            assert_eq!(role, parsed);
        }
    }

    #[test]
    fn test_turn_role_parse_rejects_unknown() {
        assert!("robot".parse::<TurnRole>().is_err());
    }

    #[test]
    fn test_turn_content_stored_verbatim() {
        let content = "  How many employees?  \n";
        let turn = ConversationTurn::human(content);
        assert_eq!(turn.content, content);
        assert_eq!(turn.role, TurnRole::Human);
    }

    #[test]
    fn test_transcript_preserves_insertion_order() {
        let mut transcript = Transcript::new();
        transcript.push_ai("Hello!");
        transcript.push_human("How many employees?");
        transcript.push_ai("There are 42 employees.");

        let roles: Vec<TurnRole> = transcript.iter().map(|t| t.role).collect();
        assert_eq!(roles, vec![TurnRole::Ai, TurnRole::Human, TurnRole::Ai]);
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript.last().unwrap().content, "There are 42 employees.");
    }

    #[test]
    fn test_transcript_empty() {
        let transcript = Transcript::new();
        assert!(transcript.is_empty());
        assert!(transcript.last().is_none());
    }
}

// =============================================================================
// PROPERTY-BASED TESTS
// =============================================================================

#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Appended content is never reformatted by the transcript.
        #[test]
        fn prop_transcript_content_verbatim(contents in prop::collection::vec(".{0,80}", 1..20)) {
            let mut transcript = Transcript::new();
            for (i, content) in contents.iter().enumerate() {
                if i % 2 == 0 {
                    transcript.push_human(content.clone());
                } else {
                    transcript.push_ai(content.clone());
                }
            }

            prop_assert_eq!(transcript.len(), contents.len());
            for (turn, content) in transcript.iter().zip(contents.iter()) {
                prop_assert_eq!(&turn.content, content);
            }
        }

        /// Turn ids are unique within a transcript.
        #[test]
        fn prop_turn_ids_unique(count in 1usize..30) {
            let mut transcript = Transcript::new();
            for _ in 0..count {
                transcript.push_human("q");
            }
            let mut ids: Vec<_> = transcript.iter().map(|t| t.turn_id).collect();
            ids.sort();
            ids.dedup();
            prop_assert_eq!(ids.len(), count);
        }
    }
}
