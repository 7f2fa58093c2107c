//! Chat transcript entries

use chrono::{DateTime, Utc};
use eyre::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Maximum message length accepted by the transcript
pub const MAX_MESSAGE_LEN: usize = 1000;

/// Who produced a chat turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

impl std::fmt::Display for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Ai => write!(f, "ai"),
        }
    }
}

/// One chat turn
///
/// Messages are appended and never mutated; the whole transcript may be
/// replaced when the conversational service returns its own canonical list.
/// Timestamps persist as ISO-8601 strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Positive id, unique within the transcript
    pub id: u32,

    /// Message text, 1..=1000 characters
    pub text: String,

    /// Which side of the conversation produced this turn
    pub sender: Sender,

    /// When the turn happened
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    /// Create a message for the current instant
    ///
    /// Errors on empty or oversized text and on a zero id. These are caller
    /// bugs, not user input problems: the chat layer trims and bounds input
    /// before composing a turn.
    pub fn new(text: impl Into<String>, sender: Sender, id: u32) -> Result<Self> {
        let text = text.into().trim().to_string();
        debug!(%sender, id, "ChatMessage::new: called");
        if id == 0 {
            eyre::bail!("Invalid message: id must be positive");
        }
        if text.is_empty() {
            eyre::bail!("Invalid message: text cannot be empty");
        }
        if text.chars().count() > MAX_MESSAGE_LEN {
            eyre::bail!(
                "Invalid message: text exceeds {} characters",
                MAX_MESSAGE_LEN
            );
        }
        Ok(Self {
            id,
            text,
            sender,
            timestamp: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_text() {
        let msg = ChatMessage::new("  hello  ", Sender::User, 1).unwrap();
        assert_eq!(msg.text, "hello");
        assert_eq!(msg.sender, Sender::User);
    }

    #[test]
    fn test_new_rejects_empty() {
        assert!(ChatMessage::new("   ", Sender::User, 1).is_err());
    }

    #[test]
    fn test_new_rejects_oversized() {
        let long = "x".repeat(MAX_MESSAGE_LEN + 1);
        assert!(ChatMessage::new(long, Sender::Ai, 1).is_err());
    }

    #[test]
    fn test_new_rejects_zero_id() {
        assert!(ChatMessage::new("hi", Sender::User, 0).is_err());
    }

    #[test]
    fn test_timestamp_serializes_as_iso_string() {
        let msg = ChatMessage::new("hi", Sender::Ai, 2).unwrap();
        let json = serde_json::to_value(&msg).unwrap();
        assert!(json["timestamp"].is_string());
        assert_eq!(json["sender"], "ai");

        let back: ChatMessage = serde_json::from_value(json).unwrap();
        assert_eq!(back, msg);
    }
}
