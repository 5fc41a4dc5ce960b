//! Conversation types for the guided plan-generation chat.
//!
//! These types model one conversation with the coaching bot: the opaque
//! session identifier, the messages exchanged, and who sent them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Opaque per-conversation correlation token sent with every chat request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl SessionId {
    /// Generate a fresh session identifier (UUID v7 text).
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SessionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Who sent a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::User => write!(f, "user"),
            Sender::Bot => write!(f, "bot"),
        }
    }
}

impl FromStr for Sender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Sender::User),
            "bot" => Ok(Sender::Bot),
            other => Err(format!("invalid sender: '{other}'")),
        }
    }
}

/// A single message in the conversation log.
///
/// `id` is the 1-based insertion position within the session and
/// `timestamp` is the local wall-clock time (`HH:MM`) captured when the
/// message was appended. Messages are never edited after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: u32,
    pub sender: Sender,
    /// Rich content; bot messages may embed limited HTML markup.
    pub text: String,
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sender_roundtrip() {
        for sender in [Sender::User, Sender::Bot] {
            let parsed: Sender = sender.to_string().parse().unwrap();
            assert_eq!(sender, parsed);
        }
    }

    #[test]
    fn test_sender_serde() {
        let json = serde_json::to_string(&Sender::Bot).unwrap();
        assert_eq!(json, "\"bot\"");
    }

    #[test]
    fn test_generated_session_ids_differ() {
        let a = SessionId::generate();
        let b = SessionId::generate();
        assert_ne!(a, b);
        assert!(!a.as_str().is_empty());
    }

    #[test]
    fn test_session_id_is_transparent_string() {
        let id = SessionId("abc-123".to_string());
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc-123\"");
    }
}
