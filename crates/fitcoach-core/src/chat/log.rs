//! Append-only message log for one conversation.

use chrono::Local;
use fitcoach_types::chat::{ChatMessage, Sender};

#[derive(Debug, Default)]
pub struct MessageLog {
    messages: Vec<ChatMessage>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message, stamping it with the next id and the local time.
    pub fn append(&mut self, sender: Sender, text: impl Into<String>) -> &ChatMessage {
        let message = ChatMessage {
            id: self.messages.len() as u32 + 1,
            sender,
            text: text.into(),
            timestamp: Local::now().format("%H:%M").to_string(),
        };
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Messages appended after the message with id `after`.
    pub fn since(&self, after: u32) -> &[ChatMessage] {
        let start = (after as usize).min(self.messages.len());
        &self.messages[start..]
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_sequential() {
        let mut log = MessageLog::new();
        for i in 0..5 {
            let sender = if i % 2 == 0 { Sender::User } else { Sender::Bot };
            let prior = log.len() as u32;
            let id = log.append(sender, format!("m{i}")).id;
            assert_eq!(id, prior + 1);
        }
        let ids: Vec<u32> = log.messages().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_timestamp_is_hours_minutes() {
        let mut log = MessageLog::new();
        let ts = log.append(Sender::Bot, "здравей").timestamp.clone();
        assert_eq!(ts.len(), 5);
        assert_eq!(&ts[2..3], ":");
    }

    #[test]
    fn test_since() {
        let mut log = MessageLog::new();
        log.append(Sender::Bot, "a");
        log.append(Sender::User, "b");
        log.append(Sender::Bot, "c");

        let newer: Vec<&str> = log.since(1).iter().map(|m| m.text.as_str()).collect();
        assert_eq!(newer, vec!["b", "c"]);
        assert!(log.since(3).is_empty());
        assert!(log.since(10).is_empty());
        assert_eq!(log.since(0).len(), 3);
        assert_eq!(log.last().map(|m| m.text.as_str()), Some("c"));
    }
}
