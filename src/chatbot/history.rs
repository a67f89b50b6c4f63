//! Conversation history kept per chat session
//!
//! Messages carry a role, the text and a UTC timestamp.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    /// Older clients send `bot`, Gemini uses `model`
    #[serde(alias = "bot", alias = "model")]
    Assistant,
}

/// One message of a conversation
///
/// Deserializes both `{role, content}` and the `{type, text}` shape sent by
/// the dashboard widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(alias = "type")]
    pub role: Role,
    #[serde(alias = "text")]
    pub content: String,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Bounded conversation history
///
/// Holds at most `2 × limit` messages (user + assistant pairs) after each
/// exchange; the oldest messages are dropped first.
#[derive(Debug, Clone)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
    limit: usize,
}

impl Conversation {
    pub fn new(limit: usize) -> Self {
        Self {
            messages: Vec::new(),
            limit,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Record a completed exchange and trim
    pub fn record_exchange(&mut self, user: &str, assistant: &str) {
        self.messages.push(ChatMessage::user(user));
        self.messages.push(ChatMessage::assistant(assistant));
        self.trim();
    }

    /// Replace the stored history with a client-supplied one
    pub fn replace(&mut self, messages: Vec<ChatMessage>) {
        self.messages = messages;
        self.trim();
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn trim(&mut self) {
        let max = self.limit * 2;
        if self.messages.len() > max {
            let excess = self.messages.len() - max;
            self.messages.drain(..excess);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_keeps_most_recent_pairs() {
        let mut conv = Conversation::new(2);
        for i in 0..5 {
            conv.record_exchange(&format!("q{}", i), &format!("a{}", i));
        }
        assert_eq!(conv.len(), 4);
        assert_eq!(conv.messages()[0].content, "q3");
        assert_eq!(conv.messages()[3].content, "a4");
    }

    #[test]
    fn test_replace_and_clear() {
        let mut conv = Conversation::new(1);
        conv.replace(vec![
            ChatMessage::user("a"),
            ChatMessage::assistant("b"),
            ChatMessage::user("c"),
        ]);
        assert_eq!(conv.len(), 2);
        assert_eq!(conv.messages()[0].role, Role::Assistant);

        conv.clear();
        assert!(conv.is_empty());
    }

    #[test]
    fn test_widget_message_shape() {
        let msgs: Vec<ChatMessage> = serde_json::from_str(
            r#"[{"type": "user", "text": "hi"}, {"type": "bot", "text": "hello"}]"#,
        )
        .unwrap();
        assert_eq!(msgs[0].role, Role::User);
        assert_eq!(msgs[1].role, Role::Assistant);
        assert_eq!(msgs[1].content, "hello");

        let json = serde_json::to_value(&msgs[0]).unwrap();
        assert_eq!(json["role"], "user");
        assert_eq!(json["content"], "hi");
    }
}
