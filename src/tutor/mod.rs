//! Simulated tutor conversation. Replies come from a pluggable
//! [`ResponseGenerator`]; the shipped implementation is keyword matching
//! over canned responses with a configurable thinking delay, so a real
//! model can be substituted without touching the store or callers.

pub mod attention;

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::time::sleep;
use uuid::Uuid;

pub const GREETING: &str = "Hi there! I'm your AI assistant. How can I help you today?";
pub const DEFAULT_THINKING_DELAY: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub text: String,
    pub is_user: bool,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    fn new(text: impl Into<String>, is_user: bool) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            is_user,
            timestamp: Utc::now(),
        }
    }
}

/// Strategy seam for producing tutor replies.
#[async_trait]
pub trait ResponseGenerator: Send + Sync {
    async fn respond(&self, message: &str) -> String;
}

/// Keyword-matched canned replies, reproducing the shipped assistant
/// behavior. The delay simulates thinking time; set it to zero in tests.
pub struct KeywordResponder {
    thinking_delay: Duration,
}

impl KeywordResponder {
    pub fn new() -> Self {
        Self {
            thinking_delay: DEFAULT_THINKING_DELAY,
        }
    }

    pub fn with_delay(thinking_delay: Duration) -> Self {
        Self { thinking_delay }
    }

    /// The reply table, matched against the lowercased message.
    pub fn reply_text(message: &str) -> &'static str {
        let lowered = message.to_lowercase();

        if lowered.contains("hello") || lowered.contains("hi") {
            "Hello! It's nice to chat with you. How can I assist with your learning today?"
        } else if lowered.contains("help") || lowered.contains("explain") {
            "I'd be happy to help explain any concept you're struggling with. Could you provide more specific details about what you'd like me to explain?"
        } else if lowered.contains("machine learning") || lowered.contains("ai") {
            "Machine learning is a subset of AI focused on algorithms that improve through experience. The key types are supervised learning (using labeled data), unsupervised learning (finding patterns in unlabeled data), and reinforcement learning (learning through trial and error). Would you like me to elaborate on any of these?"
        } else if lowered.contains("thank") {
            "You're welcome! Feel free to ask if you need any further assistance with your studies."
        } else {
            "That's an interesting question. I'm here to help with your learning journey. Could you tell me more about what you're trying to understand?"
        }
    }
}

impl Default for KeywordResponder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResponseGenerator for KeywordResponder {
    async fn respond(&self, message: &str) -> String {
        if !self.thinking_delay.is_zero() {
            sleep(self.thinking_delay).await;
        }
        Self::reply_text(message).to_string()
    }
}

/// Ordered chat log, seeded with the assistant greeting.
#[derive(Debug, Clone)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
}

impl Conversation {
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage::new(GREETING, false)],
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Sends a user message and appends the generated reply. Blank
    /// messages are ignored, as in the original input handler.
    pub async fn send(&mut self, text: &str, generator: &dyn ResponseGenerator) -> Option<&ChatMessage> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        self.messages.push(ChatMessage::new(text, true));
        let reply = generator.respond(text).await;
        self.messages.push(ChatMessage::new(reply, false));
        self.messages.last()
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instant_responder() -> KeywordResponder {
        KeywordResponder::with_delay(Duration::ZERO)
    }

    #[test]
    fn reply_table_matches_keywords() {
        assert!(KeywordResponder::reply_text("hello there").starts_with("Hello!"));
        assert!(KeywordResponder::reply_text("please explain recursion")
            .starts_with("I'd be happy to help explain"));
        assert!(KeywordResponder::reply_text("what is machine learning?")
            .starts_with("Machine learning is a subset of AI"));
        assert!(KeywordResponder::reply_text("thank you!").starts_with("You're welcome!"));
        assert!(KeywordResponder::reply_text("quarks?")
            .starts_with("That's an interesting question."));
    }

    #[tokio::test]
    async fn conversation_starts_with_greeting() {
        let conversation = Conversation::new();
        let messages = conversation.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].text, GREETING);
        assert!(!messages[0].is_user);
    }

    #[tokio::test]
    async fn send_appends_user_message_and_reply() {
        let mut conversation = Conversation::new();
        let responder = instant_responder();

        let reply = conversation.send("hello", &responder).await.unwrap();
        assert!(!reply.is_user);
        assert!(reply.text.starts_with("Hello!"));
        assert_eq!(conversation.messages().len(), 3);
        assert!(conversation.messages()[1].is_user);
    }

    #[tokio::test]
    async fn blank_messages_are_ignored() {
        let mut conversation = Conversation::new();
        let responder = instant_responder();

        assert!(conversation.send("   ", &responder).await.is_none());
        assert_eq!(conversation.messages().len(), 1);
    }
}
