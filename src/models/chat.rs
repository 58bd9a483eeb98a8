use chrono::{ DateTime, Utc };
use serde::{ Serialize, Deserialize };

pub const ROLE_SYSTEM: &str = "system";
pub const ROLE_USER: &str = "user";
pub const ROLE_ASSISTANT: &str = "assistant";

/// Longest title kept before the first user message is cut and suffixed with "...".
pub const TITLE_MAX_CHARS: usize = 50;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: &str, content: impl Into<String>) -> Self {
        Self { role: role.to_string(), content: content.into() }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(ROLE_SYSTEM, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(ROLE_USER, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(ROLE_ASSISTANT, content)
    }

    pub fn is_user(&self) -> bool {
        self.role == ROLE_USER
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub title: String,
    pub messages: Vec<ChatMessage>,
    pub timestamp: DateTime<Utc>,
}

impl Conversation {
    /// Starts an empty conversation titled after the message that opened it.
    pub fn start(id: &str, first_user_message: &str) -> Self {
        Self {
            id: id.to_string(),
            title: derive_title(first_user_message),
            messages: Vec::new(),
            timestamp: Utc::now(),
        }
    }

    pub fn push_exchange(&mut self, user_message: &str, assistant_message: &str) {
        self.messages.push(ChatMessage::user(user_message));
        self.messages.push(ChatMessage::assistant(assistant_message));
    }
}

pub fn derive_title(message: &str) -> String {
    let mut chars = message.chars();
    let head: String = chars.by_ref().take(TITLE_MAX_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_message_is_used_as_title() {
        assert_eq!(derive_title("Hello"), "Hello");
    }

    #[test]
    fn exactly_fifty_chars_is_not_truncated() {
        let message = "a".repeat(50);
        assert_eq!(derive_title(&message), message);
    }

    #[test]
    fn long_message_is_truncated_with_ellipsis() {
        let message = "b".repeat(51);
        let title = derive_title(&message);
        assert_eq!(title, format!("{}...", "b".repeat(50)));
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let message = "é".repeat(60);
        let title = derive_title(&message);
        assert_eq!(title.chars().count(), 53);
        assert!(title.ends_with("..."));
    }

    #[test]
    fn exchange_appends_user_then_assistant() {
        let mut conversation = Conversation::start("chat_1", "Hello");
        conversation.push_exchange("Hello", "Hi there!");

        assert_eq!(conversation.messages, vec![
            ChatMessage::user("Hello"),
            ChatMessage::assistant("Hi there!"),
        ]);
        assert!(conversation.messages[0].is_user());
        assert!(!conversation.messages[1].is_user());
    }
}
