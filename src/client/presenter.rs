use std::fmt;
use crate::relay::MAX_MESSAGE_CHARS;

/// Counter turns into a warning above this many characters.
pub const NEAR_LIMIT_CHARS: usize = 900;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bubble {
    User,
    Assistant,
}

impl Bubble {
    /// `user` maps to the user bubble; every other role is drawn as assistant.
    pub fn for_role(role: &str) -> Self {
        if role == crate::models::chat::ROLE_USER {
            Bubble::User
        } else {
            Bubble::Assistant
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Suggestion {
    pub label: &'static str,
    pub prompt: &'static str,
}

pub const SUGGESTIONS: [Suggestion; 3] = [
    Suggestion { label: "What can you help me with?", prompt: "What can you help me with?" },
    Suggestion { label: "Tell me about AI technology", prompt: "Tell me about AI technology" },
    Suggestion { label: "How does this work?", prompt: "How does this chatbot work?" },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarEntry {
    pub id: String,
    pub title: String,
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharCount {
    pub count: usize,
    pub limit: usize,
    pub near_limit: bool,
}

impl CharCount {
    pub fn of(input: &str) -> Self {
        let count = input.chars().count();
        Self {
            count,
            limit: MAX_MESSAGE_CHARS,
            near_limit: count > NEAR_LIMIT_CHARS,
        }
    }
}

impl fmt::Display for CharCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.count, self.limit)
    }
}

/// Presentation layer driven by the chat controller.
pub trait Presenter: Send + Sync {
    fn append_message(&self, bubble: Bubble, content: &str);
    fn clear_transcript(&self);
    fn show_welcome(&self, suggestions: &[Suggestion]);
    fn render_sidebar(&self, entries: &[SidebarEntry]);
    fn clear_input(&self);
    fn update_char_count(&self, count: &CharCount);
    /// Disables the send control and shows the loading indicator while true.
    fn set_busy(&self, busy: bool);
    fn focus_input(&self);
}
