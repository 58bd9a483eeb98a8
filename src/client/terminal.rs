use log::debug;
use std::io::Write;
use std::sync::Mutex;
use super::presenter::{ Bubble, CharCount, Presenter, SidebarEntry, Suggestion };
use super::UiCommand;

/// What a line typed at the terminal asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalInput {
    Command(UiCommand),
    ListHistory,
    Help,
    Quit,
    Unknown(String),
}

pub const HELP_TEXT: &str =
    "Commands: /new, /history, /load <id>, /1 /2 /3 (suggestions), /help, /quit. Start a message with // to send a leading /";

pub fn parse_input(line: &str) -> TerminalInput {
    let trimmed = line.trim();
    let Some(rest) = trimmed.strip_prefix('/') else {
        return TerminalInput::Command(UiCommand::SendMessage(line.to_string()));
    };
    if rest.starts_with('/') {
        return TerminalInput::Command(UiCommand::SendMessage(rest.to_string()));
    }

    let mut parts = rest.splitn(2, char::is_whitespace);
    let name = parts.next().unwrap_or_default();
    let arg = parts.next().map(str::trim).unwrap_or_default();

    match name {
        "new" => TerminalInput::Command(UiCommand::NewConversation),
        "history" => TerminalInput::ListHistory,
        "load" if !arg.is_empty() => {
            TerminalInput::Command(UiCommand::LoadConversation(arg.to_string()))
        }
        "help" => TerminalInput::Help,
        "quit" | "exit" => TerminalInput::Quit,
        n => match n.parse::<usize>() {
            Ok(i) if i >= 1 => TerminalInput::Command(UiCommand::UseSuggestion(i - 1)),
            _ => TerminalInput::Unknown(trimmed.to_string()),
        },
    }
}

/// Plain-text presenter. The sidebar is printed only when it changes.
pub struct TerminalPresenter<W: Write + Send> {
    out: Mutex<W>,
    last_sidebar: Mutex<Vec<SidebarEntry>>,
}

impl<W: Write + Send> TerminalPresenter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
            last_sidebar: Mutex::new(Vec::new()),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|e| e.into_inner())
    }

    fn write_lines(&self, text: &str) {
        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        if let Err(e) = writeln!(out, "{}", text).and_then(|_| out.flush()) {
            debug!("Terminal write failed: {}", e);
        }
    }
}

impl<W: Write + Send> Presenter for TerminalPresenter<W> {
    fn append_message(&self, bubble: Bubble, content: &str) {
        let speaker = match bubble {
            Bubble::User => "You",
            Bubble::Assistant => "Assistant",
        };
        let body = content.replace('\n', "\n    ");
        self.write_lines(&format!("{}: {}", speaker, body));
    }

    fn clear_transcript(&self) {
        self.write_lines("----------------------------------------");
    }

    fn show_welcome(&self, suggestions: &[Suggestion]) {
        let mut text = String::from(
            "Hello! I'm your AI Assistant\nHow can I help you today? Feel free to ask me anything!"
        );
        for (i, suggestion) in suggestions.iter().enumerate() {
            text.push_str(&format!("\n  /{}  {}", i + 1, suggestion.label));
        }
        self.write_lines(&text);
    }

    fn render_sidebar(&self, entries: &[SidebarEntry]) {
        let mut last = self.last_sidebar.lock().unwrap_or_else(|e| e.into_inner());
        if last.as_slice() == entries {
            return;
        }
        *last = entries.to_vec();
        drop(last);

        if entries.is_empty() {
            return;
        }
        let mut text = String::from("Recent conversations:");
        for entry in entries {
            let marker = if entry.active { "*" } else { " " };
            text.push_str(&format!("\n {} {}  {}", marker, entry.id, entry.title));
        }
        self.write_lines(&text);
    }

    fn clear_input(&self) {}

    fn update_char_count(&self, count: &CharCount) {
        if count.near_limit {
            self.write_lines(&format!("({} characters)", count));
        }
    }

    fn set_busy(&self, busy: bool) {
        if busy {
            self.write_lines("Assistant is typing...");
        }
    }

    fn focus_input(&self) {}
}
