#![allow(dead_code)]

use async_trait::async_trait;
use relay_chat::client::presenter::{ Bubble, CharCount, Presenter, SidebarEntry, Suggestion };
use relay_chat::client::relay::{ RelayApi, RelayClientError };
use relay_chat::llm::chat::{ ChatClient, CompletionRequest, CompletionResponse, LlmError };
use relay_chat::relay::ChatRelay;
use relay_chat::server::AppState;
use std::sync::{ Arc, Mutex };
use tempfile::TempDir;
use tokio::sync::Notify;

pub const INDEX_HTML: &str = "<html><body>chat app</body></html>";

/// Completion API double that answers every request the same way.
pub struct MockChatClient {
    pub requests: Mutex<Vec<CompletionRequest>>,
    reply: Result<String, LlmError>,
}

impl MockChatClient {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self { requests: Mutex::new(Vec::new()), reply: Ok(text.to_string()) })
    }

    pub fn failing_with_status(status: u16) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            reply: Err(LlmError::Status { status, body: "upstream exploded".into() }),
        })
    }

    pub fn without_api_key() -> Arc<Self> {
        Arc::new(Self { requests: Mutex::new(Vec::new()), reply: Err(LlmError::MissingApiKey) })
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl ChatClient for MockChatClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.reply {
            Ok(text) => Ok(CompletionResponse { response: text.clone() }),
            Err(LlmError::Status { status, body }) => {
                Err(LlmError::Status { status: *status, body: body.clone() })
            }
            Err(_) => Err(LlmError::MissingApiKey),
        }
    }

    fn get_model(&self) -> String {
        "mock-model".into()
    }

    fn get_base_url(&self) -> Option<String> {
        None
    }
}

pub fn app_state(client: Arc<MockChatClient>, production: bool) -> AppState {
    AppState {
        relay: ChatRelay::new(client, "You are a test assistant."),
        production,
        environment: if production { "production".into() } else { "development".into() },
    }
}

pub fn static_dir() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp directory");
    std::fs::write(dir.path().join("index.html"), INDEX_HTML).expect("Failed to write index.html");
    std::fs::write(dir.path().join("app.js"), "console.log('hi');").expect("Failed to write app.js");
    dir
}

/// Relay double for the client controller. When gated, every call waits
/// until `release` is called.
pub struct ScriptedRelay {
    pub calls: Mutex<Vec<(String, String)>>,
    reply: Option<String>,
    gate: Option<Arc<Notify>>,
}

impl ScriptedRelay {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self { calls: Mutex::new(Vec::new()), reply: Some(text.into()), gate: None })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self { calls: Mutex::new(Vec::new()), reply: None, gate: None })
    }

    pub fn gated(text: &str, gate: Arc<Notify>) -> Arc<Self> {
        Arc::new(Self { calls: Mutex::new(Vec::new()), reply: Some(text.into()), gate: Some(gate) })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl RelayApi for ScriptedRelay {
    async fn send(&self, message: &str, chat_id: &str) -> Result<String, RelayClientError> {
        self.calls.lock().unwrap().push((message.to_string(), chat_id.to_string()));
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        match &self.reply {
            Some(text) => Ok(text.clone()),
            None => Err(RelayClientError::Status { status: 500, error: Some("Failed".into()) }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Message(Bubble, String),
    ClearTranscript,
    Welcome(usize),
    Sidebar(Vec<SidebarEntry>),
    ClearInput,
    CharCount(CharCount),
    Busy(bool),
    Focus,
}

#[derive(Default)]
pub struct RecordingPresenter {
    pub events: Mutex<Vec<UiEvent>>,
}

impl RecordingPresenter {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<UiEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn bubbles(&self) -> Vec<(Bubble, String)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                UiEvent::Message(bubble, text) => Some((bubble, text)),
                _ => None,
            })
            .collect()
    }

    pub fn last_sidebar(&self) -> Option<Vec<SidebarEntry>> {
        self.events().into_iter().rev().find_map(|e| match e {
            UiEvent::Sidebar(entries) => Some(entries),
            _ => None,
        })
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }

    fn push(&self, event: UiEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl Presenter for RecordingPresenter {
    fn append_message(&self, bubble: Bubble, content: &str) {
        self.push(UiEvent::Message(bubble, content.to_string()));
    }

    fn clear_transcript(&self) {
        self.push(UiEvent::ClearTranscript);
    }

    fn show_welcome(&self, suggestions: &[Suggestion]) {
        self.push(UiEvent::Welcome(suggestions.len()));
    }

    fn render_sidebar(&self, entries: &[SidebarEntry]) {
        self.push(UiEvent::Sidebar(entries.to_vec()));
    }

    fn clear_input(&self) {
        self.push(UiEvent::ClearInput);
    }

    fn update_char_count(&self, count: &CharCount) {
        self.push(UiEvent::CharCount(*count));
    }

    fn set_busy(&self, busy: bool) {
        self.push(UiEvent::Busy(busy));
    }

    fn focus_input(&self) {
        self.push(UiEvent::Focus);
    }
}
