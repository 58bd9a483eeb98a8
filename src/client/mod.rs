pub mod presenter;
pub mod relay;
pub mod session;
pub mod terminal;

use log::{ debug, error, info };
use std::sync::{ Arc, Mutex, MutexGuard, PoisonError };

use crate::history::ConversationLog;
use crate::models::chat::Conversation;
use self::presenter::{ Bubble, CharCount, Presenter, SidebarEntry, SUGGESTIONS };
use self::relay::RelayApi;
use self::session::{ generate_chat_id, SessionState };

/// Shown in place of the assistant reply whenever the relay call fails.
pub const FALLBACK_REPLY: &str = "Sorry, I encountered an error. Please try again later.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Empty input, or another send was still in flight.
    Ignored,
    Delivered(String),
    Failed,
}

/// UI intents, as produced by buttons, key presses or terminal commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    SendMessage(String),
    UseSuggestion(usize),
    NewConversation,
    LoadConversation(String),
    InputChanged(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Sent(SendOutcome),
    Started(String),
    Loaded(bool),
    CounterUpdated(CharCount),
}

/// Ends a send when it finishes or its future is dropped: clears the
/// in-flight flag and gives the input back to the user.
struct InFlight<'a> {
    controller: &'a ChatController,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.controller.session().is_processing = false;
        self.controller.presenter.set_busy(false);
        self.controller.presenter.focus_input();
    }
}

pub struct ChatController {
    state: Mutex<SessionState>,
    relay: Arc<dyn RelayApi>,
    history: ConversationLog,
    presenter: Arc<dyn Presenter>,
}

impl ChatController {
    pub fn new(
        relay: Arc<dyn RelayApi>,
        history: ConversationLog,
        presenter: Arc<dyn Presenter>
    ) -> Self {
        Self {
            state: Mutex::new(SessionState::new()),
            relay,
            history,
            presenter,
        }
    }

    fn session(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn session_state(&self) -> SessionState {
        self.session().clone()
    }

    pub fn active_chat_id(&self) -> String {
        self.session().active_chat_id.clone()
    }

    /// Initial screen: welcome placeholder plus the stored conversation list.
    pub async fn start(&self) {
        self.presenter.show_welcome(&SUGGESTIONS);
        self.render_sidebar().await;
    }

    pub async fn dispatch(&self, command: UiCommand) -> CommandOutcome {
        match command {
            UiCommand::SendMessage(text) => CommandOutcome::Sent(self.send_message(&text).await),
            UiCommand::UseSuggestion(index) => {
                let outcome = match SUGGESTIONS.get(index) {
                    Some(suggestion) => self.send_message(suggestion.prompt).await,
                    None => SendOutcome::Ignored,
                };
                CommandOutcome::Sent(outcome)
            }
            UiCommand::NewConversation => CommandOutcome::Started(self.start_new_conversation().await),
            UiCommand::LoadConversation(id) => CommandOutcome::Loaded(self.load_conversation(&id).await),
            UiCommand::InputChanged(text) => CommandOutcome::CounterUpdated(self.on_input_changed(&text)),
        }
    }

    fn try_begin_send(&self) -> Option<(InFlight<'_>, String)> {
        let mut state = self.session();
        if state.is_processing {
            return None;
        }
        state.is_processing = true;
        let chat_id = state.active_chat_id.clone();
        drop(state);
        Some((InFlight { controller: self }, chat_id))
    }

    /// One send cycle: Idle -> Sending -> Success | Failure -> Idle.
    pub async fn send_message(&self, input: &str) -> SendOutcome {
        let message = input.trim();
        if message.is_empty() {
            return SendOutcome::Ignored;
        }
        let (in_flight, chat_id) = match self.try_begin_send() {
            Some(started) => started,
            None => {
                debug!("Send ignored: a request is already in flight");
                return SendOutcome::Ignored;
            }
        };

        self.presenter.set_busy(true);
        self.presenter.append_message(Bubble::User, message);
        self.presenter.clear_input();
        self.presenter.update_char_count(&CharCount::of(""));

        let outcome = match self.relay.send(message, &chat_id).await {
            Ok(response) => {
                self.presenter.append_message(Bubble::Assistant, &response);
                self.persist_exchange(&chat_id, message, &response).await;
                SendOutcome::Delivered(response)
            }
            Err(e) => {
                error!("Relay request for {} failed: {}", chat_id, e);
                self.presenter.append_message(Bubble::Assistant, FALLBACK_REPLY);
                SendOutcome::Failed
            }
        };

        drop(in_flight);
        outcome
    }

    async fn persist_exchange(&self, chat_id: &str, user_message: &str, assistant_message: &str) {
        if let Err(e) = self.history.record_exchange(chat_id, user_message, assistant_message).await {
            error!("Failed to save conversation {}: {}", chat_id, e);
        }
        self.render_sidebar().await;
    }

    pub async fn start_new_conversation(&self) -> String {
        let chat_id = generate_chat_id();
        self.session().active_chat_id = chat_id.clone();
        info!("Started conversation {}", chat_id);

        self.presenter.clear_transcript();
        self.presenter.show_welcome(&SUGGESTIONS);
        self.render_sidebar().await;
        chat_id
    }

    /// Redraws the transcript of a stored conversation. Unknown ids leave
    /// everything untouched and return false.
    pub async fn load_conversation(&self, chat_id: &str) -> bool {
        let conversation = match self.history.find(chat_id).await {
            Some(c) => c,
            None => {
                debug!("No stored conversation with id {}", chat_id);
                return false;
            }
        };

        self.session().active_chat_id = conversation.id.clone();
        self.presenter.clear_transcript();
        for message in &conversation.messages {
            self.presenter.append_message(Bubble::for_role(&message.role), &message.content);
        }
        self.render_sidebar().await;
        true
    }

    pub fn on_input_changed(&self, input: &str) -> CharCount {
        let count = CharCount::of(input);
        self.presenter.update_char_count(&count);
        count
    }

    pub async fn conversations(&self) -> Vec<Conversation> {
        self.history.list().await
    }

    async fn render_sidebar(&self) {
        let active = self.active_chat_id();
        let entries: Vec<SidebarEntry> = self.history
            .list().await
            .into_iter()
            .map(|c| SidebarEntry {
                active: c.id == active,
                id: c.id,
                title: c.title,
            })
            .collect();
        self.presenter.render_sidebar(&entries);
    }
}
