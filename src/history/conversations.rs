use log::{ error, warn };
use std::sync::Arc;
use crate::history::{ HistoryError, HistoryStore };
use crate::models::chat::Conversation;

/// Key under which the whole conversation list is stored as one JSON blob.
pub const STORAGE_KEY: &str = "chatHistory";

/// Only the most recently created conversations are kept.
pub const MAX_CONVERSATIONS: usize = 10;

/// Most-recent-first list of conversations on top of a [`HistoryStore`].
#[derive(Clone)]
pub struct ConversationLog {
    store: Arc<dyn HistoryStore>,
}

impl ConversationLog {
    pub fn new(store: Arc<dyn HistoryStore>) -> Self {
        Self { store }
    }

    /// Reads the stored list. A store failure or a blob that does not parse
    /// reads as an empty history.
    pub async fn list(&self) -> Vec<Conversation> {
        let blob = match self.store.load(STORAGE_KEY).await {
            Ok(Some(blob)) => blob,
            Ok(None) => return Vec::new(),
            Err(e) => {
                error!("Failed to load chat history: {}", e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Conversation>>(&blob) {
            Ok(conversations) => conversations,
            Err(e) => {
                warn!("Ignoring unreadable chat history: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn find(&self, chat_id: &str) -> Option<Conversation> {
        self.list().await.into_iter().find(|c| c.id == chat_id)
    }

    /// Appends one user/assistant exchange to `chat_id`, creating the
    /// conversation at the front of the list when it does not exist yet.
    /// Existing conversations keep their position. Returns the stored list.
    pub async fn record_exchange(
        &self,
        chat_id: &str,
        user_message: &str,
        assistant_message: &str
    ) -> Result<Vec<Conversation>, HistoryError> {
        let mut conversations = self.list().await;

        match conversations.iter_mut().find(|c| c.id == chat_id) {
            Some(existing) => existing.push_exchange(user_message, assistant_message),
            None => {
                let mut created = Conversation::start(chat_id, user_message);
                created.push_exchange(user_message, assistant_message);
                conversations.insert(0, created);
            }
        }
        conversations.truncate(MAX_CONVERSATIONS);

        let blob = serde_json::to_string(&conversations)?;
        self.store.save(STORAGE_KEY, &blob).await?;
        Ok(conversations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::MemoryHistoryStore;
    use crate::models::chat::ChatMessage;

    fn memory_log() -> (ConversationLog, Arc<MemoryHistoryStore>) {
        let store = Arc::new(MemoryHistoryStore::new());
        (ConversationLog::new(store.clone()), store)
    }

    #[tokio::test]
    async fn first_exchange_creates_titled_conversation() {
        let (log, _) = memory_log();
        let stored = log.record_exchange("chat_1", "Hello", "Hi there!").await.unwrap();

        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, "chat_1");
        assert_eq!(stored[0].title, "Hello");
        assert_eq!(stored[0].messages, vec![
            ChatMessage::user("Hello"),
            ChatMessage::assistant("Hi there!"),
        ]);
    }

    #[tokio::test]
    async fn later_exchanges_update_in_place() {
        let (log, _) = memory_log();
        log.record_exchange("a", "first a", "1").await.unwrap();
        log.record_exchange("b", "first b", "2").await.unwrap();
        let stored = log.record_exchange("a", "second a", "3").await.unwrap();

        let ids: Vec<_> = stored.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(stored[1].title, "first a");
        assert_eq!(stored[1].messages.len(), 4);
        assert_eq!(stored[1].messages[2], ChatMessage::user("second a"));
    }

    #[tokio::test]
    async fn list_is_capped_and_oldest_evicted() {
        let (log, _) = memory_log();
        for i in 0..11 {
            log.record_exchange(&format!("chat_{}", i), "hi", "hello").await.unwrap();
        }

        let stored = log.list().await;
        assert_eq!(stored.len(), MAX_CONVERSATIONS);
        assert_eq!(stored[0].id, "chat_10");
        assert_eq!(stored[9].id, "chat_1");
        assert!(log.find("chat_0").await.is_none());
    }

    #[tokio::test]
    async fn corrupt_blob_reads_as_empty() {
        let (log, store) = memory_log();
        store.save(STORAGE_KEY, "{not json").await.unwrap();

        assert!(log.list().await.is_empty());
        let stored = log.record_exchange("chat_1", "Hello", "Hi").await.unwrap();
        assert_eq!(stored.len(), 1);
    }

    #[tokio::test]
    async fn unknown_roles_survive_a_round_trip() {
        let (log, store) = memory_log();
        let blob = r#"[{"id":"x","title":"t","timestamp":"2024-05-01T10:00:00.000Z",
            "messages":[{"role":"user","content":"q"},{"role":"tool","content":"r"}]}]"#;
        store.save(STORAGE_KEY, blob).await.unwrap();

        let found = log.find("x").await.unwrap();
        assert_eq!(found.messages[1].role, "tool");
        assert!(!found.messages[1].is_user());
    }
}
