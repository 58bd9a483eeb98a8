use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use crate::history::{ HistoryError, HistoryStore };

/// Keeps blobs for the lifetime of the process only.
#[derive(Default)]
pub struct MemoryHistoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HistoryStore for MemoryHistoryStore {
    async fn load(&self, key: &str) -> Result<Option<String>, HistoryError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn save(&self, key: &str, blob: &str) -> Result<(), HistoryError> {
        self.entries.write().await.insert(key.to_string(), blob.to_string());
        Ok(())
    }
}
