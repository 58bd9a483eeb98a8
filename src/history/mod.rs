mod file;
mod memory;
mod redis;
pub mod conversations;

use async_trait::async_trait;
use log::info;
use std::sync::Arc;
use thiserror::Error;
use crate::cli::ClientArgs;

pub use conversations::{ ConversationLog, MAX_CONVERSATIONS, STORAGE_KEY };
pub use file::FileHistoryStore;
pub use memory::MemoryHistoryStore;
pub use self::redis::RedisHistoryStore;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("History file IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Redis history error: {0}")]
    Redis(#[from] ::redis::RedisError),

    #[error("History JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported history store type: {0}")]
    UnsupportedType(String),
}

/// Blob storage keyed by string. Stands in for the browser's local storage:
/// one serialized value per key, last write wins.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    async fn load(&self, key: &str) -> Result<Option<String>, HistoryError>;

    async fn save(&self, key: &str, blob: &str) -> Result<(), HistoryError>;
}

pub fn create_history_store(
    args: &ClientArgs
) -> Result<Arc<dyn HistoryStore>, HistoryError> {
    match args.history_type.to_lowercase().as_str() {
        "file" => {
            let store = FileHistoryStore::new(&args.history_path)?;
            Ok(Arc::new(store))
        }
        "memory" => Ok(Arc::new(MemoryHistoryStore::new())),
        "redis" => {
            let store = RedisHistoryStore::new(&args.history_host, &args.history_redis_prefix)?;
            Ok(Arc::new(store))
        }
        _ => Err(HistoryError::UnsupportedType(args.history_type.clone())),
    }
}

pub fn initialize_history_store(
    args: &ClientArgs
) -> Result<Arc<dyn HistoryStore>, HistoryError> {
    let location = match args.history_type.to_lowercase().as_str() {
        "file" => args.history_path.as_str(),
        "redis" => args.history_host.as_str(),
        _ => "process memory",
    };
    info!("Chat history will be stored in: {} at {}", args.history_type, location);
    create_history_store(args)
}
