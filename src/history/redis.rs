use async_trait::async_trait;
use crate::history::{ HistoryError, HistoryStore };
use redis::{ Client, AsyncCommands };

pub struct RedisHistoryStore {
    client: Client,
    key_prefix: String,
}

impl RedisHistoryStore {
    pub fn new(host: &str, key_prefix: &str) -> Result<Self, HistoryError> {
        Ok(Self {
            client: Client::open(host)?,
            key_prefix: key_prefix.to_string(),
        })
    }

    async fn get_connection(&self) -> Result<redis::aio::MultiplexedConnection, redis::RedisError> {
        self.client.get_multiplexed_async_connection().await
    }

    fn key(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }
}

#[async_trait]
impl HistoryStore for RedisHistoryStore {
    async fn load(&self, key: &str) -> Result<Option<String>, HistoryError> {
        let mut conn = self.get_connection().await?;
        let blob: Option<String> = conn.get(self.key(key)).await?;
        Ok(blob)
    }

    async fn save(&self, key: &str, blob: &str) -> Result<(), HistoryError> {
        let mut conn = self.get_connection().await?;
        let _: () = conn.set(self.key(key), blob).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_prefixed() {
        let store = RedisHistoryStore::new("redis://127.0.0.1:6379", "relay-chat:").unwrap();
        assert_eq!(store.key("chatHistory"), "relay-chat:chatHistory");
    }

    #[test]
    fn invalid_url_is_rejected() {
        assert!(RedisHistoryStore::new("not a url", "p:").is_err());
    }
}
