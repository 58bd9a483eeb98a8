pub mod openrouter;

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use super::LlmConfig;
use self::openrouter::OpenRouterChatClient;
use crate::models::chat::ChatMessage;

pub const DEFAULT_MAX_TOKENS: u32 = 1000;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("OpenRouter API key is missing")]
    MissingApiKey,

    #[error("Invalid header value for {name}: {reason}")]
    InvalidHeader { name: &'static str, reason: String },

    #[error("API error: {status}")]
    Status { status: u16, body: String },

    #[error("No response from completion API")]
    EmptyResponse,

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl CompletionRequest {
    /// A single-turn request: the system instruction followed by one user turn.
    pub fn single_turn(system_prompt: &str, user_message: &str) -> Self {
        Self {
            messages: vec![ChatMessage::system(system_prompt), ChatMessage::user(user_message)],
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionResponse {
    pub response: String,
}

#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError>;

    fn get_model(&self) -> String;
    fn get_base_url(&self) -> Option<String>;
}

pub fn new_client(config: &LlmConfig) -> Result<Arc<dyn ChatClient>, LlmError> {
    let client = OpenRouterChatClient::from_config(config)?;
    Ok(Arc::new(client))
}
