use crate::cli::Args;
use crate::config::prompt;
use crate::error::RelayError;
use crate::llm::chat::{ ChatClient, CompletionRequest, new_client as new_chat_client };
use crate::llm::LlmConfig;

use log::{ info, warn };
use std::error::Error;
use std::sync::Arc;

/// Upper bound on the user message, counted in characters.
pub const MAX_MESSAGE_CHARS: usize = 1000;

/// Forwards one user message to the completion API per call. Holds no
/// per-request state, so clones can serve requests concurrently.
#[derive(Clone)]
pub struct ChatRelay {
    chat_client: Arc<dyn ChatClient>,
    system_prompt: Arc<str>,
}

impl ChatRelay {
    pub fn new(chat_client: Arc<dyn ChatClient>, system_prompt: impl Into<Arc<str>>) -> Self {
        Self {
            chat_client,
            system_prompt: system_prompt.into(),
        }
    }

    pub fn from_args(args: &Args) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let llm_config = LlmConfig::from_args(args);
        if llm_config.api_key.is_none() {
            warn!("No completion API key configured. Chat requests will fail until one is provided.");
        }
        let chat_client = new_chat_client(&llm_config)?;
        info!(
            "Chat client configured: Model={}, BaseURL={}",
            chat_client.get_model(),
            chat_client.get_base_url().as_deref().unwrap_or("adapter default")
        );

        let system_prompt = prompt::resolve_system_prompt(args.system_prompt_path.as_deref())?;
        Ok(Self::new(chat_client, system_prompt))
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn model(&self) -> String {
        self.chat_client.get_model()
    }

    pub async fn process_message(&self, message: &str) -> Result<String, RelayError> {
        let request = CompletionRequest::single_turn(&self.system_prompt, message);
        let completion = self.chat_client.complete(&request).await?;
        Ok(completion.response)
    }
}

pub fn validate_message(message: Option<&str>) -> Result<&str, RelayError> {
    let message = match message {
        Some(m) if !m.is_empty() => m,
        _ => return Err(RelayError::Validation("Message is required".to_string())),
    };
    if message.chars().count() > MAX_MESSAGE_CHARS {
        return Err(RelayError::Validation("Message too long".to_string()));
    }
    Ok(message)
}
