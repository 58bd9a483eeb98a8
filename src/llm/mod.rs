pub mod chat;

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_MODEL: &str = "openai/gpt-3.5-turbo";

#[derive(Debug, Clone, Default)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub completion_model: Option<String>,
    pub base_url: Option<String>,
    /// Sent as `HTTP-Referer`; OpenRouter uses it to attribute traffic to the app.
    pub site_url: Option<String>,
    /// Sent as `X-Title`.
    pub site_title: Option<String>,
}

impl LlmConfig {
    pub fn from_args(args: &crate::cli::Args) -> Self {
        Self {
            api_key: args.api_key.clone().filter(|k| !k.trim().is_empty()),
            completion_model: Some(args.model.clone()).filter(|m| !m.is_empty()),
            base_url: Some(args.chat_base_url.clone()).filter(|u| !u.is_empty()),
            site_url: Some(args.site_url.clone()).filter(|u| !u.is_empty()),
            site_title: Some(args.site_title.clone()).filter(|t| !t.is_empty()),
        }
    }
}
