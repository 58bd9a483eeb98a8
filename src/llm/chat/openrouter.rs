use async_trait::async_trait;
use log::{ error, info };
use reqwest::{Client as HttpClient, header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE, AUTHORIZATION}};
use serde::{Deserialize, Serialize};

use super::{ChatClient, CompletionRequest, CompletionResponse, LlmError};
use crate::llm::{LlmConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::models::chat::ChatMessage;

/// Client for OpenRouter and any other endpoint speaking the OpenAI
/// `chat/completions` wire format.
pub struct OpenRouterChatClient {
    http: HttpClient,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

#[derive(Serialize)]
struct OpenRouterChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct OpenRouterResponse {
    #[serde(default)]
    choices: Vec<OpenRouterChoice>,
}

#[derive(Deserialize)]
struct OpenRouterChoice {
    message: OpenRouterMessage,
}

#[derive(Deserialize)]
struct OpenRouterMessage {
    #[serde(default)]
    content: Option<String>,
}

fn header_value(name: &'static str, value: &str) -> Result<HeaderValue, LlmError> {
    HeaderValue::from_str(value).map_err(|e| LlmError::InvalidHeader {
        name,
        reason: e.to_string(),
    })
}

impl OpenRouterChatClient {
    pub fn new(
        api_key: Option<String>,
        model: Option<String>,
        base_url: Option<String>,
        site_url: Option<String>,
        site_title: Option<String>,
    ) -> Result<Self, LlmError> {
        let chat_model = model.unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let api_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(site_url) = site_url.as_deref() {
            headers.insert(HeaderName::from_static("http-referer"), header_value("HTTP-Referer", site_url)?);
        }
        if let Some(site_title) = site_title.as_deref() {
            headers.insert(HeaderName::from_static("x-title"), header_value("X-Title", site_title)?);
        }
        // Validated here so a malformed key fails at startup rather than per request.
        if let Some(key) = api_key.as_deref() {
            header_value("Authorization", &format!("Bearer {}", key))?;
        }

        let http = HttpClient::builder().default_headers(headers).build()?;

        Ok(Self {
            http,
            api_key,
            model: chat_model,
            base_url: api_url,
        })
    }

    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        Self::new(
            config.api_key.clone(),
            config.completion_model.clone(),
            config.base_url.clone(),
            config.site_url.clone(),
            config.site_title.clone(),
        )
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ChatClient for OpenRouterChatClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let api_key = self.api_key.as_deref().ok_or(LlmError::MissingApiKey)?;
        info!("Calling completion API at {} with model {}", self.base_url, self.model);

        let req = OpenRouterChatRequest {
            model: &self.model,
            messages: &request.messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let resp = self.http.post(self.completions_url())
            .header(AUTHORIZATION, format!("Bearer {}", api_key))
            .json(&req)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            error!("Completion API error: {} {}", status.as_u16(), body);
            return Err(LlmError::Status { status: status.as_u16(), body });
        }

        let data = resp.json::<OpenRouterResponse>().await?;
        let content = data.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(LlmError::EmptyResponse)?;

        Ok(CompletionResponse { response: content })
    }

    fn get_model(&self) -> String {
        self.model.clone()
    }

    fn get_base_url(&self) -> Option<String> {
        Some(self.base_url.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completions_url_tolerates_trailing_slash() {
        let client = OpenRouterChatClient::new(
            Some("key".into()),
            None,
            Some("http://localhost:9000/v1/".into()),
            None,
            None,
        ).unwrap();
        assert_eq!(client.completions_url(), "http://localhost:9000/v1/chat/completions");
    }

    #[test]
    fn defaults_apply_when_config_is_empty() {
        let client = OpenRouterChatClient::from_config(&LlmConfig::default()).unwrap();
        assert_eq!(client.get_model(), DEFAULT_MODEL);
        assert_eq!(client.get_base_url().as_deref(), Some(DEFAULT_BASE_URL));
    }

    #[test]
    fn rejects_header_values_with_newlines() {
        let result = OpenRouterChatClient::new(
            None,
            None,
            None,
            Some("http://example.com\nInjected: yes".into()),
            None,
        );
        assert!(matches!(result, Err(LlmError::InvalidHeader { name: "HTTP-Referer", .. })));
    }

    #[tokio::test]
    async fn missing_api_key_fails_before_any_request() {
        let client = OpenRouterChatClient::new(
            None,
            None,
            Some("http://127.0.0.1:9".into()),
            None,
            None,
        ).unwrap();

        let err = client
            .complete(&CompletionRequest::single_turn("system", "hi"))
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::MissingApiKey));
    }
}
