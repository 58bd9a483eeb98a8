use async_trait::async_trait;
use reqwest::Client as HttpClient;
use thiserror::Error;
use url::Url;
use crate::models::api::{ ChatRequest, ChatResponse, ErrorResponse };

#[derive(Debug, Error)]
pub enum RelayClientError {
    #[error("Invalid relay URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("Relay answered {status}: {}", .error.as_deref().unwrap_or("Network error"))]
    Status { status: u16, error: Option<String> },
}

/// The client's view of the relay service.
#[async_trait]
pub trait RelayApi: Send + Sync {
    async fn send(&self, message: &str, chat_id: &str) -> Result<String, RelayClientError>;
}

pub struct HttpRelayClient {
    http: HttpClient,
    chat_url: Url,
}

impl HttpRelayClient {
    pub fn new(base_url: &str) -> Result<Self, RelayClientError> {
        let mut base = base_url.to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let chat_url = Url::parse(&base)?.join("api/chat")?;
        Ok(Self {
            http: HttpClient::new(),
            chat_url,
        })
    }

    pub fn chat_url(&self) -> &Url {
        &self.chat_url
    }
}

#[async_trait]
impl RelayApi for HttpRelayClient {
    async fn send(&self, message: &str, chat_id: &str) -> Result<String, RelayClientError> {
        let req = ChatRequest {
            message: Some(message.to_string()),
            chat_id: Some(chat_id.to_string()),
        };

        let resp = self.http.post(self.chat_url.clone()).json(&req).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let error = resp.json::<ErrorResponse>().await.ok().map(|e| e.error);
            return Err(RelayClientError::Status { status: status.as_u16(), error });
        }

        let data = resp.json::<ChatResponse>().await?;
        Ok(data.response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_url_is_joined_under_base_path() {
        let client = HttpRelayClient::new("http://127.0.0.1:3000").unwrap();
        assert_eq!(client.chat_url().as_str(), "http://127.0.0.1:3000/api/chat");

        let client = HttpRelayClient::new("https://example.com/chatbot").unwrap();
        assert_eq!(client.chat_url().as_str(), "https://example.com/chatbot/api/chat");
    }

    #[test]
    fn garbage_url_is_rejected() {
        let err = HttpRelayClient::new("not a url").err().unwrap();
        assert!(matches!(err, RelayClientError::InvalidUrl(_)));
    }

    #[test]
    fn status_error_falls_back_to_network_error_text() {
        let err = RelayClientError::Status { status: 500, error: None };
        assert_eq!(err.to_string(), "Relay answered 500: Network error");
    }
}
