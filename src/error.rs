use thiserror::Error;
use crate::llm::chat::LlmError;

/// Everything a chat request can fail with. Nothing here escapes the HTTP
/// handler; each variant maps to exactly one status code.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Bad, missing or oversized input. Always 400.
    #[error("{0}")]
    Validation(String),

    /// Operator-fixable configuration problem such as a missing API key. 500.
    #[error("{0}")]
    Config(String),

    /// Transport failure or non-success answer from the completion API. 500.
    #[error("{0}")]
    Upstream(String),
}

impl RelayError {
    pub fn is_client_error(&self) -> bool {
        matches!(self, RelayError::Validation(_))
    }
}

impl From<LlmError> for RelayError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::MissingApiKey | LlmError::InvalidHeader { .. } => {
                RelayError::Config(err.to_string())
            }
            other => RelayError::Upstream(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_maps_to_config_error() {
        let err: RelayError = LlmError::MissingApiKey.into();
        assert!(matches!(err, RelayError::Config(_)));
        assert_eq!(err.to_string(), "OpenRouter API key is missing");
    }

    #[test]
    fn status_maps_to_upstream_error() {
        let err: RelayError = (LlmError::Status { status: 429, body: String::new() }).into();
        assert!(matches!(err, RelayError::Upstream(ref m) if m == "API error: 429"));
        assert!(!err.is_client_error());
    }
}
