use std::error::Error;
use std::fmt;
use std::fs;
use std::path::Path;
use log::info;

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful, professional AI assistant. \
Provide clear, concise, and accurate responses. \
Be friendly but maintain professionalism. \
If you're unsure about something, admit it rather than guessing. \
Format your responses in a readable way with proper paragraphs.";

#[derive(Debug)]
pub enum PromptError {
    Empty(String),
    IoError(std::io::Error),
}

impl fmt::Display for PromptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromptError::Empty(path) => write!(f, "System prompt file '{}' is empty", path),
            PromptError::IoError(e) => write!(f, "Prompt file IO error: {}", e),
        }
    }
}

impl Error for PromptError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PromptError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PromptError {
    fn from(err: std::io::Error) -> Self {
        PromptError::IoError(err)
    }
}

pub fn load_system_prompt<P: AsRef<Path>>(path: P) -> Result<String, PromptError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(PromptError::Empty(path.display().to_string()));
    }
    info!("Loaded system prompt override from {}", path.display());
    Ok(trimmed.to_string())
}

/// The override file when one is configured, the built-in persona otherwise.
pub fn resolve_system_prompt(path: Option<&str>) -> Result<String, PromptError> {
    match path.filter(|p| !p.trim().is_empty()) {
        Some(p) => load_system_prompt(p),
        None => Ok(DEFAULT_SYSTEM_PROMPT.to_string()),
    }
}
