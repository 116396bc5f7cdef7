use thiserror::Error;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("API key is required")]
    MissingApiKey,

    #[error("Invalid API key format")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Provider API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Failed to decode provider response: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LlmError>;
