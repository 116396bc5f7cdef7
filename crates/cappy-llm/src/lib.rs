pub mod config;
pub mod error;
pub mod gemini;
pub mod traits;

pub use config::{
    resolve_model, ClientFactory, GeminiConfig, ProviderConfig, ProviderType, DEFAULT_MODEL,
};
pub use error::{LlmError, Result};
pub use gemini::GeminiClient;
pub use traits::{ChatClient, GenerateOptions, GenerateRequest, GenerateResponse, TokenUsage};
