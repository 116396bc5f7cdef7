mod client;
pub mod types;

pub use client::{GeminiClient, GeminiClientBuilder, GEMINI_API_BASE};
