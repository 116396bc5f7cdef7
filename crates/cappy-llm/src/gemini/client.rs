// Gemini-specific client implementation

use crate::error::{LlmError, Result};
use crate::gemini::types::{
    GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part, RequestContent,
};
use crate::traits::{ChatClient, GenerateOptions, GenerateRequest, GenerateResponse, TokenUsage};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use std::time::Duration;

pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Google Gemini client (HTTP direct, no SDK)
pub struct GeminiClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl GeminiClient {
    /// Create new client with API key and default settings
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder().api_key(api_key).build()
    }

    pub fn builder() -> GeminiClientBuilder {
        GeminiClientBuilder::default()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }

    /// Build `generateContent` payload
    fn build_request(&self, prompt: String, options: &GenerateOptions) -> GenerateContentRequest {
        let generation_config = (!options.is_empty()).then(|| GenerationConfig {
            temperature: options.temperature,
            max_output_tokens: options.max_output_tokens,
        });

        GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user".to_string(),
                parts: vec![Part { text: Some(prompt) }],
            }],
            generation_config,
        }
    }
}

#[async_trait]
impl ChatClient for GeminiClient {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse> {
        let url = self.endpoint(&request.model);
        let payload = self.build_request(request.prompt, &request.options);

        tracing::debug!(model = %request.model, "Sending generateContent request");

        let response = self.http_client.post(&url).json(&payload).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api { status, body });
        }

        let bytes = response.bytes().await?;
        let raw: GenerateContentResponse = serde_json::from_slice(&bytes)?;

        // Convert to provider-agnostic response
        Ok(GenerateResponse {
            text: raw.text(),
            usage: raw.usage_metadata.as_ref().map(|u| TokenUsage {
                input_tokens: u.prompt_token_count,
                output_tokens: u.candidates_token_count,
                total_tokens: u.total_token_count,
            }),
            finish_reason: raw.finish_reason(),
        })
    }

    fn provider(&self) -> &str {
        "gemini"
    }
}

#[derive(Debug, Default)]
pub struct GeminiClientBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl GeminiClientBuilder {
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Override the API base URL (defaults to the public v1beta endpoint)
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<GeminiClient> {
        let api_key = self
            .api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or(LlmError::MissingApiKey)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert("x-goog-api-key", HeaderValue::from_str(&api_key)?);

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(
                self.timeout
                    .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            )
            .build()?;

        let base_url = self
            .base_url
            .unwrap_or_else(|| GEMINI_API_BASE.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(GeminiClient {
            http_client,
            base_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_format() {
        let client = GeminiClient::builder()
            .api_key("test-key")
            .base_url("http://localhost:9999/v1beta/")
            .build()
            .unwrap();

        assert_eq!(
            client.endpoint("gemini-1.5-flash"),
            "http://localhost:9999/v1beta/models/gemini-1.5-flash:generateContent"
        );
    }

    #[test]
    fn test_build_request_with_options() {
        let client = GeminiClient::new("test-key").unwrap();
        let options = GenerateOptions::new().temperature(0.4).max_output_tokens(256);
        let payload = client.build_request("Hello".to_string(), &options);

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "Hello");
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 256);
    }
}
