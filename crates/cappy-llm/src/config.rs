// Configuration layer for provider-agnostic LLM client creation
// This module provides a factory pattern for creating LLM clients from configuration

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Gemini model used when none is configured (free-tier friendly)
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Type of LLM provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    #[default]
    Gemini,
}

/// Configuration for the Gemini provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    pub api_key: String,
    /// Base URL (optional, defaults to the public v1beta endpoint)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: None,
            timeout_secs: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }
}

/// Provider-specific configuration details
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProviderDetails {
    Gemini(GeminiConfig),
}

/// Complete provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(flatten)]
    pub details: ProviderDetails,
}

impl ProviderConfig {
    /// Create Gemini provider config
    pub fn gemini(config: GeminiConfig) -> Self {
        Self {
            details: ProviderDetails::Gemini(config),
        }
    }

    /// Get the provider type
    pub fn provider_type(&self) -> ProviderType {
        match self.details {
            ProviderDetails::Gemini(_) => ProviderType::Gemini,
        }
    }
}

/// Pick the model to use: the configured one if present, else [`DEFAULT_MODEL`]
pub fn resolve_model(configured: Option<&str>) -> String {
    configured
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .unwrap_or(DEFAULT_MODEL)
        .to_string()
}

/// Factory for creating LLM clients from configuration
pub struct ClientFactory;

impl ClientFactory {
    /// Create a chat client from provider configuration
    pub fn create_client(config: ProviderConfig) -> Result<Arc<dyn crate::traits::ChatClient>> {
        match config.details {
            ProviderDetails::Gemini(gemini) => {
                let mut builder = crate::gemini::GeminiClient::builder().api_key(gemini.api_key);
                if let Some(base_url) = gemini.base_url {
                    builder = builder.base_url(base_url);
                }
                if let Some(secs) = gemini.timeout_secs {
                    builder = builder.timeout(Duration::from_secs(secs));
                }
                Ok(Arc::new(builder.build()?))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gemini_config() {
        let config = ProviderConfig::gemini(GeminiConfig::new("test-key"));
        assert_eq!(config.provider_type(), ProviderType::Gemini);
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = ProviderConfig::gemini(
            GeminiConfig::new("test-key").with_base_url("http://localhost:8080"),
        );

        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"type\":\"gemini\""));

        let deserialized: ProviderConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config.provider_type(), deserialized.provider_type());
    }

    #[test]
    fn test_resolve_model() {
        assert_eq!(resolve_model(None), DEFAULT_MODEL);
        assert_eq!(resolve_model(Some("  ")), DEFAULT_MODEL);
        assert_eq!(resolve_model(Some(" gemini-1.0-pro ")), "gemini-1.0-pro");
        assert_eq!(resolve_model(Some("gemini-pro")), "gemini-pro");
    }

    #[test]
    fn test_factory_rejects_blank_key() {
        let result = ClientFactory::create_client(ProviderConfig::gemini(GeminiConfig::new("")));
        assert!(result.is_err());
    }
}
