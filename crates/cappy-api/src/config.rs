use cappy_context::{Persona, SelectorConfig, SelectorStrategy, DEFAULT_CORPUS_PATH};
use cappy_llm::GenerateOptions;
use config::{Config as ConfigLoader, ConfigError, File};
use serde::Deserialize;
use std::path::Path;

/// Environment variable to config key
pub const ENV_OVERRIDES: [(&str, &str); 13] = [
    ("SERVER_HOST", "server.host"),
    ("SERVER_PORT", "server.port"),
    ("LLM_MODEL", "llm.model"),
    ("LLM_TEMPERATURE", "llm.temperature"),
    ("LLM_MAX_OUTPUT_TOKENS", "llm.max_output_tokens"),
    ("LLM_REQUEST_TIMEOUT_SECS", "llm.request_timeout_secs"),
    ("LLM_BASE_URL", "llm.base_url"),
    ("CONTEXT_STRATEGY", "context.strategy"),
    ("CONTEXT_TOP_K", "context.top_k"),
    ("CONTEXT_FALLBACK_CHARS", "context.fallback_chars"),
    ("CONTEXT_CORPUS_PATH", "context.corpus_path"),
    ("LOG_LEVEL", "logging.level"),
    ("LOG_FORMAT", "logging.format"),
];

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub llm: LlmConfig,
    #[serde(default)]
    pub context: ContextConfig,
    #[serde(default)]
    pub persona: Persona,
    pub logging: LoggingConfig,

    // Secrets (from ENV only)
    #[serde(default)]
    pub google_api_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    pub enabled: bool,
    pub origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// Empty means the first preferred Gemini model
    #[serde(default)]
    pub model: String,
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<u32>,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    pub base_url: Option<String>,
}

fn default_request_timeout() -> u64 {
    60
}

impl LlmConfig {
    pub fn generate_options(&self) -> GenerateOptions {
        GenerateOptions {
            temperature: self.temperature,
            max_output_tokens: self.max_output_tokens,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContextConfig {
    #[serde(default)]
    pub strategy: SelectorStrategy,
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    #[serde(default = "default_fallback_chars")]
    pub fallback_chars: usize,
    #[serde(default = "default_corpus_path")]
    pub corpus_path: String,
}

fn default_top_k() -> usize {
    cappy_context::DEFAULT_TOP_K
}

fn default_fallback_chars() -> usize {
    cappy_context::DEFAULT_FALLBACK_CHARS
}

fn default_corpus_path() -> String {
    DEFAULT_CORPUS_PATH.to_string()
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            strategy: SelectorStrategy::default(),
            top_k: default_top_k(),
            fallback_chars: default_fallback_chars(),
            corpus_path: default_corpus_path(),
        }
    }
}

impl ContextConfig {
    pub fn selector_config(&self) -> SelectorConfig {
        SelectorConfig {
            strategy: self.strategy,
            top_k: self.top_k,
            fallback_chars: self.fallback_chars,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Config {
    /// Load configuration from TOML files and environment variables
    ///
    /// Hierarchy (weakest to strongest):
    /// 1. config/default.toml
    /// 2. config/{ENV}.toml (if ENV is set)
    /// 3. Environment variables listed in [`ENV_OVERRIDES`]
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("ENV").unwrap_or_else(|_| "dev".to_string());

        let mut builder = ConfigLoader::builder()
            // 1. Load default config
            .add_source(File::with_name("config/default").required(false))
            // 2. Load environment-specific config
            .add_source(File::with_name(&format!("config/{}", env)).required(false));

        // 3. Environment variables override everything
        for (var, key) in ENV_OVERRIDES {
            builder = builder.set_override_option(key, std::env::var(var).ok())?;
        }

        let mut cfg: Config = builder.build()?.try_deserialize()?;

        // Optional secret; without it the assistant answers with a fallback message
        cfg.google_api_key = std::env::var("GOOGLE_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());

        Ok(cfg)
    }

    /// Load config from a specific path (useful for testing)
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let builder = ConfigLoader::builder().add_source(File::from(path.as_ref()));

        let config = builder.build()?;
        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOML: &str = r#"
        [server]
        host = "127.0.0.1"
        port = 8501

        [cors]
        enabled = true
        origins = ["http://localhost:3000"]

        [llm]
        model = "gemini-pro"
        temperature = 0.5
        request_timeout_secs = 30

        [context]
        strategy = "tfidf"
        top_k = 5

        [logging]
        level = "debug"
        format = "json"
    "#;

    #[test]
    fn test_config_structure() {
        let config: Config = toml::from_str(TOML).unwrap();
        assert_eq!(config.server.port, 8501);
        assert_eq!(config.llm.model, "gemini-pro");
        assert_eq!(config.context.strategy, SelectorStrategy::TfIdf);
        assert_eq!(config.context.top_k, 5);
        assert_eq!(config.context.fallback_chars, 1000);
        assert_eq!(config.context.corpus_path, "data/capserve_info.txt");
        assert_eq!(config.persona.assistant_name, "Cappy");
        assert!(config.google_api_key.is_none());
    }

    #[test]
    fn test_generate_options_from_llm_config() {
        let config: Config = toml::from_str(TOML).unwrap();
        let options = config.llm.generate_options();
        assert_eq!(options.temperature, Some(0.5));
        assert_eq!(options.max_output_tokens, None);
    }

    #[test]
    fn test_context_defaults_when_section_missing() {
        let toml = TOML.replace("[context]\n        strategy = \"tfidf\"\n        top_k = 5\n", "");
        let config: Config = toml::from_str(&toml).unwrap();
        assert_eq!(config.context.strategy, SelectorStrategy::Lexical);
        assert_eq!(config.context.selector_config().top_k, 3);
    }

    #[test]
    fn test_default_file_loads() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/default.toml");
        let config = Config::from_file(path).unwrap();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.context.strategy, SelectorStrategy::Lexical);
        assert_eq!(config.context.fallback_chars, 1000);
        assert_eq!(config.persona.company_name, "CapServ Digital Lending");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_env_overrides_target_existing_sections() {
        for (_, key) in ENV_OVERRIDES {
            let section = key.split('.').next().unwrap();
            assert!(["server", "llm", "context", "logging"].contains(&section));
        }
    }
}
