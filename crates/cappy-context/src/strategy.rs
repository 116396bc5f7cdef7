use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::lexical::LexicalSelector;
use crate::tfidf::{TfIdfSelector, TfIdfSettings};

pub const DEFAULT_TOP_K: usize = 3;
pub const DEFAULT_FALLBACK_CHARS: usize = 1000;

/// Strategy for picking the corpus snippet that goes into the prompt
///
/// Implementations are pure: same `(query, corpus)` in, same snippet out, and
/// the result is never empty when the corpus is not.
pub trait ContextSelector: Send + Sync {
    /// Select the snippet of `corpus` most relevant to `query`
    fn select(&self, query: &str, corpus: &str) -> String;

    /// Short strategy name, used in logs and health output
    fn name(&self) -> &'static str;
}

/// Which selector implementation to build
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectorStrategy {
    /// Sentence ranking by word overlap
    #[default]
    Lexical,
    /// Overlapping word windows ranked by TF-IDF cosine similarity
    #[serde(rename = "tfidf", alias = "tf_idf")]
    TfIdf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectorConfig {
    #[serde(default)]
    pub strategy: SelectorStrategy,
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    #[serde(default = "default_fallback_chars")]
    pub fallback_chars: usize,
    #[serde(default)]
    pub tfidf: TfIdfSettings,
}

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

fn default_fallback_chars() -> usize {
    DEFAULT_FALLBACK_CHARS
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            strategy: SelectorStrategy::default(),
            top_k: DEFAULT_TOP_K,
            fallback_chars: DEFAULT_FALLBACK_CHARS,
            tfidf: TfIdfSettings::default(),
        }
    }
}

/// Build the configured selector
pub fn build_selector(config: &SelectorConfig) -> Arc<dyn ContextSelector> {
    match config.strategy {
        SelectorStrategy::Lexical => Arc::new(
            LexicalSelector::new(config.top_k).with_fallback_chars(config.fallback_chars),
        ),
        SelectorStrategy::TfIdf => Arc::new(
            TfIdfSelector::new(config.top_k)
                .with_settings(config.tfidf.clone())
                .with_fallback_chars(config.fallback_chars),
        ),
    }
}

/// First `max_chars` characters of the raw corpus (all of it if shorter)
///
/// At least one character is kept so a non-empty corpus never yields an
/// empty snippet.
pub fn fallback_snippet(corpus: &str, max_chars: usize) -> String {
    match corpus.char_indices().nth(max_chars.max(1)) {
        Some((byte_idx, _)) => corpus[..byte_idx].to_string(),
        None => corpus.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_short_corpus_is_unchanged() {
        assert_eq!(fallback_snippet("Tiny corpus.", 1000), "Tiny corpus.");
        assert_eq!(fallback_snippet("", 1000), "");
    }

    #[test]
    fn test_fallback_truncates_on_chars() {
        let corpus = "é".repeat(1500);
        let snippet = fallback_snippet(&corpus, 1000);
        assert_eq!(snippet.chars().count(), 1000);
        assert!(corpus.starts_with(&snippet));
    }

    #[test]
    fn test_zero_fallback_keeps_one_char() {
        assert_eq!(fallback_snippet("CapServ offers loans.", 0), "C");
        assert_eq!(fallback_snippet("", 0), "");

        let config: SelectorConfig = serde_json::from_str(r#"{"fallback_chars": 0}"#).unwrap();
        for strategy in [SelectorStrategy::Lexical, SelectorStrategy::TfIdf] {
            let selector = build_selector(&SelectorConfig { strategy, ..config.clone() });
            let selected = selector.select("zebra", "CapServ offers loans.");
            assert!(!selected.is_empty(), "{} returned an empty snippet", selector.name());
        }
    }

    #[test]
    fn test_default_config() {
        let config = SelectorConfig::default();
        assert_eq!(config.strategy, SelectorStrategy::Lexical);
        assert_eq!(config.top_k, 3);
        assert_eq!(config.fallback_chars, 1000);
    }

    #[test]
    fn test_config_deserialize_partial() {
        let config: SelectorConfig = serde_json::from_str(r#"{"strategy": "tfidf"}"#).unwrap();
        assert_eq!(config.strategy, SelectorStrategy::TfIdf);
        assert_eq!(config.top_k, DEFAULT_TOP_K);
    }

    #[test]
    fn test_build_selector_by_strategy() {
        let lexical = build_selector(&SelectorConfig::default());
        assert_eq!(lexical.name(), "lexical");

        let tfidf = build_selector(&SelectorConfig {
            strategy: SelectorStrategy::TfIdf,
            ..Default::default()
        });
        assert_eq!(tfidf.name(), "tfidf");
    }
}
