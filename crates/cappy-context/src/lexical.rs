use crate::strategy::{fallback_snippet, ContextSelector, DEFAULT_FALLBACK_CHARS, DEFAULT_TOP_K};
use crate::tokenize::{normalize_tokens, split_sentences};

/// Sentence ranking by lexical overlap with the query.
///
/// Each sentence is scored as `|query ∩ sentence| / |sentence|` over distinct
/// normalized tokens. The score is normalized by sentence length only, so
/// short sentences that are mostly query words rank first.
#[derive(Debug, Clone)]
pub struct LexicalSelector {
    top_k: usize,
    fallback_chars: usize,
}

impl Default for LexicalSelector {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_K)
    }
}

impl LexicalSelector {
    pub fn new(top_k: usize) -> Self {
        Self {
            top_k,
            fallback_chars: DEFAULT_FALLBACK_CHARS,
        }
    }

    pub fn with_fallback_chars(mut self, fallback_chars: usize) -> Self {
        self.fallback_chars = fallback_chars.max(1);
        self
    }

    /// Sentences with their scores, best first; equal scores keep corpus order
    pub fn rank<'c>(&self, query: &str, corpus: &'c str) -> Vec<(f64, &'c str)> {
        let query_tokens = normalize_tokens(query);

        let mut scored: Vec<(f64, &str)> = split_sentences(corpus)
            .into_iter()
            .map(|sentence| {
                let tokens = normalize_tokens(sentence);
                let score = if tokens.is_empty() {
                    0.0
                } else {
                    let overlap = tokens.intersection(&query_tokens).count();
                    overlap as f64 / tokens.len() as f64
                };
                (score, sentence)
            })
            .collect();

        // sort_by is stable
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));
        scored
    }
}

impl ContextSelector for LexicalSelector {
    fn select(&self, query: &str, corpus: &str) -> String {
        let ranked = self.rank(query, corpus);

        let relevant: Vec<&str> = ranked
            .iter()
            .take(self.top_k)
            .filter(|(score, _)| *score > 0.0)
            .map(|(_, sentence)| *sentence)
            .collect();

        tracing::debug!(
            candidates = ranked.len(),
            selected = relevant.len(),
            top_score = ranked.first().map(|(s, _)| *s).unwrap_or(0.0),
            "Lexical context selection"
        );

        if relevant.is_empty() {
            fallback_snippet(corpus, self.fallback_chars)
        } else {
            relevant.join(" ")
        }
    }

    fn name(&self) -> &'static str {
        "lexical"
    }
}
