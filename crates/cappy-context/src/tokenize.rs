use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static RE_NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").expect("valid regex"));
static RE_SENTENCE_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").expect("valid regex"));

/// Lowercase, strip punctuation and collect the distinct whitespace-separated tokens.
///
/// A query made only of punctuation yields an empty set.
pub fn normalize_tokens(text: &str) -> HashSet<String> {
    clean(text)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Lowercased text with every char that is neither a word char nor whitespace removed
pub(crate) fn clean(text: &str) -> String {
    RE_NON_WORD.replace_all(&text.to_lowercase(), "").into_owned()
}

/// Split on runs of `.`, `!` and `?`, trimming each piece and dropping blank ones.
///
/// Pieces come back in corpus order.
pub fn split_sentences(corpus: &str) -> Vec<&str> {
    RE_SENTENCE_END
        .split(corpus)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}
