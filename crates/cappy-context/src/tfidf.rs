use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::chunk::chunk_words;
use crate::error::VectorizeError;
use crate::stop_words::is_stop_word;
use crate::strategy::{fallback_snippet, ContextSelector, DEFAULT_FALLBACK_CHARS, DEFAULT_TOP_K};
use crate::tokenize::clean;

static RE_TERM: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("valid regex"));

/// Tuning knobs for [`TfIdfSelector`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TfIdfSettings {
    /// Words per chunk
    pub chunk_size: usize,
    /// Words shared by consecutive chunks
    pub chunk_overlap: usize,
    /// Vocabulary cap (most frequent terms win)
    pub max_features: usize,
    /// Chunks at or below this cosine similarity are discarded
    pub min_similarity: f64,
}

impl Default for TfIdfSettings {
    fn default() -> Self {
        Self {
            chunk_size: 500,
            chunk_overlap: 100,
            max_features: 1000,
            min_similarity: 0.1,
        }
    }
}

/// Chunk ranking by TF-IDF cosine similarity.
///
/// Suited to larger corpora where term weighting beats raw overlap. The query
/// is fitted together with the chunks, as one extra document.
#[derive(Debug, Clone)]
pub struct TfIdfSelector {
    top_k: usize,
    fallback_chars: usize,
    settings: TfIdfSettings,
}

impl Default for TfIdfSelector {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_K)
    }
}

impl TfIdfSelector {
    pub fn new(top_k: usize) -> Self {
        Self {
            top_k,
            fallback_chars: DEFAULT_FALLBACK_CHARS,
            settings: TfIdfSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: TfIdfSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_fallback_chars(mut self, fallback_chars: usize) -> Self {
        self.fallback_chars = fallback_chars.max(1);
        self
    }

    /// Select context, surfacing vectorizer failures instead of falling back.
    ///
    /// A corpus with no words at all is returned unchanged.
    pub fn try_select(&self, query: &str, corpus: &str) -> Result<String, VectorizeError> {
        let chunks = chunk_words(corpus, self.settings.chunk_size, self.settings.chunk_overlap);
        if chunks.is_empty() {
            return Ok(corpus.to_string());
        }

        let query_clean = clean(query);
        let mut documents: Vec<&str> = chunks.iter().map(String::as_str).collect();
        documents.push(&query_clean);

        let matrix = TfIdfMatrix::fit(&documents, self.settings.max_features)?;
        let query_row = matrix.rows.len() - 1;

        let mut similarities = Vec::with_capacity(chunks.len());
        for chunk in 0..chunks.len() {
            let sim = matrix.cosine(query_row, chunk);
            if !sim.is_finite() {
                return Err(VectorizeError::NonFinite { chunk });
            }
            similarities.push((chunk, sim));
        }
        similarities.sort_by(|a, b| b.1.total_cmp(&a.1));

        let relevant: Vec<&str> = similarities
            .iter()
            .take(self.top_k)
            .filter(|(_, sim)| *sim > self.settings.min_similarity)
            .map(|(idx, _)| chunks[*idx].as_str())
            .collect();

        tracing::debug!(
            chunks = chunks.len(),
            vocabulary = matrix.vocabulary_len,
            selected = relevant.len(),
            "TF-IDF context selection"
        );

        if relevant.is_empty() {
            Ok(fallback_snippet(corpus, self.fallback_chars))
        } else {
            Ok(relevant.join(" "))
        }
    }
}

impl ContextSelector for TfIdfSelector {
    fn select(&self, query: &str, corpus: &str) -> String {
        match self.try_select(query, corpus) {
            Ok(context) => context,
            Err(e) => {
                tracing::warn!(error = %e, "TF-IDF vectorization failed, using corpus prefix");
                fallback_snippet(corpus, self.fallback_chars)
            }
        }
    }

    fn name(&self) -> &'static str {
        "tfidf"
    }
}

/// L2-normalized sparse TF-IDF rows, one per document
struct TfIdfMatrix {
    rows: Vec<BTreeMap<usize, f64>>,
    vocabulary_len: usize,
}

impl TfIdfMatrix {
    fn fit(documents: &[&str], max_features: usize) -> Result<Self, VectorizeError> {
        let tokenized: Vec<Vec<String>> = documents.iter().map(|d| terms(d)).collect();

        // Corpus-wide term frequency decides which terms survive the cap.
        let mut totals: HashMap<&str, usize> = HashMap::new();
        for doc in &tokenized {
            for term in doc {
                *totals.entry(term.as_str()).or_default() += 1;
            }
        }
        if totals.is_empty() {
            return Err(VectorizeError::EmptyVocabulary);
        }

        let mut ranked: Vec<(&str, usize)> = totals.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(max_features.max(1));

        let vocabulary: HashMap<&str, usize> = ranked
            .iter()
            .enumerate()
            .map(|(idx, (term, _))| (*term, idx))
            .collect();

        let counts: Vec<BTreeMap<usize, f64>> = tokenized
            .iter()
            .map(|doc| {
                let mut row: BTreeMap<usize, f64> = BTreeMap::new();
                for term in doc {
                    if let Some(&idx) = vocabulary.get(term.as_str()) {
                        *row.entry(idx).or_default() += 1.0;
                    }
                }
                row
            })
            .collect();

        let mut df = vec![0usize; vocabulary.len()];
        for row in &counts {
            for &idx in row.keys() {
                df[idx] += 1;
            }
        }

        // Smoothed idf: ln((1 + n) / (1 + df)) + 1
        let n = documents.len() as f64;
        let idf: Vec<f64> = df
            .iter()
            .map(|&d| ((1.0 + n) / (1.0 + d as f64)).ln() + 1.0)
            .collect();

        let rows = counts
            .into_iter()
            .map(|mut row| {
                for (idx, value) in row.iter_mut() {
                    *value *= idf[*idx];
                }
                let norm = row.values().map(|v| v * v).sum::<f64>().sqrt();
                if norm > 0.0 {
                    for value in row.values_mut() {
                        *value /= norm;
                    }
                }
                row
            })
            .collect();

        Ok(Self {
            rows,
            vocabulary_len: vocabulary.len(),
        })
    }

    /// Rows are unit length (or all zero), so the dot product is the cosine
    fn cosine(&self, a: usize, b: usize) -> f64 {
        let (small, large) = if self.rows[a].len() <= self.rows[b].len() {
            (&self.rows[a], &self.rows[b])
        } else {
            (&self.rows[b], &self.rows[a])
        };
        small
            .iter()
            .filter_map(|(idx, v)| large.get(idx).map(|w| v * w))
            .sum()
    }
}

fn terms(document: &str) -> Vec<String> {
    let lowered = document.to_lowercase();
    RE_TERM
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|t| !is_stop_word(t))
        .map(str::to_string)
        .collect()
}
