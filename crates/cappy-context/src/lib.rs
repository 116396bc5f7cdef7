//! Relevant-context selection and prompt composition.
//!
//! A [`ContextSelector`] turns a user query plus the company corpus into a
//! bounded snippet of corpus text; a [`PromptComposer`] wraps that snippet and
//! the query in the assistant's instruction template. Both are synchronous and
//! never mutate their inputs, so a single corpus can be shared read-only
//! across sessions.

mod chunk;
mod corpus;
mod error;
mod lexical;
mod pipeline;
mod prompt;
mod stop_words;
mod strategy;
mod templates;
mod tfidf;
mod tokenize;

pub use chunk::chunk_words;
pub use corpus::{CorpusLoader, FileCorpusLoader, StaticCorpus, DEFAULT_CORPUS, DEFAULT_CORPUS_PATH};
pub use error::VectorizeError;
pub use lexical::LexicalSelector;
pub use pipeline::ContextPipeline;
pub use prompt::{Persona, PromptComposer};
pub use strategy::{
    build_selector, fallback_snippet, ContextSelector, SelectorConfig, SelectorStrategy,
    DEFAULT_FALLBACK_CHARS, DEFAULT_TOP_K,
};
pub use tfidf::{TfIdfSelector, TfIdfSettings};
pub use tokenize::{normalize_tokens, split_sentences};
