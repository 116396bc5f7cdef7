use thiserror::Error;

/// Failures of the TF-IDF vectorizer
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VectorizeError {
    #[error("empty vocabulary; documents only contain stop words or no words at all")]
    EmptyVocabulary,

    #[error("non-finite similarity for chunk {chunk}")]
    NonFinite { chunk: usize },
}
