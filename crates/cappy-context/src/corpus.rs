use std::path::{Path, PathBuf};

pub const DEFAULT_CORPUS_PATH: &str = "data/capserve_info.txt";

/// Used when the knowledge file cannot be read
pub const DEFAULT_CORPUS: &str = "CapServ Digital Lending is a cutting-edge digital platform aimed at modernizing financial services through a comprehensive lending marketplace.";

/// Source of the company knowledge text
pub trait CorpusLoader: Send + Sync {
    /// Load the corpus; never fails, a built-in description stands in for a missing source
    fn load_corpus(&self) -> String;
}

/// Reads the corpus from a UTF-8 text file
#[derive(Debug, Clone)]
pub struct FileCorpusLoader {
    path: PathBuf,
}

impl Default for FileCorpusLoader {
    fn default() -> Self {
        Self::new(DEFAULT_CORPUS_PATH)
    }
}

impl FileCorpusLoader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CorpusLoader for FileCorpusLoader {
    fn load_corpus(&self) -> String {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => {
                tracing::info!(path = %self.path.display(), chars = text.chars().count(), "Corpus loaded");
                text
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Corpus not readable, using built-in company description"
                );
                DEFAULT_CORPUS.to_string()
            }
        }
    }
}

/// In-memory corpus
#[derive(Debug, Clone)]
pub struct StaticCorpus(pub String);

impl CorpusLoader for StaticCorpus {
    fn load_corpus(&self) -> String {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_uses_default() {
        let loader = FileCorpusLoader::new("definitely/not/here/capserve_info.txt");
        assert_eq!(loader.load_corpus(), DEFAULT_CORPUS);
    }

    #[test]
    fn test_reads_file() {
        let path = std::env::temp_dir().join(format!("cappy-corpus-{}.txt", std::process::id()));
        std::fs::write(&path, "CapServ offers digital loans.").unwrap();

        let loader = FileCorpusLoader::new(&path);
        assert_eq!(loader.load_corpus(), "CapServ offers digital loans.");

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_static_corpus() {
        assert_eq!(StaticCorpus("abc".to_string()).load_corpus(), "abc");
    }
}
