//! Where the pattern document and the stopword list come from

use crate::document::PatternDocument;
use crate::error::StoreError;
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

/// Boxed error returned by supplier functions
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Zero-argument function producing a source's contents
pub type Supplier<T> = Arc<dyn Fn() -> Result<T, BoxError> + Send + Sync>;

/// A configured source: a YAML file on disk or an injected supplier
pub enum Source<T> {
    /// YAML file read on every (re)load
    File(PathBuf),

    /// Function called on every (re)load
    Supplier(Supplier<T>),
}

/// Source of the pattern document
pub type PatternsSource = Source<PatternDocument>;

/// Source of the stopword list
pub type StopwordsSource = Source<Vec<String>>;

impl<T> Source<T> {
    /// File-backed source
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Source::File(path.into())
    }

    /// Supplier-backed source
    pub fn supplier<F>(supplier: F) -> Self
    where
        F: Fn() -> Result<T, BoxError> + Send + Sync + 'static,
    {
        Source::Supplier(Arc::new(supplier))
    }

    /// Human-readable description used in errors and logs
    pub fn describe(&self) -> String {
        match self {
            Source::File(path) => format!("file {}", path.display()),
            Source::Supplier(_) => "supplier".to_string(),
        }
    }

    fn load_with<P>(&self, parse: P) -> Result<T, StoreError>
    where
        P: FnOnce(&str) -> Result<T, StoreError>,
    {
        let loaded = match self {
            Source::File(path) => fs::read_to_string(path)
                .map_err(StoreError::from)
                .and_then(|contents| parse(&contents)),
            Source::Supplier(supplier) => supplier().map_err(|e| StoreError::ConfigurationLoad {
                source_name: self.describe(),
                reason: e.to_string(),
            }),
        };

        loaded.map_err(|e| match e {
            StoreError::ConfigurationLoad { .. } => e,
            other => StoreError::ConfigurationLoad {
                source_name: self.describe(),
                reason: other.to_string(),
            },
        })
    }
}

impl Source<PatternDocument> {
    /// Load the pattern document
    pub fn load(&self) -> Result<PatternDocument, StoreError> {
        self.load_with(PatternDocument::from_yaml_str)
    }
}

impl Source<Vec<String>> {
    /// Source with no stopwords at all
    pub fn empty() -> Self {
        Source::supplier(|| Ok(Vec::new()))
    }

    /// Load the stopword list, preserving source order
    pub fn load(&self) -> Result<Vec<String>, StoreError> {
        self.load_with(|contents| {
            let words: Option<Vec<String>> = serde_yaml::from_str(contents)?;
            Ok(words.unwrap_or_default())
        })
    }
}

impl<T> Clone for Source<T> {
    fn clone(&self) -> Self {
        match self {
            Source::File(path) => Source::File(path.clone()),
            Source::Supplier(supplier) => Source::Supplier(Arc::clone(supplier)),
        }
    }
}

impl<T> fmt::Debug for Source<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::File(path) => f.debug_tuple("File").field(path).finish(),
            Source::Supplier(_) => f.write_str("Supplier(..)"),
        }
    }
}

/// Sources the store (re)loads from
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Pattern document source
    pub patterns: PatternsSource,

    /// Stopword list source
    pub stopwords: StopwordsSource,
}

impl StoreConfig {
    /// Configure both sources
    pub fn new(patterns: PatternsSource, stopwords: StopwordsSource) -> Self {
        Self { patterns, stopwords }
    }

    /// Both sources as YAML files
    pub fn from_paths(patterns: impl Into<PathBuf>, stopwords: impl Into<PathBuf>) -> Self {
        Self::new(Source::file(patterns), Source::file(stopwords))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_file_is_configuration_error() {
        let source = PatternsSource::file("does/not/exist.yml");
        match source.load() {
            Err(StoreError::ConfigurationLoad { source_name, .. }) => {
                assert!(source_name.contains("does/not/exist.yml"));
            }
            other => panic!("Expected ConfigurationLoad, got {:?}", other),
        }
    }

    #[test]
    fn test_supplier_failure_is_configuration_error() {
        let source = StopwordsSource::supplier(|| Err("boom".into()));
        match source.load() {
            Err(StoreError::ConfigurationLoad { source_name, reason }) => {
                assert_eq!(source_name, "supplier");
                assert_eq!(reason, "boom");
            }
            other => panic!("Expected ConfigurationLoad, got {:?}", other),
        }
    }

    #[test]
    fn test_stopwords_from_file_keep_order() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "- the\n- a\n- of").unwrap();

        let words = StopwordsSource::file(file.path()).load().unwrap();
        assert_eq!(words, vec!["the", "a", "of"]);
    }

    #[test]
    fn test_empty_stopword_file() {
        let file = NamedTempFile::new().unwrap();
        let words = StopwordsSource::file(file.path()).load().unwrap();
        assert!(words.is_empty());
    }

    #[test]
    fn test_invalid_yaml_is_configuration_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "domains: [unclosed").unwrap();
        assert!(matches!(
            PatternsSource::file(file.path()).load(),
            Err(StoreError::ConfigurationLoad { .. })
        ));
    }
}
