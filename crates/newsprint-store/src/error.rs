//! Error types for the pattern store

use newsprint_domain::{Field, PatternError};
use thiserror::Error;

/// Errors that can occur during pattern store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// A pattern or stopword source could not be loaded
    #[error("Failed to load {source_name}: {reason}")]
    ConfigurationLoad {
        /// Which source failed (file path or supplier)
        source_name: String,
        /// Why it failed
        reason: String,
    },

    /// The pattern document does not have the expected layout
    #[error("Malformed pattern document: {0}")]
    MalformedDocument(String),

    /// An empty pattern set was offered for persistence
    #[error("Refusing to store an empty pattern set for '{0}'")]
    EmptyPatternSet(String),

    /// A field pattern offered for persistence would not load back
    #[error("Invalid {field} pattern for '{domain}': {source}")]
    InvalidPattern {
        /// Domain being saved
        domain: String,
        /// Field whose pattern failed validation
        field: Field,
        /// Validation failure
        source: PatternError,
    },

    /// I/O error while writing the pattern document
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML (de)serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
