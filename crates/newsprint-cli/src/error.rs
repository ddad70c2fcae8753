//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pattern store error
    #[error("Store error: {0}")]
    Store(#[from] newsprint_store::StoreError),

    /// Training error
    #[error("Training failed: {0}")]
    Train(#[from] newsprint_trainer::TrainError),

    /// Domain resolution error
    #[error("{0}")]
    Resolve(#[from] newsprint_extractor::DomainResolutionError),

    /// HTTP client setup error
    #[error("HTTP client error: {0}")]
    Http(String),

    /// Terminal prompt error
    #[error("Prompt error: {0}")]
    Prompt(#[from] newsprint_domain::PromptError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Nothing stored under the requested key
    #[error("Not found: {0}")]
    NotFound(String),
}
