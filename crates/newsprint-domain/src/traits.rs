//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the extraction core and the
//! collaborators it drives. Infrastructure implementations live in
//! newsprint-cli; tests provide scripted ones.

use crate::field::Field;
use crate::pattern::FieldPattern;
use std::fmt;
use thiserror::Error;

/// Errors raised by a [`Fetcher`]
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered with a non-success status
    #[error("GET {url} returned HTTP {status}")]
    Status {
        /// Requested URL
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// The request never produced a response (DNS, TLS, timeout, ...)
    #[error("GET {url} failed: {reason}")]
    Transport {
        /// Requested URL
        url: String,
        /// Underlying failure
        reason: String,
    },
}

/// Errors raised by a [`Prompt`]
#[derive(Debug, Error)]
pub enum PromptError {
    /// The operator interrupted the session (Ctrl-C)
    #[error("interrupted by operator")]
    Interrupted,

    /// Terminal I/O failed
    #[error("prompt I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Line editor failure
    #[error("prompt error: {0}")]
    Editor(String),
}

/// Retrieves the raw body of a document.
///
/// Implemented by the infrastructure layer (newsprint-cli). The core never
/// retries a failed fetch.
pub trait Fetcher {
    /// Fetch the document at `url` and return its body
    fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// What a candidate pattern produced against the training document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    /// The pattern matched and produced this text
    Text(String),

    /// The pattern is valid but matched nothing
    NoMatch,

    /// The pattern could not be applied (invalid selector or regex)
    Invalid(String),
}

impl fmt::Display for Preview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Preview::Text(text) => f.write_str(text),
            Preview::NoMatch => f.write_str("(no match)"),
            Preview::Invalid(reason) => write!(f, "(invalid pattern: {})", reason),
        }
    }
}

/// A pattern offered to the operator during training
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Short name shown next to the pattern (preset name or "default")
    pub label: String,

    /// The pattern itself
    pub pattern: FieldPattern,

    /// Result of applying the pattern to the training document
    pub preview: Preview,
}

/// Operator answer to a pattern selection request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternChoice {
    /// Try this pattern (a candidate or a custom one)
    Use(FieldPattern),

    /// Give up on this field; it stays absent from the pattern set
    Abandon,
}

/// Interactive operator channel used during training.
///
/// Implemented by the infrastructure layer (newsprint-cli). Calls block until
/// the operator answers; declining immediately is the only cancellation.
pub trait Prompt {
    /// Ask a yes/no question
    fn confirm(&mut self, message: &str) -> Result<bool, PromptError>;

    /// Offer candidates for `field` and let the operator pick, enter a custom
    /// pattern, or abandon the field
    fn select_or_edit_pattern(
        &mut self,
        field: Field,
        candidates: &[Candidate],
    ) -> Result<PatternChoice, PromptError>;
}
