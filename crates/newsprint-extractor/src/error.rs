//! Error types for the extractor

use thiserror::Error;

/// The input did not contain a host that can be reduced to a domain
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot resolve a domain from '{input}': {reason}")]
pub struct DomainResolutionError {
    /// The URL or host string as given
    pub input: String,
    /// Why resolution failed
    pub reason: String,
}

impl DomainResolutionError {
    pub(crate) fn new(input: &str, reason: impl Into<String>) -> Self {
        Self {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// Errors returned by [`ExtractionEngine::transform_for_domain`](crate::ExtractionEngine::transform_for_domain)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// No pattern set is stored for the resolved domain
    #[error("no scrape pattern defined for '{domain}'")]
    ScrapePatternNotDefined {
        /// The resolved root domain
        domain: String,
    },

    /// The URL could not be resolved to a domain
    #[error(transparent)]
    DomainResolution(#[from] DomainResolutionError),
}

/// A single field pattern could not be applied
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApplyError {
    /// The CSS selector does not parse
    #[error("invalid CSS selector '{pattern}': {reason}")]
    InvalidCss {
        /// The selector as written
        pattern: String,
        /// Parser message
        reason: String,
    },

    /// The XPath expression does not parse or evaluate
    #[error("invalid XPath '{pattern}': {reason}")]
    InvalidXpath {
        /// The expression as written
        pattern: String,
        /// Parser or evaluator message
        reason: String,
    },

    /// The post-process regex does not compile
    #[error("invalid replace pattern '{pattern}': {reason}")]
    InvalidRegex {
        /// The regex as written
        pattern: String,
        /// Compiler message
        reason: String,
    },
}
