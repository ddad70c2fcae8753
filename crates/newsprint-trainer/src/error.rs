//! Error types for training

use newsprint_domain::{FetchError, PromptError};
use newsprint_extractor::{DomainResolutionError, ExtractError};
use newsprint_store::StoreError;
use thiserror::Error;

/// Errors that abort a training invocation.
///
/// Each variant names the domain (or URL) and carries the collaborator's
/// error unchanged as its source.
#[derive(Error, Debug)]
pub enum TrainError {
    /// The URL has no host to train for
    #[error("cannot resolve a domain for {url}: {source}")]
    Resolve {
        /// URL as given
        url: String,
        /// Resolver error
        source: DomainResolutionError,
    },

    /// The document could not be fetched
    #[error("fetching {url} for '{domain}' failed: {source}")]
    Fetch {
        /// Resolved root domain
        domain: String,
        /// URL that was fetched
        url: String,
        /// Fetcher error
        source: FetchError,
    },

    /// Extraction failed for a reason other than a missing pattern set
    #[error("extracting {url} for '{domain}' failed: {source}")]
    Extract {
        /// Resolved root domain
        domain: String,
        /// URL being extracted
        url: String,
        /// Extraction error
        source: ExtractError,
    },

    /// The operator prompt failed or was interrupted
    #[error("prompt failed while training '{domain}' ({step}): {source}")]
    Prompt {
        /// Domain being trained
        domain: String,
        /// What the prompt was asking for
        step: &'static str,
        /// Prompt error
        source: PromptError,
    },

    /// The trained patterns could not be saved
    #[error("saving patterns for '{domain}' failed: {source}")]
    Store {
        /// Domain being saved
        domain: String,
        /// Store error
        source: StoreError,
    },
}

impl TrainError {
    pub(crate) fn prompt<'a>(
        domain: &'a str,
        step: &'static str,
    ) -> impl FnOnce(PromptError) -> Self + 'a {
        move |source| TrainError::Prompt {
            domain: domain.to_string(),
            step,
            source,
        }
    }

    /// The domain (or URL, when no domain was resolved) the failure belongs to
    pub fn domain(&self) -> &str {
        match self {
            TrainError::Resolve { url, .. } => url,
            TrainError::Fetch { domain, .. }
            | TrainError::Extract { domain, .. }
            | TrainError::Prompt { domain, .. }
            | TrainError::Store { domain, .. } => domain,
        }
    }
}
