//! Newsprint Storage Layer
//!
//! Holds the domain-keyed extraction patterns and the stopword list, loaded
//! from YAML files or injected supplier functions.
//!
//! # Architecture
//!
//! - The pattern document is kept whole as a YAML value ([`PatternDocument`])
//! - Valid per-domain pattern sets are parsed out of it for lookups
//! - Writes replace exactly one `domains.<domain>` key and rewrite the whole
//!   document atomically
//!
//! # Examples
//!
//! ```no_run
//! use newsprint_domain::{Field, FieldPattern, PatternSet};
//! use newsprint_store::PatternStore;
//!
//! let store = PatternStore::from_paths(
//!     "config/article_scrape_patterns.yml",
//!     "config/stopwords.yml",
//! ).unwrap();
//!
//! let set = PatternSet::new().with(Field::Title, FieldPattern::css("h1"));
//! store.merge_and_persist("example.com", set, false).unwrap();
//! assert!(store.lookup("example.com").is_some());
//! ```

#![warn(missing_docs)]

mod document;
mod error;
mod source;
mod store;

pub use document::PatternDocument;
pub use error::StoreError;
pub use source::{BoxError, PatternsSource, Source, StopwordsSource, StoreConfig, Supplier};
pub use store::{MergeOutcome, PatternStore};
