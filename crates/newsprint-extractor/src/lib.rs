//! Newsprint Extractor
//!
//! Turns a raw news article into structured fields using the patterns stored
//! for its root domain.
//!
//! # Architecture
//!
//! ```text
//! URL → resolve_domain → PatternStore::lookup → transform → ExtractedFields
//! ```
//!
//! - CSS selectors run through `scraper`, XPath 1.0 through `sxd-xpath`
//! - The matched text of each field is joined with newlines, post-processed
//!   and trimmed
//! - A pattern that cannot be applied leaves its field empty; use [`preview`]
//!   to see why
//!
//! # Example Usage
//!
//! ```no_run
//! use newsprint_extractor::{ExtractError, ExtractionEngine};
//! use newsprint_store::PatternStore;
//! use std::sync::Arc;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(PatternStore::from_paths(
//!     "config/article_scrape_patterns.yml",
//!     "config/stopwords.yml",
//! )?);
//! let engine = ExtractionEngine::new(store);
//!
//! match engine.transform_for_domain("https://www.example.com/a", "<h1>Hello</h1>") {
//!     Ok(fields) => println!("{}", fields.get(newsprint_domain::Field::Title)),
//!     Err(ExtractError::ScrapePatternNotDefined { domain }) => println!("train {}", domain),
//!     Err(e) => return Err(e.into()),
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod engine;
mod error;
mod postprocess;
mod resolver;
mod selector;


pub use engine::{preview, transform, ExtractionEngine};
pub use error::{ApplyError, DomainResolutionError, ExtractError};
pub use resolver::resolve_domain;
