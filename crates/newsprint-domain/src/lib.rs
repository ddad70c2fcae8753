//! Newsprint Domain Layer
//!
//! Core value types shared by every other newsprint crate, plus the trait
//! interfaces for the collaborators the core talks to but does not own.
//!
//! ## Key Concepts
//!
//! - **Field**: one of the fixed article fields (body, description, keywords,
//!   section, time, title)
//! - **FieldPattern**: a selector (CSS or XPath) plus an optional post-process
//! - **PatternSet**: the per-domain collection of field patterns, possibly partial
//! - **ExtractedFields**: the structured output of applying a pattern set
//!
//! ## Architecture
//!
//! - Pure data and validation only, no I/O
//! - Infrastructure implementations (YAML store, HTTP fetcher, terminal prompt)
//!   live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod article;
pub mod field;
pub mod pattern;
pub mod traits;

// Re-exports for convenience
pub use article::ExtractedFields;
pub use field::{Field, UnknownField};
pub use pattern::{FieldPattern, PatternError, PatternSet, PostProcess, Selector};
pub use traits::{Candidate, FetchError, Fetcher, PatternChoice, Preview, Prompt, PromptError};
