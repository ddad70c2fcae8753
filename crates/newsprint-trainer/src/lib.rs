//! Newsprint Trainer
//!
//! Interactive discovery of extraction patterns for news sites that have
//! none stored.
//!
//! # Overview
//!
//! ```text
//! URL → resolve → fetch → extract ──ok──────────────────────────→ Extracted
//!                            └─ no pattern → train? ─no─→ Declined
//!                                              └─yes→ select per field → save? → overwrite? → Saved
//!                                                                          └─no→ Discarded
//! ```
//!
//! The operator is reached through the [`Prompt`](newsprint_domain::Prompt)
//! trait and documents through [`Fetcher`](newsprint_domain::Fetcher); both
//! are supplied by the host.

#![warn(missing_docs)]

mod candidates;
mod coordinator;
mod error;
mod selector;

#[cfg(test)]
mod tests;

pub use candidates::builtin_candidates;
pub use coordinator::{TrainingCoordinator, TrainingOutcome, TrainingState};
pub use error::TrainError;
pub use selector::PatternCandidateSelector;
