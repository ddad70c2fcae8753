//! Train command implementation.

use crate::cli::UrlArgs;
use crate::error::Result;
use crate::output::Formatter;
use newsprint_domain::{Fetcher, Prompt};
use newsprint_store::PatternStore;
use newsprint_trainer::{TrainingCoordinator, TrainingOutcome};
use std::sync::Arc;

/// Execute the train command.
///
/// Trains the article's site whether or not patterns are stored; replacing
/// stored patterns needs the operator's confirmation.
pub fn execute_train<F, P>(
    args: UrlArgs,
    store: Arc<PatternStore>,
    fetcher: &F,
    prompt: &mut P,
    formatter: &Formatter,
) -> Result<TrainingOutcome>
where
    F: Fetcher + ?Sized,
    P: Prompt + ?Sized,
{
    let outcome = TrainingCoordinator::new(store, fetcher, prompt).retrain(&args.url)?;
    println!("{}", formatter.format_outcome(&outcome)?);
    Ok(outcome)
}
