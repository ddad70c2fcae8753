//! Scrape command implementation.

use crate::cli::UrlArgs;
use crate::error::Result;
use crate::output::Formatter;
use newsprint_domain::{Fetcher, Prompt};
use newsprint_store::PatternStore;
use newsprint_trainer::{TrainingCoordinator, TrainingOutcome};
use std::sync::Arc;

/// Execute the scrape command.
///
/// Extracts the article with stored patterns; when its site has none, the
/// operator is offered training.
pub fn execute_scrape<F, P>(
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
    let outcome = TrainingCoordinator::new(store, fetcher, prompt).run(&args.url)?;
    println!("{}", formatter.format_outcome(&outcome)?);
    Ok(outcome)
}
