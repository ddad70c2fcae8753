//! Patterns command implementation.

use crate::cli::{PatternsAction, PatternsArgs};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use newsprint_extractor::resolve_domain;
use newsprint_store::PatternStore;

/// Execute the patterns command.
pub fn execute_patterns(args: PatternsArgs, store: &PatternStore, formatter: &Formatter) -> Result<()> {
    println!("{}", render(args.action, store, formatter)?);
    Ok(())
}

fn render(action: PatternsAction, store: &PatternStore, formatter: &Formatter) -> Result<String> {
    match action {
        PatternsAction::List => formatter.format_list("Domains", &store.domains()),
        PatternsAction::Stopwords => formatter.format_list("Stopwords", &store.stopwords()),
        PatternsAction::Show { domain } => {
            let domain = resolve_domain(&domain)?;
            let patterns = store
                .lookup(&domain)
                .ok_or_else(|| CliError::NotFound(format!("no patterns stored for '{}'", domain)))?;
            formatter.format_pattern_set(&domain, &patterns)
        }
    }
}
