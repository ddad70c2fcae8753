//! Resolve command implementation.

use crate::cli::UrlArgs;
use crate::error::Result;
use crate::output::Formatter;
use newsprint_extractor::resolve_domain;

/// Execute the resolve command.
pub fn execute_resolve(args: UrlArgs, formatter: &Formatter) -> Result<()> {
    let domain = resolve_domain(&args.url)?;
    println!("{}", formatter.format_list("Domain", &[domain])?);
    Ok(())
}
