//! Text transforms applied after selection

use crate::error::ApplyError;
use newsprint_domain::PostProcess;
use regex::Regex;

/// Apply a post-process step to matched text
pub(crate) fn apply(text: &str, post_process: &PostProcess) -> Result<String, ApplyError> {
    match post_process {
        PostProcess::Squish => Ok(squish(text)),
        PostProcess::Replace { find, with } => {
            let regex = Regex::new(find).map_err(|e| ApplyError::InvalidRegex {
                pattern: find.clone(),
                reason: e.to_string(),
            })?;
            Ok(regex.replace_all(text, with.as_str()).into_owned())
        }
    }
}

fn squish(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
