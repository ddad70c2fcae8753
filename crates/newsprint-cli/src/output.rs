//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use newsprint_domain::{ExtractedFields, PatternSet};
use newsprint_store::MergeOutcome;
use newsprint_trainer::TrainingOutcome;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format extracted article fields.
    pub fn format_fields(&self, fields: &ExtractedFields) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(fields)?),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Field", "Value"]);
                for (field, value) in fields.iter() {
                    builder.push_record([field.as_str(), value]);
                }
                Ok(self.render(builder))
            }
            OutputFormat::Quiet => Ok(fields
                .iter()
                .map(|(_, value)| value)
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format the patterns stored for a domain.
    pub fn format_pattern_set(&self, domain: &str, patterns: &PatternSet) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "domain": domain,
                "patterns": patterns,
            }))?),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Field", "Method", "Pattern", "Post-process"]);
                for (field, pattern) in patterns.iter() {
                    let post_process = match &pattern.post_process {
                        Some(step) => serde_json::to_string(step)?,
                        None => String::new(),
                    };
                    builder.push_record([
                        field.as_str(),
                        pattern.selector.method(),
                        pattern.selector.pattern(),
                        post_process.as_str(),
                    ]);
                }
                Ok(self.render(builder))
            }
            OutputFormat::Quiet => Ok(patterns
                .iter()
                .map(|(field, pattern)| format!("{}\t{}", field, pattern))
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format a list of plain strings (domains, stopwords).
    pub fn format_list(&self, header: &str, items: &[String]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(items)?),
            OutputFormat::Quiet => Ok(items.join("\n")),
            OutputFormat::Table => {
                if items.is_empty() {
                    return Ok(self.colorize(&format!("No {} found.", header.to_lowercase()), "yellow"));
                }
                let mut builder = Builder::default();
                builder.push_record([header]);
                for item in items {
                    builder.push_record([item.as_str()]);
                }
                Ok(self.render(builder))
            }
        }
    }

    /// Format the result of a scrape or training run.
    pub fn format_outcome(&self, outcome: &TrainingOutcome) -> Result<String> {
        if let TrainingOutcome::Extracted(fields) = outcome {
            return self.format_fields(fields);
        }

        if self.format == OutputFormat::Json {
            return Ok(serde_json::to_string_pretty(&outcome_json(outcome))?);
        }

        Ok(match outcome {
            TrainingOutcome::Extracted(_) => String::new(),
            TrainingOutcome::Declined { domain } => {
                self.info(&format!("Training declined for '{}'; nothing extracted", domain))
            }
            TrainingOutcome::Untrained { domain } => {
                self.warning(&format!("No patterns were trained for '{}'", domain))
            }
            TrainingOutcome::Saved { domain, outcome } => match outcome {
                MergeOutcome::KeptExisting(_) => {
                    self.warning(&format!("Kept the existing patterns for '{}'", domain))
                }
                MergeOutcome::Inserted(set) | MergeOutcome::Replaced(set) => {
                    self.success(&format!("Saved {} pattern(s) for '{}'", set.len(), domain))
                }
            },
            TrainingOutcome::Discarded { domain, patterns } => self.info(&format!(
                "Discarded {} trained pattern(s) for '{}'",
                patterns.len(),
                domain
            )),
        })
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn render(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

fn outcome_json(outcome: &TrainingOutcome) -> serde_json::Value {
    match outcome {
        TrainingOutcome::Extracted(fields) => serde_json::json!({
            "status": "extracted",
            "fields": fields,
        }),
        TrainingOutcome::Declined { domain } => serde_json::json!({
            "status": "declined",
            "domain": domain,
        }),
        TrainingOutcome::Untrained { domain } => serde_json::json!({
            "status": "untrained",
            "domain": domain,
        }),
        TrainingOutcome::Saved { domain, outcome } => {
            let status = if outcome.was_written() { "saved" } else { "kept_existing" };
            serde_json::json!({
                "status": status,
                "domain": domain,
                "patterns": outcome.pattern_set(),
            })
        }
        TrainingOutcome::Discarded { domain, patterns } => serde_json::json!({
            "status": "discarded",
            "domain": domain,
            "patterns": patterns,
        }),
    }
}
