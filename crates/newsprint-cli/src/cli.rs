//! CLI command definitions and argument parsing.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Newsprint - Extract structured fields from news articles, training
/// per-site patterns when none exist.
#[derive(Debug, Parser)]
#[command(name = "newsprint")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Pattern document (overrides the configuration file)
    #[arg(long, env = "NEWSPRINT_PATTERNS", global = true)]
    pub patterns: Option<PathBuf>,

    /// Stopword list (overrides the configuration file)
    #[arg(long, env = "NEWSPRINT_STOPWORDS", global = true)]
    pub stopwords: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (values only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract an article, offering to train its site when no patterns exist
    Scrape(UrlArgs),

    /// Train (or retrain) the patterns for an article's site
    Train(UrlArgs),

    /// Print the root domain patterns are stored under for a URL
    Resolve(UrlArgs),

    /// Inspect the pattern store
    Patterns(PatternsArgs),
}

/// Arguments for commands that take a single article URL.
#[derive(Debug, Parser)]
pub struct UrlArgs {
    /// Article URL (the scheme may be omitted)
    pub url: String,
}

/// Arguments for the patterns command.
#[derive(Debug, Parser)]
pub struct PatternsArgs {
    #[command(subcommand)]
    pub action: PatternsAction,
}

/// Pattern store inspection actions.
#[derive(Debug, Subcommand)]
pub enum PatternsAction {
    /// List every domain with stored patterns
    List,

    /// Show the patterns stored for a domain
    Show {
        /// Root domain (a full URL is resolved first)
        domain: String,
    },

    /// Show the stopword list
    Stopwords,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
