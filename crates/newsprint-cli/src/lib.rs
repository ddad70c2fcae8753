//! Newsprint CLI library.
//!
//! This library provides the command-line front end: configuration, the HTTP
//! fetcher and terminal prompt used by training, command execution and output
//! formatting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod fetch;
pub mod output;
pub mod prompt;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use fetch::HttpFetcher;
pub use output::Formatter;
pub use prompt::TerminalPrompt;
