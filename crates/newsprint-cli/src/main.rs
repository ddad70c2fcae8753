//! Newsprint CLI - Extract news articles and train per-site patterns.

use clap::Parser;
use newsprint_cli::commands;
use newsprint_cli::{Cli, Command, Config, Formatter, HttpFetcher, TerminalPrompt};
use newsprint_store::PatternStore;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> newsprint_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Load config, explicit path first
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    config.override_sources(cli.patterns, cli.stopwords);

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    let open_store = || -> newsprint_cli::Result<Arc<PatternStore>> {
        Ok(Arc::new(PatternStore::new(config.store_config())?))
    };

    // Handle commands
    match cli.command {
        Command::Resolve(args) => {
            commands::execute_resolve(args, &formatter)?;
        }
        Command::Patterns(args) => {
            let store = open_store()?;
            commands::execute_patterns(args, &store, &formatter)?;
        }
        Command::Scrape(args) => {
            let store = open_store()?;
            let fetcher = HttpFetcher::from_settings(&config.settings)?;
            let mut prompt = TerminalPrompt::new(color_enabled)?;
            commands::execute_scrape(args, store, &fetcher, &mut prompt, &formatter)?;
        }
        Command::Train(args) => {
            let store = open_store()?;
            let fetcher = HttpFetcher::from_settings(&config.settings)?;
            let mut prompt = TerminalPrompt::new(color_enabled)?;
            commands::execute_train(args, store, &fetcher, &mut prompt, &formatter)?;
        }
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
