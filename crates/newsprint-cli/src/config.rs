//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use newsprint_store::StoreConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Where patterns and stopwords are loaded from
    #[serde(default)]
    pub sources: Sources,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Pattern store sources.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sources {
    /// Pattern document (YAML)
    #[serde(default = "default_patterns")]
    pub patterns: PathBuf,

    /// Stopword list (YAML sequence)
    #[serde(default = "default_stopwords")]
    pub stopwords: PathBuf,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// HTTP request timeout in seconds
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,

    /// User-Agent header sent when fetching articles
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".newsprint").join("config.toml"))
    }

    /// Load configuration from the default path, or defaults if it does not exist.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;

        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit path, which must exist.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("Cannot read {}: {}", path.display(), e))
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Save configuration to a file, creating its directory.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Replace sources given on the command line.
    pub fn override_sources(&mut self, patterns: Option<PathBuf>, stopwords: Option<PathBuf>) {
        if let Some(patterns) = patterns {
            self.sources.patterns = patterns;
        }
        if let Some(stopwords) = stopwords {
            self.sources.stopwords = stopwords;
        }
    }

    /// Store sources for this configuration.
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::from_paths(&self.sources.patterns, &self.sources.stopwords)
    }
}

impl Default for Sources {
    fn default() -> Self {
        Self {
            patterns: default_patterns(),
            stopwords: default_stopwords(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            fetch_timeout_secs: default_fetch_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_patterns() -> PathBuf {
    PathBuf::from("config/article_scrape_patterns.yml")
}

fn default_stopwords() -> PathBuf {
    PathBuf::from("config/stopwords.yml")
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_fetch_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("newsprint/{}", env!("CARGO_PKG_VERSION"))
}
