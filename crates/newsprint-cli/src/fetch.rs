//! HTTP document fetching.

use crate::config::Settings;
use crate::error::{CliError, Result};
use newsprint_domain::{FetchError, Fetcher};
use std::time::Duration;
use tracing::debug;

/// Blocking HTTP fetcher.
///
/// Inputs without a scheme are fetched as `http://<input>`. Failed requests
/// are never retried.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    /// Create a fetcher with the given timeout and User-Agent.
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| CliError::Http(e.to_string()))?;

        Ok(Self { client })
    }

    /// Create a fetcher from the CLI settings.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(
            Duration::from_secs(settings.fetch_timeout_secs),
            &settings.user_agent,
        )
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> std::result::Result<String, FetchError> {
        let target = request_url(url);
        debug!("GET {}", target);

        let transport = |e: reqwest::Error| FetchError::Transport {
            url: target.clone(),
            reason: e.to_string(),
        };

        let response = self.client.get(&target).send().map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: target,
                status: status.as_u16(),
            });
        }

        response.text().map_err(transport)
    }
}

/// The URL actually requested for an input.
fn request_url(input: &str) -> String {
    let input = input.trim();
    if input.contains("://") {
        input.to_string()
    } else {
        format!("http://{}", input)
    }
}
