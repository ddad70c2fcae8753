//! Root domain resolution

use crate::error::DomainResolutionError;
use url::{Host, Url};

/// Reduce a URL (or bare `host[/path]`) to its registrable root domain.
///
/// `https://www.google.ca/news/1` and `google.ca/news` both resolve to
/// `google.ca`. IP addresses resolve to themselves, as do hosts with no
/// registrable part such as `localhost`.
pub fn resolve_domain(input: &str) -> Result<String, DomainResolutionError> {
    let normalized = input.trim().to_lowercase();
    if normalized.is_empty() {
        return Err(DomainResolutionError::new(input, "empty input"));
    }

    let url = parse_with_host(&normalized)
        .ok_or_else(|| DomainResolutionError::new(input, "no host found"))?;

    match url.host() {
        Some(Host::Domain(host)) => {
            let host = host.trim_end_matches('.');
            if host.is_empty() {
                return Err(DomainResolutionError::new(input, "no host found"));
            }
            Ok(psl::domain_str(host).unwrap_or(host).to_string())
        }
        Some(Host::Ipv4(addr)) => Ok(addr.to_string()),
        Some(Host::Ipv6(addr)) => Ok(addr.to_string()),
        None => Err(DomainResolutionError::new(input, "no host found")),
    }
}

/// Parse as given; inputs without a usable host are retried as `http://<input>`
fn parse_with_host(input: &str) -> Option<Url> {
    if input.contains("://") {
        return Url::parse(input).ok().filter(Url::has_host);
    }

    if let Ok(url) = Url::parse(input) {
        if url.has_host() {
            return Some(url);
        }
    }

    Url::parse(&format!("http://{}", input))
        .ok()
        .filter(Url::has_host)
}
