//! Dispatcher configuration. The base URL comes from the CLI (`--api-url` or
//! `TAVOLA_API_URL`); the timeout is opt-in because the booking API has no timeout
//! contract of its own.

use anyhow::{anyhow, Result};
use std::time::Duration;
use url::Url;

/// Default API origin used by local development servers.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: None,
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ApiConfig {
    /// # Errors
    /// Returns an error if `base_url` is not an absolute http(s) URL.
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            ..Self::default()
        })
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Joins the base URL and a relative API path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        build_url_with_base(&self.base_url, path)
    }
}

/// Validates a base URL and strips trailing slashes.
/// # Errors
/// Returns an error if the URL does not parse or uses a scheme other than http(s).
pub fn normalize_base_url(base_url: &str) -> Result<String> {
    let trimmed = base_url.trim();
    let parsed = Url::parse(trimmed)?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => return Err(anyhow!("unsupported API URL scheme: {scheme}")),
    }

    if parsed.host().is_none() {
        return Err(anyhow!("API URL has no host: {trimmed}"));
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}

/// Builds a URL from an explicit base URL and the provided path.
fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}
