//! Client configuration.

use std::time::Duration;

use url::Url;

use crate::{Error, Result};

/// Default API endpoint root. The trailing slash matters for URL joining.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1/";

/// Default whole-request timeout. Generous because image generation and long
/// completions routinely run for minutes.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(600);

/// Connection settings for [`OpenAiClient`](crate::OpenAiClient).
///
/// ```rust
/// use openai_client::Config;
///
/// let config = Config::new("sk-...").organization("org-team");
/// assert_eq!(config.base_url.as_str(), "https://api.openai.com/v1/");
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub organization: Option<String>,
    pub base_url: Url,
    pub timeout: Duration,
}

impl Config {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            organization: None,
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Read settings from `OPENAI_API_KEY`, `OPENAI_BASE_URL`, and
    /// `OPENAI_ORGANIZATION`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| Error::config("OPENAI_API_KEY is not set"))?;
        let mut config = Config::new(api_key);
        if let Ok(base_url) = std::env::var("OPENAI_BASE_URL") {
            config = config.base_url(&base_url)?;
        }
        if let Ok(organization) = std::env::var("OPENAI_ORGANIZATION") {
            config = config.organization(organization);
        }
        Ok(config)
    }

    /// Point the client at a different endpoint root (proxy, mock server,
    /// compatible deployment). A missing trailing slash is added so path
    /// joining keeps the final segment.
    pub fn base_url(mut self, base_url: &str) -> Result<Self> {
        let normalized = if base_url.ends_with('/') {
            base_url.to_owned()
        } else {
            format!("{base_url}/")
        };
        self.base_url = Url::parse(&normalized)
            .map_err(|source| Error::config(format!("invalid base URL `{base_url}`: {source}")))?;
        Ok(self)
    }

    pub fn organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = Some(organization.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
