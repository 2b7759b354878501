//! Client configuration.

use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};

/// Production endpoint of the inference API.
pub const DEFAULT_BASE_URL: &str = "https://models.github.ai";

/// Default timeout for HTTP requests: 30 seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for [`ModelsClient`](crate::ModelsClient).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct ClientConfig {
    /// Base URL of the inference API
    #[cfg_attr(
        feature = "config",
        arg(
            long = "models-base-url",
            env = "GITHUB_MODELS_BASE_URL",
            default_value = DEFAULT_BASE_URL
        )
    )]
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// HTTP request timeout in seconds
    #[cfg_attr(
        feature = "config",
        arg(long = "http-timeout", env = "HTTP_TIMEOUT", default_value = "30")
    )]
    #[serde(default = "default_timeout_secs")]
    pub http_timeout: u64,

    /// User-Agent header to send with requests
    #[cfg_attr(
        feature = "config",
        arg(long = "http-user-agent", env = "HTTP_USER_AGENT")
    )]
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            http_timeout: default_timeout_secs(),
            user_agent: None,
        }
    }
}

impl ClientConfig {
    /// Returns the effective timeout, using default if zero.
    pub fn effective_timeout(&self) -> Duration {
        if self.http_timeout == 0 {
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        } else {
            Duration::from_secs(self.http_timeout)
        }
    }

    /// Returns the effective user agent, using default if not set.
    pub fn effective_user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(Self::default_user_agent)
    }

    fn default_user_agent() -> String {
        format!("ghmodels/{}", env!("CARGO_PKG_VERSION"))
    }

    /// Parses the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the URL is malformed or cannot carry a
    /// path (e.g. `mailto:`).
    pub fn parsed_base_url(&self) -> Result<Url> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| Error::config(format!("invalid base url '{}': {e}", self.base_url)))?;

        if url.cannot_be_a_base() {
            return Err(Error::config(format!(
                "base url '{}' cannot carry a path",
                self.base_url
            )));
        }

        Ok(url)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        self.parsed_base_url().map(|_| ())
    }

    /// Set the base URL, e.g. to point at a test double.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the timeout in seconds.
    #[must_use]
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.http_timeout = timeout_secs;
        self
    }

    /// Set the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.effective_timeout(), Duration::from_secs(30));
        assert!(config.effective_user_agent().starts_with("ghmodels/"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = ClientConfig::default()
            .with_base_url("http://127.0.0.1:8080")
            .with_timeout(5)
            .with_user_agent("custom-agent/1.0");

        assert_eq!(config.effective_timeout(), Duration::from_secs(5));
        assert_eq!(config.effective_user_agent(), "custom-agent/1.0");
        assert_eq!(
            config.parsed_base_url().unwrap().as_str(),
            "http://127.0.0.1:8080/"
        );
    }

    #[test]
    fn test_effective_timeout_uses_default_when_zero() {
        let config = ClientConfig::default().with_timeout(0);
        assert_eq!(
            config.effective_timeout(),
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        );
    }

    #[test]
    fn test_invalid_base_urls_are_rejected() {
        let error = ClientConfig::default()
            .with_base_url("not a url")
            .validate()
            .unwrap_err();
        assert!(matches!(error, Error::Config(_)));

        let error = ClientConfig::default()
            .with_base_url("mailto:someone@example.com")
            .validate()
            .unwrap_err();
        assert!(matches!(error, Error::Config(_)));
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let config: ClientConfig = serde_json::from_str(r#"{"http_timeout": 10}"#).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.http_timeout, 10);
        assert!(config.user_agent.is_none());
    }
}
