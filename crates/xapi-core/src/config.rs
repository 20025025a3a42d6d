//! Configuration for xAPI endpoints.
//!
//! An [`EndpointConfig`] names the endpoint a request handler talks to and
//! the xAPI version it announces. It is immutable once a handler is built.

use crate::Error;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;
use validator::Validate;

/// xAPI version announced when none is configured.
pub const DEFAULT_XAPI_VERSION: &str = "1.0.3";

/// Default request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Configuration for an xAPI endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct EndpointConfig {
    /// Base URL of the endpoint (e.g. `https://lrs.example.com/xapi`)
    #[validate(url)]
    pub base_url: String,

    /// Value of the `X-Experience-API-Version` header
    #[validate(length(min = 1))]
    #[serde(default = "default_version")]
    pub version: String,

    /// Request timeout in seconds, enforced by the transport
    #[validate(range(min = 1, max = 300))]
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Optional `User-Agent` override for the transport
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

fn default_version() -> String {
    DEFAULT_XAPI_VERSION.to_string()
}

const fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl EndpointConfig {
    /// Create a configuration for the given base URL with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the URL is invalid.
    pub fn new(base_url: impl Into<String>) -> Result<Self, Error> {
        let config = Self {
            base_url: base_url.into(),
            version: default_version(),
            request_timeout_secs: default_request_timeout_secs(),
            user_agent: None,
        };

        config.check()?;
        Ok(config)
    }

    /// Set the announced xAPI version.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Set request timeout in seconds.
    #[must_use]
    pub const fn with_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout_secs = seconds;
        self
    }

    /// Set the `User-Agent` sent by the transport.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Get the request timeout as a Duration.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate every field.
    ///
    /// Builder methods do not validate, so configurations assembled with them
    /// or deserialized from a file should be checked before use.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] describing the failing fields.
    pub fn check(&self) -> Result<(), Error> {
        self.validate()?;
        Ok(())
    }

    /// Parse the base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn parse_base_url(&self) -> Result<Url, Error> {
        Url::parse(&self.base_url)
            .map_err(|e| Error::ConfigError(format!("Invalid base URL: {e}")))
    }
}
