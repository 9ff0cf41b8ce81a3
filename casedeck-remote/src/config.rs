//! Configuration for the remote gateway

use serde::Deserialize;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

fn default_timeout() -> Duration {
    Duration::from_secs(DEFAULT_TIMEOUT_SECS)
}

fn default_user_agent() -> String {
    format!("casedeck-remote/{}", env!("CARGO_PKG_VERSION"))
}

/// Connection settings for [`RemoteGateway`](crate::RemoteGateway).
///
/// Only `base_url` is required. The remaining fields default to a 30
/// second request timeout, no authentication, and a user agent naming
/// this crate and its version.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteConfig {
    /// Root URL of the task API, e.g. `https://boards.example.com`
    pub base_url: String,

    /// Bearer token attached to every request when set
    #[serde(default)]
    pub auth_token: Option<String>,

    /// Per-request timeout
    #[serde(default = "default_timeout")]
    pub timeout: Duration,

    /// User-Agent header value
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl RemoteConfig {
    /// Create a configuration for the given API root with default settings
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            auth_token: None,
            timeout: default_timeout(),
            user_agent: default_user_agent(),
        }
    }

    /// Set the bearer token sent with every request
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Set the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the per-request timeout in whole seconds
    pub fn with_timeout_seconds(self, seconds: u64) -> Self {
        self.with_timeout(Duration::from_secs(seconds))
    }

    /// Set the User-Agent header value
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
