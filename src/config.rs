// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Provider configuration.
//!
//! The field names match the JSON configuration used by PowerDNS providers in
//! other DNS automation tools, so an existing provider block deserializes as is:
//!
//! ```rust
//! use pdns_records::config::{DebugSink, ProviderConfig};
//!
//! let config: ProviderConfig = serde_json::from_str(
//!     r#"{"server_url": "http://127.0.0.1:8081", "api_token": "secret"}"#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.effective_server_id(), "localhost");
//! assert_eq!(config.debug, DebugSink::Off);
//! ```

use crate::constants::{DEFAULT_SERVER_ID, ENV_API_TOKEN, ENV_DEBUG, ENV_SERVER_ID, ENV_SERVER_URL};
use crate::errors::ProviderError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

/// Where raw HTTP request/response dumps are written.
///
/// **Security:** dumps include the `X-API-Key` header in plain text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DebugSink {
    /// No dumps
    #[default]
    Off,
    /// Dump to standard output
    Stdout,
    /// Dump to standard error
    Stderr,
}

impl FromStr for DebugSink {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "stdout" | "yes" | "true" | "1" => Self::Stdout,
            "stderr" => Self::Stderr,
            _ => Self::Off,
        })
    }
}

impl From<String> for DebugSink {
    fn from(s: String) -> Self {
        let Ok(sink) = s.parse::<Self>();
        sink
    }
}

impl From<DebugSink> for String {
    fn from(sink: DebugSink) -> Self {
        sink.to_string()
    }
}

impl fmt::Display for DebugSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Off => "off",
            Self::Stdout => "stdout",
            Self::Stderr => "stderr",
        })
    }
}

/// Connection settings for a PowerDNS server.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of the PowerDNS web server, e.g. `http://127.0.0.1:8081`
    pub server_url: String,

    /// PowerDNS server id; `localhost` is used when empty
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub server_id: String,

    /// API key sent as `X-API-Key`
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_token: String,

    /// Raw HTTP dump sink
    #[serde(default)]
    pub debug: DebugSink,
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("server_url", &self.server_url)
            .field("server_id", &self.server_id)
            .field("api_token", &"<redacted>")
            .field("debug", &self.debug)
            .finish()
    }
}

impl ProviderConfig {
    /// Create a configuration for the given server and token.
    #[must_use]
    pub fn new(server_url: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            api_token: api_token.into(),
            ..Self::default()
        }
    }

    /// Read the configuration from `PDNS_SERVER_URL`, `PDNS_SERVER_ID`,
    /// `PDNS_API_TOKEN` and `PDNS_DEBUG`. Missing variables become empty
    /// strings; call [`validate`](Self::validate) before use.
    #[must_use]
    pub fn from_env() -> Self {
        let var = |key: &str| std::env::var(key).unwrap_or_default();
        Self {
            server_url: var(ENV_SERVER_URL),
            server_id: var(ENV_SERVER_ID),
            api_token: var(ENV_API_TOKEN),
            debug: DebugSink::from(var(ENV_DEBUG)),
        }
    }

    /// The server id to use in API paths.
    #[must_use]
    pub fn effective_server_id(&self) -> &str {
        let id = self.server_id.trim();
        if id.is_empty() {
            DEFAULT_SERVER_ID
        } else {
            id
        }
    }

    /// Check the required fields and parse the server URL.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::InvalidConfig`] if the URL is missing, does not
    /// parse, is not http(s), or the API token is empty.
    pub fn validate(&self) -> Result<Url, ProviderError> {
        if self.server_url.trim().is_empty() {
            return Err(invalid("server_url is required"));
        }
        let url = Url::parse(self.server_url.trim())
            .map_err(|e| invalid(format!("server_url '{}' is invalid: {e}", self.server_url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!(
                "server_url must use http or https, got '{}'",
                url.scheme()
            )));
        }
        if self.api_token.is_empty() {
            return Err(invalid("api_token is required"));
        }
        Ok(url)
    }
}

fn invalid(reason: impl Into<String>) -> ProviderError {
    ProviderError::InvalidConfig {
        reason: reason.into(),
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
