// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Error types for PowerDNS record operations.
//!
//! This module provides specialized error types for:
//! - PowerDNS HTTP API calls (zone fetch, RRset replace, RRset delete)
//! - Record-level operations that wrap those calls with zone and RRset context
//! - Provider configuration problems
//!
//! Errors are never retried or aggregated: the first failure of a call is
//! returned and processing of that call stops.

use std::fmt;
use thiserror::Error;

/// Errors returned by a [`ZoneGateway`](crate::gateway::ZoneGateway).
///
/// These errors represent failures when talking to the PowerDNS HTTP API.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Zone not found (HTTP 404, or HTTP 422 "Could not find domain")
    #[error("Zone '{zone}' not found on {endpoint}")]
    ZoneNotFound {
        /// The zone name that was not found
        zone: String,
        /// The PowerDNS endpoint that answered
        endpoint: String,
    },

    /// The server rejected the request content (HTTP 400 or 422)
    ///
    /// PowerDNS answers this way when record content does not parse for its
    /// type. Input is not validated locally, so this is how malformed records
    /// surface.
    #[error("Request to {url} rejected (HTTP {status}): {body}")]
    Rejected {
        /// The URL that rejected the request
        url: String,
        /// HTTP status code
        status: u16,
        /// Response body or error message
        body: String,
    },

    /// HTTP connection failed (connection refused, DNS failure, timeout)
    #[error("HTTP request to {url} failed: {reason}")]
    Transport {
        /// The URL that could not be reached
        url: String,
        /// Reason for the failure
        reason: String,
    },

    /// Unexpected HTTP status from the PowerDNS API
    #[error("Unexpected HTTP response from {url}: {status} {body}")]
    UnexpectedResponse {
        /// The URL that returned the unexpected response
        url: String,
        /// HTTP status code
        status: u16,
        /// Response body or error message
        body: String,
    },

    /// The response body could not be decoded
    #[error("Failed to decode response from {url}: {reason}")]
    Decode {
        /// The URL whose response failed to decode
        url: String,
        /// Decoder error message
        reason: String,
    },
}

impl GatewayError {
    /// Returns true if the error is transient and a later attempt may succeed.
    ///
    /// Nothing in this crate retries; the classification is for callers.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport { .. } => true,
            Self::UnexpectedResponse { status, .. } => *status == 429 || *status >= 500,
            Self::ZoneNotFound { .. } | Self::Rejected { .. } | Self::Decode { .. } => false,
        }
    }

    /// Returns the error kind of this gateway failure.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ZoneNotFound { .. } => ErrorKind::ZoneNotFound,
            Self::Rejected { .. } => ErrorKind::MalformedInput,
            Self::Transport { .. } | Self::UnexpectedResponse { .. } | Self::Decode { .. } => {
                ErrorKind::Transport
            }
        }
    }
}

/// Coarse classification of every error this crate returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The zone does not exist on the server
    ZoneNotFound,
    /// Network or HTTP failure talking to the server
    Transport,
    /// The server refused record content
    MalformedInput,
    /// The provider configuration is unusable
    Configuration,
}

impl ErrorKind {
    /// Stable reason code, suitable for status fields and metrics labels.
    #[must_use]
    pub fn reason(self) -> &'static str {
        match self {
            Self::ZoneNotFound => "ZoneNotFound",
            Self::Transport => "TransportError",
            Self::MalformedInput => "MalformedInput",
            Self::Configuration => "InvalidConfiguration",
        }
    }
}

/// The caller-facing operation an error happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Reading all records of a zone
    Get,
    /// Appending records
    Append,
    /// Replacing records
    Set,
    /// Deleting records
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Self::Get => "get",
            Self::Append => "append",
            Self::Set => "set",
            Self::Delete => "delete",
        };
        f.write_str(verb)
    }
}

/// Error type returned by the [`Provider`](crate::provider::Provider) operations.
///
/// Wraps gateway failures with the operation, zone and (for writes) the RRset
/// that failed, so a group that failed can be told apart from groups that
/// were never attempted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// Provider configuration is missing or invalid
    #[error("Invalid provider configuration: {reason}")]
    InvalidConfig {
        /// Explanation of what is invalid
        reason: String,
    },

    /// Fetching the zone failed
    #[error("Failed to {operation} records in zone '{zone}': {source}")]
    Zone {
        /// Operation being performed
        operation: Operation,
        /// The zone being read
        zone: String,
        /// Underlying gateway failure
        source: GatewayError,
    },

    /// Writing one RRset failed; later RRsets of the same call were not attempted
    #[error("Failed to {operation} {rtype} RRset '{name}' in zone '{zone}': {source}")]
    Rrset {
        /// Operation being performed
        operation: Operation,
        /// The zone containing the RRset
        zone: String,
        /// Absolute owner name of the RRset
        name: String,
        /// Record type of the RRset
        rtype: String,
        /// Underlying gateway failure
        source: GatewayError,
    },
}

impl ProviderError {
    /// Returns the error kind.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidConfig { .. } => ErrorKind::Configuration,
            Self::Zone { source, .. } | Self::Rrset { source, .. } => source.kind(),
        }
    }

    /// Returns true if the error is transient and the call may be repeated.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::InvalidConfig { .. } => false,
            Self::Zone { source, .. } | Self::Rrset { source, .. } => source.is_transient(),
        }
    }

    /// Returns the stable reason code for this error.
    #[must_use]
    pub fn reason(&self) -> &'static str {
        self.kind().reason()
    }
}

#[cfg(test)]
#[path = "errors_tests.rs"]
mod errors_tests;
