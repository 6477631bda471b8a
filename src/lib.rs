// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! # pdns-records - DNS record management for PowerDNS
//!
//! A record-level interface over the PowerDNS HTTP API. Callers read, append,
//! replace and delete individual DNS records; the crate groups them into
//! PowerDNS RRsets, reconciles them with what the server holds and issues one
//! write per RRset.
//!
//! ## Modules
//!
//! - [`provider`] - caller-facing get/append/set/delete operations
//! - [`reconcile`] - RRset grouping and change planning
//! - [`records`] - record types, name handling, TXT quoting, SVCB/HTTPS encoding
//! - [`gateway`] - the zone gateway trait and its PowerDNS HTTP client
//! - [`config`] - provider configuration
//! - [`errors`] - error types
//! - [`constants`] - API paths, record types and defaults
//!
//! ## Example
//!
//! ```rust,no_run
//! use pdns_records::config::ProviderConfig;
//! use pdns_records::provider::{Provider, RecordAppender, RecordGetter};
//! use pdns_records::records::Rr;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), pdns_records::errors::ProviderError> {
//! let provider = Provider::new(ProviderConfig::new("http://127.0.0.1:8081", "secret"));
//!
//! provider
//!     .append_records(
//!         "example.org.",
//!         vec![Rr::txt("_acme-challenge", "token", Duration::from_secs(60)).into()],
//!     )
//!     .await?;
//!
//! for record in provider.get_records("example.org.").await? {
//!     println!("{record}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Consistency
//!
//! Each call is a single fetch, compute, write pass. Writes are applied one
//! RRset at a time and the first failure stops the call; RRsets written
//! before the failure are not rolled back.

pub mod config;
pub mod constants;
pub mod errors;
pub mod gateway;
pub mod provider;
pub mod reconcile;
pub mod records;

pub use config::{DebugSink, ProviderConfig};
pub use errors::{ErrorKind, GatewayError, ProviderError};
pub use provider::{Provider, RecordAppender, RecordDeleter, RecordGetter, RecordSetter};
pub use records::{Record, Rr, ServiceBinding, SvcParams};
