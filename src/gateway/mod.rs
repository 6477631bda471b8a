// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Zone gateway: the boundary to the PowerDNS server.
//!
//! The reconciler only needs three calls against the server:
//!
//! - fetch a zone with all of its RRsets
//! - create or replace one RRset with an exact content list
//! - delete one RRset
//!
//! [`ZoneGateway`] captures that contract so the provider can run against
//! [`PowerDnsClient`] in production and an in-memory fake in tests.

pub mod client;
pub mod debug;

pub use client::PowerDnsClient;

use crate::errors::GatewayError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A zone as returned by `GET /servers/{server_id}/zones/{zone_id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    /// Zone id (canonical name with `/` escaped as `=2F`)
    #[serde(default)]
    pub id: String,
    /// Absolute zone name
    pub name: String,
    /// All RRsets of the zone
    #[serde(default)]
    pub rrsets: Vec<RemoteRrset>,
}

impl Zone {
    /// Find the RRset for an owner name and type.
    ///
    /// Names compare case-insensitively, as DNS names do.
    #[must_use]
    pub fn find_rrset(&self, name: &str, rtype: &str) -> Option<&RemoteRrset> {
        self.rrsets.iter().find(|rrset| {
            rrset.name.eq_ignore_ascii_case(name)
                && rrset
                    .rtype
                    .as_deref()
                    .is_some_and(|t| t.eq_ignore_ascii_case(rtype))
        })
    }
}

/// One name+type group held by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteRrset {
    /// Absolute owner name
    pub name: String,
    /// Record type; PowerDNS omits it for some internal entries
    #[serde(rename = "type", default)]
    pub rtype: Option<String>,
    /// TTL shared by every record of the set
    #[serde(default)]
    pub ttl: u32,
    /// Records in server order
    #[serde(default)]
    pub records: Vec<RemoteRecord>,
}

impl RemoteRrset {
    /// Content strings of the records, in server order.
    #[must_use]
    pub fn contents(&self) -> Vec<String> {
        self.records.iter().map(|r| r.content.clone()).collect()
    }
}

/// One record inside an RRset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteRecord {
    /// Record data in presentation format
    pub content: String,
    /// Whether the record is disabled on the server
    #[serde(default)]
    pub disabled: bool,
}

/// Operations the reconciler needs from a PowerDNS server.
///
/// Implementations must not retry or cache: every call goes to the server.
#[async_trait]
pub trait ZoneGateway: Send + Sync {
    /// Fetch the full zone state.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::ZoneNotFound`] if the zone does not exist, or a
    /// transport error.
    async fn get_zone(&self, zone: &str) -> Result<Zone, GatewayError>;

    /// Create or replace one RRset with exactly `contents`.
    ///
    /// # Errors
    ///
    /// Returns an error if the server rejects the change or cannot be reached.
    async fn upsert_rrset(
        &self,
        zone: &str,
        name: &str,
        rtype: &str,
        ttl: u32,
        contents: &[String],
    ) -> Result<(), GatewayError>;

    /// Remove one RRset entirely.
    ///
    /// # Errors
    ///
    /// Returns an error if the server rejects the change or cannot be reached.
    async fn delete_rrset(&self, zone: &str, name: &str, rtype: &str) -> Result<(), GatewayError>;
}
