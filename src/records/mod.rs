// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Caller-facing DNS record types and the transformations applied to them
//! before they reach the RRset reconciler.
//!
//! Callers describe records individually. A record is either a plain
//! resource record ([`Rr`]) whose data is already in presentation format, or
//! a structured [`ServiceBinding`] that is serialized to an `SVCB`/`HTTPS`
//! record on the way in and parsed back on the way out.
//!
//! - [`content`] - dedup keys and TXT quoting
//! - [`names`] - relative/absolute owner names and record flattening
//! - [`svcb`] - service-binding serialization and parsing

pub mod content;
pub mod names;
pub mod svcb;

use std::collections::BTreeMap;
use std::fmt;
use std::net::IpAddr;
use std::time::Duration;

use crate::constants::{RR_TYPE_HTTPS, RR_TYPE_SVCB, RR_TYPE_TXT};

/// SvcParams of a service binding: key to ordered list of values.
///
/// A sorted map keeps the encoded parameter order stable between calls.
pub type SvcParams = BTreeMap<String, Vec<String>>;

/// A plain resource record.
///
/// `name` is relative to the zone on input (`@` or empty for the apex) and
/// absolute with a trailing dot once flattened by [`names::absolutize_records`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rr {
    /// Owner name
    pub name: String,
    /// Record type, e.g. `A`, `TXT`, `MX`
    pub rtype: String,
    /// Record data in presentation format
    pub data: String,
    /// Time to live
    pub ttl: Duration,
}

impl Rr {
    /// Create a record from its raw parts.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        rtype: impl Into<String>,
        data: impl Into<String>,
        ttl: Duration,
    ) -> Self {
        Self {
            name: name.into(),
            rtype: rtype.into(),
            data: data.into(),
            ttl,
        }
    }

    /// `A` or `AAAA` record depending on the address family.
    #[must_use]
    pub fn address(name: impl Into<String>, ip: IpAddr, ttl: Duration) -> Self {
        let rtype = if ip.is_ipv4() { "A" } else { "AAAA" };
        Self::new(name, rtype, ip.to_string(), ttl)
    }

    /// `TXT` record. The text is quoted on the way to the server if needed.
    #[must_use]
    pub fn txt(name: impl Into<String>, text: impl Into<String>, ttl: Duration) -> Self {
        Self::new(name, RR_TYPE_TXT, text, ttl)
    }

    /// `CNAME` record.
    #[must_use]
    pub fn cname(name: impl Into<String>, target: impl Into<String>, ttl: Duration) -> Self {
        Self::new(name, "CNAME", target, ttl)
    }

    /// `MX` record.
    #[must_use]
    pub fn mx(name: impl Into<String>, preference: u16, target: &str, ttl: Duration) -> Self {
        Self::new(name, "MX", format!("{preference} {target}"), ttl)
    }

    /// `SRV` record; `name` should already carry the `_service._proto` labels.
    #[must_use]
    pub fn srv(
        name: impl Into<String>,
        priority: u16,
        weight: u16,
        port: u16,
        target: &str,
        ttl: Duration,
    ) -> Self {
        Self::new(
            name,
            "SRV",
            format!("{priority} {weight} {port} {target}"),
            ttl,
        )
    }
}

/// A structured service-binding record (`SVCB` or `HTTPS`).
///
/// Never sent as is: [`svcb::to_rr`] turns it into a plain record first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceBinding {
    /// Owner name without the `_port` / `_scheme` prefix labels
    pub name: String,
    /// URL scheme or service name, e.g. `https`, `dns`
    pub scheme: String,
    /// Time to live
    pub ttl: Duration,
    /// SvcPriority; `0` is AliasMode
    pub priority: u16,
    /// TargetName
    pub target: String,
    /// Non-default port, encoded as a `_port` owner prefix
    pub port: Option<u16>,
    /// SvcParams
    pub params: SvcParams,
}

/// A record as seen by callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    /// Plain resource record
    Rr(Rr),
    /// Structured service binding
    ServiceBinding(ServiceBinding),
}

impl Record {
    /// Flatten into a plain record (relative name, data in presentation format).
    #[must_use]
    pub fn to_rr(&self) -> Rr {
        match self {
            Self::Rr(rr) => rr.clone(),
            Self::ServiceBinding(binding) => svcb::to_rr(binding),
        }
    }

    /// Build the caller-facing record for a plain record read from a zone.
    ///
    /// `SVCB`/`HTTPS` data that parses is returned as a [`ServiceBinding`];
    /// everything else stays a plain record.
    #[must_use]
    pub fn from_rr(rr: Rr) -> Self {
        if rr.rtype == RR_TYPE_SVCB || rr.rtype == RR_TYPE_HTTPS {
            if let Some(binding) = svcb::parse(&rr) {
                return Self::ServiceBinding(binding);
            }
        }
        Self::Rr(rr)
    }

    /// Time to live of the record.
    #[must_use]
    pub fn ttl(&self) -> Duration {
        match self {
            Self::Rr(rr) => rr.ttl,
            Self::ServiceBinding(binding) => binding.ttl,
        }
    }
}

impl From<Rr> for Record {
    fn from(rr: Rr) -> Self {
        Self::Rr(rr)
    }
}

impl From<ServiceBinding> for Record {
    fn from(binding: ServiceBinding) -> Self {
        Self::ServiceBinding(binding)
    }
}

impl fmt::Display for Rr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\tIN\t{}\t{}",
            self.name,
            self.ttl.as_secs(),
            self.rtype,
            self.data
        )
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_rr().fmt(f)
    }
}
