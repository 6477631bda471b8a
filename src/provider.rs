// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Caller-facing record operations.
//!
//! [`Provider`] implements one trait per operation ([`RecordGetter`],
//! [`RecordAppender`], [`RecordSetter`], [`RecordDeleter`]). Every mutating
//! call is a single linear pass:
//!
//! 1. fetch the zone (append and delete only)
//! 2. flatten the input records to absolute plain records
//! 3. group them per RRset and plan one write per group
//! 4. execute the writes in group order, stopping at the first failure
//!
//! Writes that succeeded before a failure stay applied.

use crate::config::ProviderConfig;
use crate::errors::{Operation, ProviderError};
use crate::gateway::{PowerDnsClient, Zone, ZoneGateway};
use crate::reconcile::{group_records, plan_append, plan_delete, plan_set, RrsetChange};
use crate::records::names::{absolutize_records, normalize_zone, relative_name};
use crate::records::{Record, Rr};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, info};

/// Reads all records of a zone.
#[async_trait]
pub trait RecordGetter {
    /// Return every record in `zone` with names relative to the zone.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway cannot be built or the zone cannot be read.
    async fn get_records(&self, zone: &str) -> Result<Vec<Record>, ProviderError>;
}

/// Adds records to existing RRsets.
#[async_trait]
pub trait RecordAppender {
    /// Merge `records` into their RRsets; duplicates are ignored.
    ///
    /// # Errors
    ///
    /// Returns the first gateway failure; earlier writes are kept.
    async fn append_records(
        &self,
        zone: &str,
        records: Vec<Record>,
    ) -> Result<Vec<Record>, ProviderError>;
}

/// Replaces RRsets.
#[async_trait]
pub trait RecordSetter {
    /// Replace each touched RRset with exactly the given records.
    ///
    /// # Errors
    ///
    /// Returns the first gateway failure; earlier writes are kept.
    async fn set_records(
        &self,
        zone: &str,
        records: Vec<Record>,
    ) -> Result<Vec<Record>, ProviderError>;
}

/// Removes records from RRsets.
#[async_trait]
pub trait RecordDeleter {
    /// Remove `records` from their RRsets, deleting RRsets that become empty.
    ///
    /// # Errors
    ///
    /// Returns the first gateway failure; earlier writes are kept.
    async fn delete_records(
        &self,
        zone: &str,
        records: Vec<Record>,
    ) -> Result<Vec<Record>, ProviderError>;
}

/// PowerDNS record provider.
///
/// The gateway is built on first use from [`ProviderConfig`] and reused for
/// the life of the provider. Concurrent first calls build it once.
pub struct Provider {
    config: ProviderConfig,
    gateway: OnceCell<Arc<dyn ZoneGateway>>,
}

impl std::fmt::Debug for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Provider")
            .field("config", &self.config)
            .field("gateway_initialized", &self.gateway.initialized())
            .finish()
    }
}

impl Provider {
    /// Create a provider that connects lazily using `config`.
    #[must_use]
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            config,
            gateway: OnceCell::new(),
        }
    }

    /// Create a provider around an already built gateway.
    #[must_use]
    pub fn with_gateway(config: ProviderConfig, gateway: Arc<dyn ZoneGateway>) -> Self {
        Self {
            config,
            gateway: OnceCell::new_with(Some(gateway)),
        }
    }

    /// The configuration this provider was created with.
    #[must_use]
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    async fn gateway(&self) -> Result<&Arc<dyn ZoneGateway>, ProviderError> {
        self.gateway
            .get_or_try_init(|| async {
                let client = PowerDnsClient::from_config(&self.config)?;
                debug!(client = ?client, "Initialized PowerDNS gateway");
                Ok::<Arc<dyn ZoneGateway>, ProviderError>(Arc::new(client))
            })
            .await
    }

    async fn fetch_zone(
        gateway: &dyn ZoneGateway,
        operation: Operation,
        zone: &str,
    ) -> Result<Zone, ProviderError> {
        gateway
            .get_zone(zone)
            .await
            .map_err(|source| ProviderError::Zone {
                operation,
                zone: zone.to_string(),
                source,
            })
    }

    async fn apply(
        gateway: &dyn ZoneGateway,
        operation: Operation,
        zone: &str,
        changes: Vec<RrsetChange>,
    ) -> Result<(), ProviderError> {
        for change in changes {
            let key = change.key().clone();
            let result = match &change {
                RrsetChange::Replace { key, ttl, contents } => {
                    debug!(
                        zone = %zone,
                        name = %key.name,
                        rtype = %key.rtype,
                        ttl = *ttl,
                        count = contents.len(),
                        "Replacing RRset"
                    );
                    gateway
                        .upsert_rrset(zone, &key.name, &key.rtype, *ttl, contents)
                        .await
                }
                RrsetChange::Delete { key } => {
                    debug!(zone = %zone, name = %key.name, rtype = %key.rtype, "Deleting RRset");
                    gateway.delete_rrset(zone, &key.name, &key.rtype).await
                }
            };

            result.map_err(|source| ProviderError::Rrset {
                operation,
                zone: zone.to_string(),
                name: key.name,
                rtype: key.rtype,
                source,
            })?;
        }
        Ok(())
    }
}

#[async_trait]
impl RecordGetter for Provider {
    async fn get_records(&self, zone: &str) -> Result<Vec<Record>, ProviderError> {
        let zone = normalize_zone(zone);
        let gateway = self.gateway().await?;
        let remote = Self::fetch_zone(gateway.as_ref(), Operation::Get, &zone).await?;

        let mut records = Vec::new();
        for rrset in &remote.rrsets {
            let Some(rtype) = rrset.rtype.as_deref() else {
                debug!(zone = %zone, name = %rrset.name, "Skipping RRset without a type");
                continue;
            };
            let name = relative_name(&rrset.name, &zone);
            let ttl = Duration::from_secs(u64::from(rrset.ttl));
            records.extend(
                rrset
                    .records
                    .iter()
                    .map(|record| Record::from_rr(Rr::new(&name, rtype, &record.content, ttl))),
            );
        }

        debug!(zone = %zone, count = records.len(), "Fetched zone records");
        Ok(records)
    }
}

#[async_trait]
impl RecordAppender for Provider {
    async fn append_records(
        &self,
        zone: &str,
        records: Vec<Record>,
    ) -> Result<Vec<Record>, ProviderError> {
        let zone = normalize_zone(zone);
        let gateway = self.gateway().await?;
        let remote = Self::fetch_zone(gateway.as_ref(), Operation::Append, &zone).await?;

        let groups = group_records(absolutize_records(&zone, &records));
        let changes = plan_append(&remote, &groups);
        let writes = changes.len();
        Self::apply(gateway.as_ref(), Operation::Append, &zone, changes).await?;

        info!(zone = %zone, records = records.len(), rrsets = writes, "Appended records");
        Ok(records)
    }
}

#[async_trait]
impl RecordSetter for Provider {
    async fn set_records(
        &self,
        zone: &str,
        records: Vec<Record>,
    ) -> Result<Vec<Record>, ProviderError> {
        let zone = normalize_zone(zone);
        let gateway = self.gateway().await?;

        let groups = group_records(absolutize_records(&zone, &records));
        let changes = plan_set(&groups);
        let writes = changes.len();
        Self::apply(gateway.as_ref(), Operation::Set, &zone, changes).await?;

        info!(zone = %zone, records = records.len(), rrsets = writes, "Set records");
        Ok(records)
    }
}

#[async_trait]
impl RecordDeleter for Provider {
    async fn delete_records(
        &self,
        zone: &str,
        records: Vec<Record>,
    ) -> Result<Vec<Record>, ProviderError> {
        let zone = normalize_zone(zone);
        let gateway = self.gateway().await?;
        let remote = Self::fetch_zone(gateway.as_ref(), Operation::Delete, &zone).await?;

        let groups = group_records(absolutize_records(&zone, &records));
        for group in &groups {
            if remote.find_rrset(&group.key.name, &group.key.rtype).is_none() {
                debug!(
                    zone = %zone,
                    name = %group.key.name,
                    rtype = %group.key.rtype,
                    "RRset not present, nothing to delete"
                );
            }
        }
        let changes = plan_delete(&remote, &groups);
        let writes = changes.len();
        Self::apply(gateway.as_ref(), Operation::Delete, &zone, changes).await?;

        info!(zone = %zone, records = records.len(), rrsets = writes, "Deleted records");
        Ok(records)
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod provider_tests;
