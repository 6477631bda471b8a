// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

// Common test utilities for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use pdns_records::errors::GatewayError;
use pdns_records::gateway::{RemoteRecord, RemoteRrset, Zone, ZoneGateway};
use std::collections::HashMap;
use std::sync::Mutex;

/// A gateway call as seen by [`MemoryGateway`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    GetZone(String),
    Upsert {
        name: String,
        rtype: String,
        ttl: u32,
        contents: Vec<String>,
    },
    Delete {
        name: String,
        rtype: String,
    },
}

#[derive(Default)]
struct State {
    zones: HashMap<String, Zone>,
    calls: Vec<Call>,
    fail_on: Option<(String, String)>,
}

/// In-memory PowerDNS stand-in with the same RRset semantics as the server:
/// REPLACE creates or overwrites one RRset, DELETE drops it.
#[derive(Default)]
pub struct MemoryGateway {
    state: Mutex<State>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an empty zone.
    pub fn with_zone(self, zone: &str) -> Self {
        self.state.lock().unwrap().zones.insert(
            zone.to_string(),
            Zone {
                id: zone.to_string(),
                name: zone.to_string(),
                rrsets: Vec::new(),
            },
        );
        self
    }

    /// Seed an RRset directly, bypassing the call log.
    pub fn with_rrset(self, zone: &str, name: &str, rtype: &str, ttl: u32, contents: &[&str]) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            let zone = state.zones.get_mut(zone).expect("zone must be added first");
            zone.rrsets.push(rrset(name, rtype, ttl, contents));
        }
        self
    }

    /// Make writes to this RRset fail with a transport error.
    pub fn fail_writes_to(&self, name: &str, rtype: &str) {
        self.state.lock().unwrap().fail_on = Some((name.to_string(), rtype.to_string()));
    }

    /// Every call made so far.
    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Only the write calls made so far.
    pub fn writes(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| !matches!(call, Call::GetZone(_)))
            .collect()
    }

    /// Current content of one RRset, if present.
    pub fn rrset(&self, zone: &str, name: &str, rtype: &str) -> Option<RemoteRrset> {
        let state = self.state.lock().unwrap();
        state.zones.get(zone)?.find_rrset(name, rtype).cloned()
    }

    fn check_failure(state: &State, name: &str, rtype: &str) -> Result<(), GatewayError> {
        match &state.fail_on {
            Some((n, t)) if n == name && t == rtype => Err(GatewayError::Transport {
                url: "memory://pdns".to_string(),
                reason: "connection reset by peer".to_string(),
            }),
            _ => Ok(()),
        }
    }

    fn zone_mut<'a>(state: &'a mut State, zone: &str) -> Result<&'a mut Zone, GatewayError> {
        state
            .zones
            .get_mut(zone)
            .ok_or_else(|| GatewayError::ZoneNotFound {
                zone: zone.to_string(),
                endpoint: "memory://pdns".to_string(),
            })
    }
}

pub fn rrset(name: &str, rtype: &str, ttl: u32, contents: &[&str]) -> RemoteRrset {
    RemoteRrset {
        name: name.to_string(),
        rtype: Some(rtype.to_string()),
        ttl,
        records: contents
            .iter()
            .map(|content| RemoteRecord {
                content: (*content).to_string(),
                disabled: false,
            })
            .collect(),
    }
}

#[async_trait]
impl ZoneGateway for MemoryGateway {
    async fn get_zone(&self, zone: &str) -> Result<Zone, GatewayError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::GetZone(zone.to_string()));
        Self::zone_mut(&mut state, zone).map(|zone| zone.clone())
    }

    async fn upsert_rrset(
        &self,
        zone: &str,
        name: &str,
        rtype: &str,
        ttl: u32,
        contents: &[String],
    ) -> Result<(), GatewayError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Upsert {
            name: name.to_string(),
            rtype: rtype.to_string(),
            ttl,
            contents: contents.to_vec(),
        });
        Self::check_failure(&state, name, rtype)?;

        let zone = Self::zone_mut(&mut state, zone)?;
        let contents: Vec<&str> = contents.iter().map(String::as_str).collect();
        let replacement = rrset(name, rtype, ttl, &contents);
        zone.rrsets
            .retain(|r| !(r.name == name && r.rtype.as_deref() == Some(rtype)));
        zone.rrsets.push(replacement);
        Ok(())
    }

    async fn delete_rrset(&self, zone: &str, name: &str, rtype: &str) -> Result<(), GatewayError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Delete {
            name: name.to_string(),
            rtype: rtype.to_string(),
        });
        Self::check_failure(&state, name, rtype)?;

        let zone = Self::zone_mut(&mut state, zone)?;
        zone.rrsets
            .retain(|r| !(r.name == name && r.rtype.as_deref() == Some(rtype)));
        Ok(())
    }
}
