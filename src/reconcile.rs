// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! RRset reconciliation.
//!
//! PowerDNS stores one RRset per (name, type) with a shared TTL and an
//! ordered content list; callers hand in individual records. This module
//! groups flat records per RRset and computes, for each group, the single
//! write that brings the server to the desired state:
//!
//! | Mode   | Remote RRset | Write                                                  |
//! |--------|--------------|--------------------------------------------------------|
//! | append | any          | replace with `dedup(existing ++ new)`, group TTL       |
//! | set    | any          | replace with exactly the group contents, group TTL     |
//! | delete | missing      | nothing                                                |
//! | delete | present      | `existing \ removed`; delete RRset if that is empty,   |
//! |        |              | otherwise replace keeping the *existing* TTL           |
//!
//! Contents compare by [`canonical_key`], so `a.example.` and `a.example`
//! are the same value. Planning is pure; the provider executes the plan.

use crate::gateway::Zone;
use crate::records::content::canonical_key;
use crate::records::Rr;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::time::Duration;

/// Identity of an RRset: absolute owner name and record type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RrsetKey {
    /// Absolute owner name
    pub name: String,
    /// Record type
    pub rtype: String,
}

impl fmt::Display for RrsetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.rtype)
    }
}

/// Flat records sharing one (name, type).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RrsetGroup {
    /// The RRset the records belong to
    pub key: RrsetKey,
    /// Records in input order; never empty
    pub records: Vec<Rr>,
}

impl RrsetGroup {
    /// Effective TTL of the group in seconds: the first record's TTL.
    #[must_use]
    pub fn ttl(&self) -> u32 {
        self.records.first().map_or(0, |rr| ttl_secs(rr.ttl))
    }

    /// Content strings in input order.
    #[must_use]
    pub fn contents(&self) -> Vec<String> {
        self.records.iter().map(|rr| rr.data.clone()).collect()
    }
}

/// A single write against one RRset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RrsetChange {
    /// Create or replace the RRset with exactly these contents
    Replace {
        /// Target RRset
        key: RrsetKey,
        /// TTL in seconds
        ttl: u32,
        /// Full content list
        contents: Vec<String>,
    },
    /// Remove the whole RRset
    Delete {
        /// Target RRset
        key: RrsetKey,
    },
}

impl RrsetChange {
    /// The RRset this change writes.
    #[must_use]
    pub fn key(&self) -> &RrsetKey {
        match self {
            Self::Replace { key, .. } | Self::Delete { key } => key,
        }
    }
}

/// TTL in whole seconds, saturating at `u32::MAX`.
#[must_use]
pub fn ttl_secs(ttl: Duration) -> u32 {
    u32::try_from(ttl.as_secs()).unwrap_or(u32::MAX)
}

/// Group flat records by (name, type).
///
/// Groups come out in first-seen order and keep input order inside. Names
/// and types compare case-insensitively; the key holds the lower-cased name
/// and upper-cased type.
#[must_use]
pub fn group_records(records: Vec<Rr>) -> Vec<RrsetGroup> {
    let mut index: HashMap<RrsetKey, usize> = HashMap::new();
    let mut groups: Vec<RrsetGroup> = Vec::new();

    for rr in records {
        let key = RrsetKey {
            name: rr.name.to_ascii_lowercase(),
            rtype: rr.rtype.to_ascii_uppercase(),
        };
        match index.get(&key) {
            Some(&i) => groups[i].records.push(rr),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push(RrsetGroup {
                    key,
                    records: vec![rr],
                });
            }
        }
    }
    groups
}

/// Union of `existing` and `new`, first occurrence of each canonical value wins.
#[must_use]
pub fn merge_contents(existing: &[String], new: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut merged = Vec::with_capacity(existing.len() + new.len());
    for content in existing.iter().chain(new) {
        if seen.insert(canonical_key(content)) {
            merged.push(content.clone());
        }
    }
    merged
}

/// `existing` without any value whose canonical form is in `remove`.
#[must_use]
pub fn remove_contents(existing: &[String], remove: &[String]) -> Vec<String> {
    let remove: HashSet<&str> = remove.iter().map(|c| canonical_key(c)).collect();
    existing
        .iter()
        .filter(|content| !remove.contains(canonical_key(content)))
        .cloned()
        .collect()
}

/// Plan an append: merge each group into the remote RRset.
#[must_use]
pub fn plan_append(zone: &Zone, groups: &[RrsetGroup]) -> Vec<RrsetChange> {
    groups
        .iter()
        .map(|group| {
            let existing = zone
                .find_rrset(&group.key.name, &group.key.rtype)
                .map(|rrset| rrset.contents())
                .unwrap_or_default();
            RrsetChange::Replace {
                key: group.key.clone(),
                ttl: group.ttl(),
                contents: merge_contents(&existing, &group.contents()),
            }
        })
        .collect()
}

/// Plan a set: replace each RRset with exactly the group contents.
#[must_use]
pub fn plan_set(groups: &[RrsetGroup]) -> Vec<RrsetChange> {
    groups
        .iter()
        .map(|group| RrsetChange::Replace {
            key: group.key.clone(),
            ttl: group.ttl(),
            contents: group.contents(),
        })
        .collect()
}

/// Plan a delete: remove group contents from each remote RRset.
///
/// Groups without a remote RRset produce no change.
#[must_use]
pub fn plan_delete(zone: &Zone, groups: &[RrsetGroup]) -> Vec<RrsetChange> {
    groups
        .iter()
        .filter_map(|group| {
            let rrset = zone.find_rrset(&group.key.name, &group.key.rtype)?;
            let remaining = remove_contents(&rrset.contents(), &group.contents());
            Some(if remaining.is_empty() {
                RrsetChange::Delete {
                    key: group.key.clone(),
                }
            } else {
                RrsetChange::Replace {
                    key: group.key.clone(),
                    ttl: rrset.ttl,
                    contents: remaining,
                }
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "reconcile_tests.rs"]
mod reconcile_tests;
