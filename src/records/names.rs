// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Owner name handling.
//!
//! Callers use names relative to the zone (`www`, `@`); PowerDNS uses
//! absolute names with a trailing dot (`www.example.org.`). Conversion is
//! purely textual and never fails: malformed names are passed through for the
//! server to reject.

use super::content::quote_txt;
use super::{Record, Rr};
use crate::constants::{APEX_NAME, RR_TYPE_TXT};

/// Ensure a zone name ends with a dot.
#[must_use]
pub fn normalize_zone(zone: &str) -> String {
    let zone = zone.trim();
    if zone.ends_with('.') {
        zone.to_string()
    } else {
        format!("{zone}.")
    }
}

/// Make `name` absolute within `zone`, always ending with a dot.
///
/// `""` and `"@"` are the apex. A name that ends with a dot and already lies
/// inside the zone is kept; anything else is treated as relative.
///
/// ```
/// use pdns_records::records::names::absolute_name;
///
/// assert_eq!(absolute_name("www", "example.org."), "www.example.org.");
/// assert_eq!(absolute_name("@", "example.org"), "example.org.");
/// assert_eq!(absolute_name("www.example.org.", "example.org."), "www.example.org.");
/// ```
#[must_use]
pub fn absolute_name(name: &str, zone: &str) -> String {
    let zone = normalize_zone(zone);
    let name = name.trim();

    if name.is_empty() || name == APEX_NAME {
        return zone;
    }
    if name.ends_with('.') && is_within_zone(name, &zone) {
        return name.to_string();
    }

    let relative = name.trim_end_matches('.');
    if zone == "." {
        format!("{relative}.")
    } else {
        format!("{relative}.{zone}")
    }
}

/// Make an absolute `fqdn` relative to `zone`; the apex becomes `@`.
///
/// Names outside the zone are returned without their trailing dot.
#[must_use]
pub fn relative_name(fqdn: &str, zone: &str) -> String {
    let fqdn = fqdn.trim_end_matches('.');
    let zone = zone.trim_end_matches('.');

    if zone.is_empty() {
        return fqdn.to_string();
    }
    if fqdn.eq_ignore_ascii_case(zone) {
        return APEX_NAME.to_string();
    }

    let suffix_start = fqdn.len().saturating_sub(zone.len() + 1);
    match fqdn.get(suffix_start..) {
        Some(suffix)
            if suffix.len() == zone.len() + 1
                && suffix.starts_with('.')
                && suffix[1..].eq_ignore_ascii_case(zone) =>
        {
            fqdn[..suffix_start].to_string()
        }
        _ => fqdn.to_string(),
    }
}

fn is_within_zone(fqdn: &str, zone: &str) -> bool {
    let fqdn = fqdn.trim_end_matches('.');
    let zone = zone.trim_end_matches('.');
    if zone.is_empty() || fqdn.eq_ignore_ascii_case(zone) {
        return true;
    }
    fqdn.len() > zone.len()
        && fqdn.as_bytes()[fqdn.len() - zone.len() - 1] == b'.'
        && fqdn[fqdn.len() - zone.len()..].eq_ignore_ascii_case(zone)
}

/// Flatten caller records into plain records with absolute owner names.
///
/// Service bindings are serialized first. Owner names are lower-cased and
/// types upper-cased so names differing only in case land in one RRset; TXT
/// data is quoted afterwards.
#[must_use]
pub fn absolutize_records(zone: &str, records: &[Record]) -> Vec<Rr> {
    records
        .iter()
        .map(|record| {
            let mut rr = record.to_rr();
            rr.name = absolute_name(&rr.name, zone);
            rr.name.make_ascii_lowercase();
            rr.rtype.make_ascii_uppercase();
            if rr.rtype == RR_TYPE_TXT {
                rr.data = quote_txt(&rr.data);
            }
            rr
        })
        .collect()
}

#[cfg(test)]
#[path = "names_tests.rs"]
mod names_tests;
