// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Service-binding (`SVCB` / `HTTPS`) serialization.
//!
//! A [`ServiceBinding`] is written as `<priority> <target> <params>` where the
//! params use PowerDNS presentation syntax:
//!
//! ```text
//! 1 svc.example.org. alpn=h2,h3 ech="AEn+DQBF..." port=8443
//! ```
//!
//! HTTP-like schemes become `HTTPS` records on the name itself; every other
//! scheme becomes an `SVCB` record under `_<scheme>.<name>`. A non-default
//! port adds a `_<port>.` label in front.

use super::{Rr, ServiceBinding, SvcParams};
use crate::constants::{
    ALIAS_MODE_PRIORITY, APEX_NAME, DEFAULT_PLAIN_PORT, DEFAULT_TLS_PORT, ECH_PARAM_KEY,
    HTTPS_SCHEMES, RR_TYPE_HTTPS, RR_TYPE_SVCB,
};

/// Default port of an HTTP-like scheme.
fn default_port(scheme: &str) -> Option<u16> {
    match scheme {
        "https" | "wss" => Some(DEFAULT_TLS_PORT),
        "http" | "ws" => Some(DEFAULT_PLAIN_PORT),
        _ => None,
    }
}

fn is_https_scheme(scheme: &str) -> bool {
    HTTPS_SCHEMES.contains(&scheme)
}

/// Prepend a label to a relative owner name; the apex has no label of its own.
fn prefix_label(label: &str, name: &str) -> String {
    if name.is_empty() || name == APEX_NAME {
        label.to_string()
    } else {
        format!("{label}.{name}")
    }
}

/// Serialize a service binding into a plain record with a relative name.
///
/// Two caller mistakes are corrected silently: a scheme-default port is
/// treated as unset, and params are dropped in AliasMode (priority 0).
#[must_use]
pub fn to_rr(binding: &ServiceBinding) -> Rr {
    let scheme = binding.scheme.as_str();
    let (rtype, mut name) = if is_https_scheme(scheme) {
        (RR_TYPE_HTTPS, binding.name.clone())
    } else {
        (RR_TYPE_SVCB, prefix_label(&format!("_{scheme}"), &binding.name))
    };

    let port = binding
        .port
        .filter(|port| *port != 0 && Some(*port) != default_port(scheme));
    if let Some(port) = port {
        name = prefix_label(&format!("_{port}"), &name);
    }

    let params = if binding.priority == ALIAS_MODE_PRIORITY {
        String::new()
    } else {
        encode_params(&binding.params)
    };

    Rr {
        name,
        rtype: rtype.to_string(),
        data: format!("{} {} {}", binding.priority, binding.target, params),
        ttl: binding.ttl,
    }
}

/// Encode SvcParams in PowerDNS presentation syntax.
///
/// - `=value` is omitted when every value is empty
/// - values are quoted if any contains a space or `"`, and `ech` is always quoted
/// - `"` becomes `\"` and `,` becomes `\,` inside values
/// - values are comma-joined, keys space-joined in key order
///
/// ```
/// use pdns_records::records::svcb::encode_params;
/// use pdns_records::records::SvcParams;
///
/// let mut params = SvcParams::new();
/// params.insert("alpn".into(), vec!["h2".into(), "h3".into()]);
/// params.insert("ech".into(), vec!["asdf".into()]);
/// params.insert("no-default-alpn".into(), vec![]);
///
/// assert_eq!(encode_params(&params), r#"alpn=h2,h3 ech="asdf" no-default-alpn"#);
/// ```
#[must_use]
pub fn encode_params(params: &SvcParams) -> String {
    let mut encoded = String::new();
    for (key, values) in params {
        if !encoded.is_empty() {
            encoded.push(' ');
        }
        encoded.push_str(key);

        if values.iter().all(String::is_empty) {
            continue;
        }
        let needs_quotes =
            key == ECH_PARAM_KEY || values.iter().any(|v| v.contains(['"', ' ']));

        encoded.push('=');
        if needs_quotes {
            encoded.push('"');
        }
        for (i, value) in values.iter().enumerate() {
            if i > 0 {
                encoded.push(',');
            }
            encoded.push_str(&value.replace('"', "\\\"").replace(',', "\\,"));
        }
        if needs_quotes {
            encoded.push('"');
        }
    }
    encoded
}

/// Parse an `SVCB`/`HTTPS` plain record back into a service binding.
///
/// `rr.name` must be relative to the zone. Returns `None` when the type is
/// not a binding type, the data does not start with `<priority> <target>`,
/// or an `SVCB` owner lacks its `_<scheme>` label.
#[must_use]
pub fn parse(rr: &Rr) -> Option<ServiceBinding> {
    let mut labels = rr.name.split('.').peekable();

    let port = labels
        .peek()
        .and_then(|label| label.strip_prefix('_')?.parse::<u16>().ok());
    if port.is_some() {
        labels.next();
    }

    let scheme = if rr.rtype.eq_ignore_ascii_case(RR_TYPE_HTTPS) {
        "https".to_string()
    } else if rr.rtype.eq_ignore_ascii_case(RR_TYPE_SVCB) {
        let label = labels.next()?;
        let scheme = label.strip_prefix('_').filter(|s| !s.is_empty())?;
        scheme.to_string()
    } else {
        return None;
    };

    let rest: Vec<&str> = labels.collect();
    let name = if rest.is_empty() || rest == [""] {
        APEX_NAME.to_string()
    } else {
        rest.join(".")
    };

    let data = rr.data.trim();
    let (priority, data) = data.split_once(char::is_whitespace)?;
    let priority = priority.parse::<u16>().ok()?;
    let data = data.trim_start();
    let (target, params) = match data.split_once(char::is_whitespace) {
        Some((target, params)) => (target, params),
        None => (data, ""),
    };
    if target.is_empty() {
        return None;
    }

    Some(ServiceBinding {
        name,
        scheme,
        ttl: rr.ttl,
        priority,
        target: target.to_string(),
        port,
        params: parse_params(params)?,
    })
}

/// Parse SvcParams from presentation syntax; inverse of [`encode_params`].
///
/// Returns `None` on an unterminated quoted value.
#[must_use]
pub fn parse_params(input: &str) -> Option<SvcParams> {
    let mut params = SvcParams::new();
    let mut chars = input.chars().peekable();

    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        if chars.peek().is_none() {
            return Some(params);
        }

        let mut key = String::new();
        while let Some(c) = chars.next_if(|c| *c != '=' && !c.is_whitespace()) {
            key.push(c);
        }

        if chars.next_if_eq(&'=').is_none() {
            params.insert(key, Vec::new());
            continue;
        }

        // Raw value text with escapes still in place.
        let mut raw = String::new();
        if chars.next_if_eq(&'"').is_some() {
            let mut closed = false;
            while let Some(c) = chars.next() {
                match c {
                    '\\' => {
                        raw.push(c);
                        raw.push(chars.next()?);
                    }
                    '"' => {
                        closed = true;
                        break;
                    }
                    _ => raw.push(c),
                }
            }
            if !closed {
                return None;
            }
        } else {
            while let Some(c) = chars.next_if(|c| !c.is_whitespace()) {
                raw.push(c);
                if c == '\\' {
                    if let Some(escaped) = chars.next() {
                        raw.push(escaped);
                    }
                }
            }
        }

        params.insert(key, split_values(&raw));
    }
}

/// Split a raw value list on unescaped commas, removing `\,` and `\"` escapes.
fn split_values(raw: &str) -> Vec<String> {
    let mut values = Vec::new();
    let mut current = String::new();
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(escaped @ (',' | '"')) => current.push(escaped),
                Some(other) => {
                    current.push('\\');
                    current.push(other);
                }
                None => current.push('\\'),
            },
            ',' => values.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    values.push(current);
    values
}

#[cfg(test)]
#[path = "svcb_tests.rs"]
mod svcb_tests;
