// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Raw HTTP dumps for troubleshooting the PowerDNS API interaction.
//!
//! **Security:** the dumps contain the `X-API-Key` header in plain text. They
//! are written only when a [`DebugSink`] other than `Off` is configured.

use crate::config::DebugSink;
use reqwest::header::HeaderMap;
use reqwest::{Request, StatusCode, Version};
use std::fmt::Write as _;
use std::io::Write as _;

/// Dump an outgoing request to the sink.
pub fn dump_request(sink: DebugSink, request: &Request) {
    if sink != DebugSink::Off {
        emit(sink, &render_request(request));
    }
}

/// Dump a received response to the sink.
pub fn dump_response(
    sink: DebugSink,
    version: Version,
    status: StatusCode,
    headers: &HeaderMap,
    body: &str,
) {
    if sink != DebugSink::Off {
        emit(sink, &render_response(version, status, headers, body));
    }
}

pub(crate) fn render_request(request: &Request) -> String {
    let url = request.url();
    let mut target = url.path().to_string();
    if let Some(query) = url.query() {
        target.push('?');
        target.push_str(query);
    }

    let mut dump = String::from("Request:\n");
    let _ = writeln!(
        dump,
        "{} {} {:?}",
        request.method(),
        target,
        request.version()
    );
    if let Some(host) = url.host_str() {
        match url.port() {
            Some(port) => {
                let _ = writeln!(dump, "Host: {host}:{port}");
            }
            None => {
                let _ = writeln!(dump, "Host: {host}");
            }
        }
    }
    write_headers(&mut dump, request.headers());
    dump.push('\n');
    if let Some(bytes) = request.body().and_then(reqwest::Body::as_bytes) {
        dump.push_str(&String::from_utf8_lossy(bytes));
        dump.push('\n');
    }
    dump
}

pub(crate) fn render_response(
    version: Version,
    status: StatusCode,
    headers: &HeaderMap,
    body: &str,
) -> String {
    let mut dump = String::from("Response:\n");
    let _ = writeln!(dump, "{version:?} {status}");
    write_headers(&mut dump, headers);
    dump.push('\n');
    if !body.is_empty() {
        dump.push_str(body);
        dump.push('\n');
    }
    dump
}

fn write_headers(dump: &mut String, headers: &HeaderMap) {
    for (name, value) in headers {
        let _ = writeln!(
            dump,
            "{}: {}",
            name,
            String::from_utf8_lossy(value.as_bytes())
        );
    }
}

fn emit(sink: DebugSink, text: &str) {
    // Dump failures must not fail the API call.
    let _ = match sink {
        DebugSink::Off => Ok(()),
        DebugSink::Stdout => writeln!(std::io::stdout().lock(), "{text}"),
        DebugSink::Stderr => writeln!(std::io::stderr().lock(), "{text}"),
    };
}

#[cfg(test)]
#[path = "debug_tests.rs"]
mod debug_tests;
