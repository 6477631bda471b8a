// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Record content canonicalization.

/// Key used to compare record contents for equality.
///
/// Strips one trailing `.` so `mail.example.org.` and `mail.example.org`
/// compare equal. The original string is what gets written.
#[must_use]
pub fn canonical_key(content: &str) -> &str {
    content.strip_suffix('.').unwrap_or(content)
}

/// Bring TXT content into the quoted presentation form PowerDNS expects.
///
/// Content that starts and ends with `"` is considered quoted and returned
/// unchanged. Anything else is wrapped in quotes with embedded unescaped `"`
/// escaped as `\"`. Backslashes are kept so `\DDD` escapes survive.
///
/// # Examples
///
/// ```
/// use pdns_records::records::content::quote_txt;
///
/// assert_eq!(quote_txt("\"v=spf1 -all\""), "\"v=spf1 -all\"");
/// assert_eq!(quote_txt("v=spf1 -all"), "\"v=spf1 -all\"");
/// assert_eq!(quote_txt("say \"hi\""), "\"say \\\"hi\\\"\"");
/// ```
#[must_use]
pub fn quote_txt(content: &str) -> String {
    if is_quoted(content) {
        return content.to_string();
    }

    let mut quoted = String::with_capacity(content.len() + 2);
    quoted.push('"');
    let mut escaped = false;
    for c in content.chars() {
        if c == '"' && !escaped {
            quoted.push('\\');
        }
        escaped = c == '\\' && !escaped;
        quoted.push(c);
    }
    // A dangling backslash would escape the closing quote.
    if escaped {
        quoted.push('\\');
    }
    quoted.push('"');
    quoted
}

fn is_quoted(content: &str) -> bool {
    content.len() >= 2 && content.starts_with('"') && content.ends_with('"')
}

#[cfg(test)]
#[path = "content_tests.rs"]
mod content_tests;
