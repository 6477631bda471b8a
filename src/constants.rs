// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Global constants for the PowerDNS record adapter.
//!
//! Constants are organized by category for easy maintenance.

// ============================================================================
// PowerDNS API Constants
// ============================================================================

/// Server identifier used when the configuration leaves it empty
pub const DEFAULT_SERVER_ID: &str = "localhost";

/// Path prefix of the PowerDNS HTTP API (version 1)
pub const API_PATH_PREFIX: &str = "/api/v1";

/// Header carrying the PowerDNS API key
pub const API_KEY_HEADER: &str = "X-API-Key";

/// RRset `changetype` for create-or-replace
pub const CHANGETYPE_REPLACE: &str = "REPLACE";

/// RRset `changetype` for removing a whole RRset
pub const CHANGETYPE_DELETE: &str = "DELETE";

/// Body fragment PowerDNS returns (HTTP 422) when a zone does not exist
pub const ZONE_MISSING_MESSAGE: &str = "Could not find domain";

// ============================================================================
// DNS Record Constants
// ============================================================================

/// Record type for TXT records
pub const RR_TYPE_TXT: &str = "TXT";

/// Record type for generic service bindings
pub const RR_TYPE_SVCB: &str = "SVCB";

/// Record type for HTTP service bindings
pub const RR_TYPE_HTTPS: &str = "HTTPS";

/// Owner name of the zone apex in relative form
pub const APEX_NAME: &str = "@";

/// URL schemes that map to `HTTPS` records instead of `SVCB`
pub const HTTPS_SCHEMES: [&str; 4] = ["https", "http", "wss", "ws"];

/// Default port of the `https` and `wss` schemes
pub const DEFAULT_TLS_PORT: u16 = 443;

/// Default port of the `http` and `ws` schemes
pub const DEFAULT_PLAIN_PORT: u16 = 80;

/// SvcParam key whose value is always quoted (Encrypted Client Hello config)
pub const ECH_PARAM_KEY: &str = "ech";

/// Priority value that puts a service binding into AliasMode
pub const ALIAS_MODE_PRIORITY: u16 = 0;

// ============================================================================
// Environment Variables
// ============================================================================

/// Environment variable for the PowerDNS server URL
pub const ENV_SERVER_URL: &str = "PDNS_SERVER_URL";

/// Environment variable for the PowerDNS server identifier
pub const ENV_SERVER_ID: &str = "PDNS_SERVER_ID";

/// Environment variable for the PowerDNS API token
pub const ENV_API_TOKEN: &str = "PDNS_API_TOKEN";

/// Environment variable selecting the raw HTTP debug sink
pub const ENV_DEBUG: &str = "PDNS_DEBUG";

/// Default TTL for records created from the command line (5 minutes)
pub const DEFAULT_CLI_TTL_SECS: u64 = 300;
