// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! PowerDNS HTTP API client.
//!
//! Implements [`ZoneGateway`] on top of the PowerDNS API v1:
//!
//! | Operation      | Request                                                     |
//! |----------------|-------------------------------------------------------------|
//! | `get_zone`     | `GET /api/v1/servers/{server_id}/zones/{zone_id}`           |
//! | `upsert_rrset` | `PATCH` same URL, one RRset with `changetype: REPLACE`      |
//! | `delete_rrset` | `PATCH` same URL, one RRset with `changetype: DELETE`       |
//!
//! Requests are authenticated with the `X-API-Key` header. Nothing is retried.

use super::debug::{dump_request, dump_response};
use super::{RemoteRecord, Zone, ZoneGateway};
use crate::config::{DebugSink, ProviderConfig};
use crate::constants::{
    API_KEY_HEADER, API_PATH_PREFIX, CHANGETYPE_DELETE, CHANGETYPE_REPLACE, ZONE_MISSING_MESSAGE,
};
use crate::errors::{GatewayError, ProviderError};
use crate::records::names::normalize_zone;
use async_trait::async_trait;
use reqwest::{Client as HttpClient, Method, StatusCode};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error};

/// Body of a zone `PATCH` request.
#[derive(Debug, Serialize)]
struct PatchRequest<'a> {
    rrsets: Vec<RrsetPatch<'a>>,
}

/// One RRset change inside a `PATCH` request.
#[derive(Debug, Serialize)]
struct RrsetPatch<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    rtype: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    ttl: Option<u32>,
    changetype: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    records: Option<Vec<RemoteRecord>>,
}

/// Client for one PowerDNS server.
#[derive(Clone)]
pub struct PowerDnsClient {
    /// HTTP client for API requests
    http: HttpClient,
    /// Server base URL, used in error messages
    endpoint: String,
    /// `{endpoint}/api/v1/servers/{server_id}`
    server_url: String,
    /// API key for the `X-API-Key` header
    api_token: Arc<String>,
    debug: DebugSink,
}

impl fmt::Debug for PowerDnsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PowerDnsClient")
            .field("endpoint", &self.endpoint)
            .field("server_url", &self.server_url)
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}

impl PowerDnsClient {
    /// Build a client from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::InvalidConfig`] if the configuration is
    /// invalid or the HTTP client cannot be constructed.
    pub fn from_config(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let url = config.validate()?;
        let http = HttpClient::builder()
            .build()
            .map_err(|e| ProviderError::InvalidConfig {
                reason: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self::with_http_client(
            http,
            url.as_str(),
            config.effective_server_id(),
            &config.api_token,
            config.debug,
        ))
    }

    /// Build a client around an existing HTTP client.
    #[must_use]
    pub fn with_http_client(
        http: HttpClient,
        server_url: &str,
        server_id: &str,
        api_token: &str,
        debug: DebugSink,
    ) -> Self {
        let endpoint = server_url.trim_end_matches('/').to_string();
        let server_url = format!("{endpoint}{API_PATH_PREFIX}/servers/{server_id}");
        Self {
            http,
            endpoint,
            server_url,
            api_token: Arc::new(api_token.to_string()),
            debug,
        }
    }

    /// Full URL of a zone.
    ///
    /// The zone id is the absolute zone name with `/` escaped as `=2F`.
    #[must_use]
    pub fn zone_url(&self, zone: &str) -> String {
        let zone_id = normalize_zone(zone).replace('/', "=2F");
        format!("{}/zones/{zone_id}", self.server_url)
    }

    /// Execute one API request and return the response body.
    async fn request<T: Serialize + fmt::Debug>(
        &self,
        method: Method,
        zone: &str,
        body: Option<&T>,
    ) -> Result<String, GatewayError> {
        let url = self.zone_url(zone);

        debug!(
            method = %method,
            url = %url,
            body = ?body,
            "HTTP API request to PowerDNS"
        );

        let mut builder = self
            .http
            .request(method.clone(), &url)
            .header(API_KEY_HEADER, self.api_token.as_str());
        if let Some(body_data) = body {
            builder = builder.json(body_data);
        }
        let request = builder.build().map_err(|e| GatewayError::Transport {
            url: url.clone(),
            reason: e.to_string(),
        })?;

        dump_request(self.debug, &request);

        let response = self.http.execute(request).await.map_err(|e| {
            error!(method = %method, url = %url, error = %e, "HTTP API request failed to send");
            GatewayError::Transport {
                url: url.clone(),
                reason: e.to_string(),
            }
        })?;

        let status = response.status();
        let version = response.version();
        let headers = response.headers().clone();
        let text = response.text().await.map_err(|e| GatewayError::Transport {
            url: url.clone(),
            reason: format!("failed to read response body: {e}"),
        })?;

        dump_response(self.debug, version, status, &headers, &text);

        if !status.is_success() {
            error!(
                method = %method,
                url = %url,
                status = %status,
                error = %text,
                "HTTP API request failed"
            );
            return Err(self.status_error(status, url, zone, &text));
        }

        debug!(
            method = %method,
            url = %url,
            status = %status,
            response_len = text.len(),
            "HTTP API request successful"
        );

        Ok(text)
    }

    fn status_error(&self, status: StatusCode, url: String, zone: &str, body: &str) -> GatewayError {
        let message = error_message(body);
        match status {
            StatusCode::NOT_FOUND => GatewayError::ZoneNotFound {
                zone: normalize_zone(zone),
                endpoint: self.endpoint.clone(),
            },
            StatusCode::UNPROCESSABLE_ENTITY if message.contains(ZONE_MISSING_MESSAGE) => {
                GatewayError::ZoneNotFound {
                    zone: normalize_zone(zone),
                    endpoint: self.endpoint.clone(),
                }
            }
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => GatewayError::Rejected {
                url,
                status: status.as_u16(),
                body: message,
            },
            _ => GatewayError::UnexpectedResponse {
                url,
                status: status.as_u16(),
                body: message,
            },
        }
    }

    async fn patch(&self, zone: &str, change: RrsetPatch<'_>) -> Result<(), GatewayError> {
        let body = PatchRequest {
            rrsets: vec![change],
        };
        self.request(Method::PATCH, zone, Some(&body)).await?;
        Ok(())
    }
}

/// PowerDNS reports errors as `{"error": "..."}`; fall back to the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value.get("error")?.as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

#[async_trait]
impl ZoneGateway for PowerDnsClient {
    async fn get_zone(&self, zone: &str) -> Result<Zone, GatewayError> {
        let text = self.request(Method::GET, zone, None::<&()>).await?;
        serde_json::from_str(&text).map_err(|e| GatewayError::Decode {
            url: self.zone_url(zone),
            reason: e.to_string(),
        })
    }

    async fn upsert_rrset(
        &self,
        zone: &str,
        name: &str,
        rtype: &str,
        ttl: u32,
        contents: &[String],
    ) -> Result<(), GatewayError> {
        let records = contents
            .iter()
            .map(|content| RemoteRecord {
                content: content.clone(),
                disabled: false,
            })
            .collect();

        self.patch(
            zone,
            RrsetPatch {
                name,
                rtype,
                ttl: Some(ttl),
                changetype: CHANGETYPE_REPLACE,
                records: Some(records),
            },
        )
        .await
    }

    async fn delete_rrset(&self, zone: &str, name: &str, rtype: &str) -> Result<(), GatewayError> {
        self.patch(
            zone,
            RrsetPatch {
                name,
                rtype,
                ttl: None,
                changetype: CHANGETYPE_DELETE,
                records: None,
            },
        )
        .await
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod client_tests;
