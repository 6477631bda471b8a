// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for provider configuration.

#[cfg(test)]
mod tests {
    use crate::config::{DebugSink, ProviderConfig};
    use crate::errors::ErrorKind;

    #[test]
    fn test_debug_sink_parsing() {
        assert_eq!("stdout".parse::<DebugSink>().unwrap(), DebugSink::Stdout);
        assert_eq!("YES".parse::<DebugSink>().unwrap(), DebugSink::Stdout);
        assert_eq!("true".parse::<DebugSink>().unwrap(), DebugSink::Stdout);
        assert_eq!("1".parse::<DebugSink>().unwrap(), DebugSink::Stdout);
        assert_eq!("stderr".parse::<DebugSink>().unwrap(), DebugSink::Stderr);
        assert_eq!("".parse::<DebugSink>().unwrap(), DebugSink::Off);
        assert_eq!("verbose".parse::<DebugSink>().unwrap(), DebugSink::Off);
    }

    #[test]
    fn test_deserialize_provider_block() {
        let config: ProviderConfig = serde_json::from_str(
            r#"{
                "server_url": "http://127.0.0.1:8081/",
                "server_id": "pdns-1",
                "api_token": "secret",
                "debug": "stderr"
            }"#,
        )
        .unwrap();

        assert_eq!(config.server_url, "http://127.0.0.1:8081/");
        assert_eq!(config.effective_server_id(), "pdns-1");
        assert_eq!(config.api_token, "secret");
        assert_eq!(config.debug, DebugSink::Stderr);
    }

    #[test]
    fn test_empty_server_id_defaults_to_localhost() {
        let config = ProviderConfig::new("http://127.0.0.1:8081", "secret");
        assert_eq!(config.effective_server_id(), "localhost");
    }

    #[test]
    fn test_serialize_round_trips_debug_sink() {
        let mut config = ProviderConfig::new("http://127.0.0.1:8081", "secret");
        config.debug = DebugSink::Stdout;

        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["debug"], "stdout");
        assert!(json.get("server_id").is_none());
    }

    #[test]
    fn test_debug_output_redacts_token() {
        let config = ProviderConfig::new("http://127.0.0.1:8081", "super-secret-token");
        let rendered = format!("{config:?}");

        assert!(!rendered.contains("super-secret-token"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_validate_accepts_http_url() {
        let config = ProviderConfig::new("http://127.0.0.1:8081/", "secret");
        let url = config.validate().unwrap();
        assert_eq!(url.host_str(), Some("127.0.0.1"));
        assert_eq!(url.port(), Some(8081));
    }

    #[test]
    fn test_validate_requires_server_url() {
        let config = ProviderConfig::new("", "secret");
        let err = config.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.to_string().contains("server_url is required"));
    }

    #[test]
    fn test_validate_rejects_non_http_scheme() {
        let config = ProviderConfig::new("ftp://pdns.example.org", "secret");
        assert!(config
            .validate()
            .unwrap_err()
            .to_string()
            .contains("http or https"));
    }

    #[test]
    fn test_validate_rejects_unparseable_url() {
        let config = ProviderConfig::new("not a url", "secret");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_requires_token() {
        let config = ProviderConfig::new("http://127.0.0.1:8081", "");
        assert!(config
            .validate()
            .unwrap_err()
            .to_string()
            .contains("api_token is required"));
    }
}
