//! Configuration loading and validation tests.

use broker_service::config::{Config, CorsConfig, HeartbeatConfig, ServerConfig};
use broker_service::error::AppError;
use std::collections::HashMap;

fn lookup(pairs: &[(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<&str, &str> = pairs.iter().copied().collect();
    move |key| vars.get(key).map(|v| v.to_string())
}

/// Test module for the default CORS policy
mod default_policy_tests {
    use super::*;

    #[test]
    fn test_default_policy_literal() {
        let cors = CorsConfig::default();

        assert_eq!(cors.allowed_origins, vec!["https://*", "http://*"]);
        assert_eq!(cors.allowed_methods, vec!["GET", "POST", "DELETE", "OPTIONS"]);
        assert_eq!(
            cors.allowed_headers,
            vec!["Accept", "Authorization", "Content-Type", "x-CSRF-Token"]
        );
        assert_eq!(cors.exposed_headers, vec!["Link"]);
        assert_eq!(cors.max_age_seconds, 300);
        assert!(!cors.allow_credentials);
    }

    #[test]
    fn test_env_defaults_match_policy_literal() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        let cors = CorsConfig::default();

        assert_eq!(config.cors.allowed_origins, cors.allowed_origins);
        assert_eq!(config.cors.allowed_methods, cors.allowed_methods);
        assert_eq!(config.cors.allowed_headers, cors.allowed_headers);
        assert_eq!(config.cors.exposed_headers, cors.exposed_headers);
        assert_eq!(config.heartbeat.path, HeartbeatConfig::default().path);
    }
}

/// Test module for environment variable parsing
mod env_parsing_tests {
    use super::*;

    #[test]
    fn test_credentials_flag() {
        let config = Config::from_lookup(lookup(&[("CORS_ALLOW_CREDENTIALS", "true")])).unwrap();
        assert!(config.cors.allow_credentials);
    }

    #[test]
    fn test_invalid_bool() {
        let result = Config::from_lookup(lookup(&[("CORS_ALLOW_CREDENTIALS", "yes")]));
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[test]
    fn test_invalid_max_age() {
        let result = Config::from_lookup(lookup(&[("CORS_MAX_AGE_SECONDS", "-1")]));
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[test]
    fn test_blank_origin_list_rejected() {
        let result = Config::from_lookup(lookup(&[("CORS_ALLOWED_ORIGINS", " , ")]));
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }
}

/// Test module for server settings
mod server_tests {
    use super::*;

    #[test]
    fn test_addr_format() {
        let server = ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 80,
        };
        assert_eq!(server.addr(), "0.0.0.0:80");
    }

    #[test]
    fn test_zero_port_rejected() {
        let result = Config::from_lookup(lookup(&[("SERVER_PORT", "0")]));
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }
}
