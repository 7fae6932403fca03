use crate::error::{AppError, AppResult};
use serde::Deserialize;
use std::env;
use std::str::FromStr;

mod cors;
mod heartbeat;
mod server;

pub use cors::CorsConfig;
pub use heartbeat::HeartbeatConfig;
pub use server::ServerConfig;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub heartbeat: HeartbeatConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let cors_defaults = CorsConfig::default();

        let server_host = lookup("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let server_port = parse_var(&lookup, "SERVER_PORT", 8080)?;

        let allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .map(|s| split_list(&s))
            .unwrap_or(cors_defaults.allowed_origins);
        let allowed_methods = lookup("CORS_ALLOWED_METHODS")
            .map(|s| split_list(&s))
            .unwrap_or(cors_defaults.allowed_methods);
        let allowed_headers = lookup("CORS_ALLOWED_HEADERS")
            .map(|s| split_list(&s))
            .unwrap_or(cors_defaults.allowed_headers);
        let exposed_headers = lookup("CORS_EXPOSED_HEADERS")
            .map(|s| split_list(&s))
            .unwrap_or(cors_defaults.exposed_headers);
        let max_age_seconds =
            parse_var(&lookup, "CORS_MAX_AGE_SECONDS", cors_defaults.max_age_seconds)?;
        let allow_credentials = parse_var(
            &lookup,
            "CORS_ALLOW_CREDENTIALS",
            cors_defaults.allow_credentials,
        )?;

        let heartbeat_path = lookup("HEARTBEAT_PATH").unwrap_or_else(|| "/ping".to_string());

        let config = Config {
            server: ServerConfig {
                host: server_host,
                port: server_port,
            },
            cors: CorsConfig {
                allowed_origins,
                allowed_methods,
                allowed_headers,
                exposed_headers,
                max_age_seconds,
                allow_credentials,
            },
            heartbeat: HeartbeatConfig {
                path: heartbeat_path,
            },
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> AppResult<()> {
        self.server.validate().map_err(AppError::Configuration)?;
        self.cors.validate().map_err(AppError::Configuration)?;
        self.heartbeat.validate().map_err(AppError::Configuration)?;

        Ok(())
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> AppResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Configuration(format!("Invalid {}", key))),
        None => Ok(default),
    }
}

/// Split a comma-separated list, dropping blank entries
fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.cors.allowed_origins, vec!["https://*", "http://*"]);
        assert_eq!(config.cors.max_age_seconds, 300);
        assert!(!config.cors.allow_credentials);
        assert_eq!(config.heartbeat.path, "/ping");
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("SERVER_PORT", "9000"),
            ("CORS_ALLOWED_ORIGINS", "https://*.example.com, http://localhost:3000"),
            ("CORS_ALLOWED_METHODS", "GET,PUT"),
            ("CORS_MAX_AGE_SECONDS", "60"),
            ("HEARTBEAT_PATH", "/healthz"),
        ]))
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(
            config.cors.allowed_origins,
            vec!["https://*.example.com", "http://localhost:3000"]
        );
        assert_eq!(config.cors.allowed_methods, vec!["GET", "PUT"]);
        assert_eq!(config.cors.max_age_seconds, 60);
        assert_eq!(config.heartbeat.path, "/healthz");
    }

    #[test]
    fn test_invalid_port() {
        let result = Config::from_lookup(lookup_from(&[("SERVER_PORT", "not_a_port")]));
        assert!(matches!(
            result,
            Err(AppError::Configuration(msg)) if msg == "Invalid SERVER_PORT"
        ));
    }

    #[test]
    fn test_invalid_origin_pattern_rejected() {
        let result = Config::from_lookup(lookup_from(&[("CORS_ALLOWED_ORIGINS", "https://*.*")]));
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[test]
    fn test_relative_heartbeat_path_rejected() {
        let result = Config::from_lookup(lookup_from(&[("HEARTBEAT_PATH", "ping")]));
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[test]
    fn test_split_list() {
        assert_eq!(split_list("a, b,,c ,"), vec!["a", "b", "c"]);
        assert!(split_list("").is_empty());
    }
}
