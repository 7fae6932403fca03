use crate::cors::OriginPattern;
use http::{HeaderName, Method};
use serde::Deserialize;

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    /// Origin patterns allowed to make cross-origin requests ("*" alone allows all,
    /// otherwise at most one "*" wildcard per pattern, e.g. "https://*")
    pub allowed_origins: Vec<String>,

    /// HTTP methods advertised in preflight responses
    pub allowed_methods: Vec<String>,

    /// Request headers advertised in preflight responses
    pub allowed_headers: Vec<String>,

    /// Response headers browsers may expose to scripts
    pub exposed_headers: Vec<String>,

    /// How long browsers may cache a preflight response, in seconds (0 omits the header)
    pub max_age_seconds: u64,

    /// Whether credentialed requests are allowed
    pub allow_credentials: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["https://*".to_string(), "http://*".to_string()],
            allowed_methods: ["GET", "POST", "DELETE", "OPTIONS"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            allowed_headers: ["Accept", "Authorization", "Content-Type", "x-CSRF-Token"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            exposed_headers: vec!["Link".to_string()],
            max_age_seconds: 300,
            allow_credentials: false,
        }
    }
}

impl CorsConfig {
    /// Validate CORS configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.allowed_origins.is_empty() {
            return Err("CORS_ALLOWED_ORIGINS must contain at least one origin".to_string());
        }

        for origin in &self.allowed_origins {
            OriginPattern::parse(origin)?;
        }

        for method in &self.allowed_methods {
            Method::from_bytes(method.as_bytes())
                .map_err(|_| format!("Invalid method in CORS_ALLOWED_METHODS: {}", method))?;
        }

        for header in &self.allowed_headers {
            HeaderName::from_bytes(header.as_bytes())
                .map_err(|_| format!("Invalid header in CORS_ALLOWED_HEADERS: {}", header))?;
        }

        for header in &self.exposed_headers {
            HeaderName::from_bytes(header.as_bytes())
                .map_err(|_| format!("Invalid header in CORS_EXPOSED_HEADERS: {}", header))?;
        }

        Ok(())
    }
}
