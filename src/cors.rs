//! Policy-driven CORS decorator.
//!
//! Wraps `tower_http::cors::CorsLayer` with an origin matcher that understands
//! wildcard patterns such as `https://*` or `https://*.example.com`. Preflights
//! (`OPTIONS` carrying `Origin` and `Access-Control-Request-Method`) are answered
//! here and never reach inner services; any other `OPTIONS` request is forwarded
//! undecorated. Responses to origins outside the policy carry no CORS headers.

use crate::config::CorsConfig;
use crate::error::{AppError, AppResult};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use http::{header, request::Parts, HeaderName, HeaderValue, Method};
use std::sync::Arc;
use std::time::Duration;
use tower::{Layer, ServiceExt};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Headers dropped from the response when the origin is not allowed
static POLICY_HEADERS: [HeaderName; 5] = [
    header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
    header::ACCESS_CONTROL_ALLOW_HEADERS,
    header::ACCESS_CONTROL_ALLOW_METHODS,
    header::ACCESS_CONTROL_EXPOSE_HEADERS,
    header::ACCESS_CONTROL_MAX_AGE,
];

/// A single allowed-origin pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OriginPattern {
    /// "*" on its own
    Any,
    /// No wildcard, compared as a whole
    Exact(String),
    /// One "*" with fixed text on either side
    Wildcard { prefix: String, suffix: String },
}

impl OriginPattern {
    /// Parse a pattern. Patterns are lowercased; more than one "*" is rejected.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let pattern = raw.trim().to_ascii_lowercase();

        if pattern.is_empty() {
            return Err("Origin pattern must not be empty".to_string());
        }

        if pattern == "*" {
            return Ok(OriginPattern::Any);
        }

        match pattern.matches('*').count() {
            0 => Ok(OriginPattern::Exact(pattern)),
            1 => {
                let (prefix, suffix) = pattern
                    .split_once('*')
                    .ok_or_else(|| format!("Invalid origin pattern: {}", raw))?;
                Ok(OriginPattern::Wildcard {
                    prefix: prefix.to_string(),
                    suffix: suffix.to_string(),
                })
            }
            _ => Err(format!("Origin pattern may contain at most one '*': {}", raw)),
        }
    }

    /// Check whether an `Origin` header value is covered by this pattern
    pub fn matches(&self, origin: &str) -> bool {
        let origin = origin.to_ascii_lowercase();

        match self {
            OriginPattern::Any => true,
            OriginPattern::Exact(expected) => origin == *expected,
            OriginPattern::Wildcard { prefix, suffix } => {
                origin.len() >= prefix.len() + suffix.len()
                    && origin.starts_with(prefix.as_str())
                    && origin.ends_with(suffix.as_str())
            }
        }
    }
}

/// Build the CORS layer for the given policy
pub fn cors_layer(config: &CorsConfig) -> AppResult<CorsLayer> {
    let patterns: Vec<OriginPattern> = config
        .allowed_origins
        .iter()
        .map(|o| OriginPattern::parse(o))
        .collect::<Result<_, _>>()
        .map_err(AppError::Configuration)?;
    let patterns: Arc<[OriginPattern]> = patterns.into();

    let allow_origin = AllowOrigin::predicate(move |origin: &HeaderValue, _parts: &Parts| {
        let allowed = origin
            .to_str()
            .map(|o| patterns.iter().any(|p| p.matches(o)))
            .unwrap_or(false);

        if !allowed {
            tracing::debug!(origin = ?origin, "Origin not allowed by CORS policy");
        }

        allowed
    });

    let methods = config
        .allowed_methods
        .iter()
        .map(|m| {
            Method::from_bytes(m.as_bytes())
                .map_err(|_| AppError::Configuration(format!("Invalid CORS method: {}", m)))
        })
        .collect::<AppResult<Vec<_>>>()?;

    let allowed_headers = parse_header_names(&config.allowed_headers)?;
    let exposed_headers = parse_header_names(&config.exposed_headers)?;

    let mut cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(methods)
        .allow_headers(allowed_headers)
        .expose_headers(exposed_headers)
        .allow_credentials(config.allow_credentials);

    if config.max_age_seconds > 0 {
        cors = cors.max_age(Duration::from_secs(config.max_age_seconds));
    }

    Ok(cors)
}

/// Whether a request is a CORS preflight
pub fn is_preflight<B>(req: &http::Request<B>) -> bool {
    req.method() == Method::OPTIONS
        && req.headers().contains_key(header::ORIGIN)
        && req.headers().contains_key(header::ACCESS_CONTROL_REQUEST_METHOD)
}

/// CORS middleware - applies the policy layer and strips its headers for rejected origins
pub async fn cors_middleware(State(cors): State<CorsLayer>, req: Request, next: Next) -> Response {
    if req.method() == Method::OPTIONS && !is_preflight(&req) {
        return next.run(req).await;
    }

    let mut response = match cors.layer(next).oneshot(req).await {
        Ok(response) => response,
        Err(never) => match never {},
    };

    if !response.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN) {
        for name in POLICY_HEADERS.iter() {
            response.headers_mut().remove(name);
        }
    }

    response
}

fn parse_header_names(names: &[String]) -> AppResult<Vec<HeaderName>> {
    names
        .iter()
        .map(|h| {
            HeaderName::from_bytes(h.as_bytes())
                .map_err(|_| AppError::Configuration(format!("Invalid CORS header: {}", h)))
        })
        .collect()
}
