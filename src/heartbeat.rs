//! Fixed-path liveness responder.
//!
//! Answers `GET`/`HEAD` on the configured endpoint with `200 OK` before the
//! request reaches the router. Signals process-alive only; no dependency checks.

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

/// Endpoint path shared by every clone of the heartbeat middleware
#[derive(Debug, Clone)]
pub struct HeartbeatEndpoint(Arc<str>);

impl HeartbeatEndpoint {
    /// Create an endpoint for the given request path
    pub fn new(path: &str) -> Self {
        Self(Arc::from(path))
    }

    /// The configured endpoint path
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether a request targets the heartbeat endpoint
    pub fn intercepts(&self, method: &Method, path: &str) -> bool {
        (method == Method::GET || method == Method::HEAD) && path.eq_ignore_ascii_case(&self.0)
    }
}

/// Heartbeat middleware - short-circuits liveness probes
pub async fn heartbeat_middleware(
    State(endpoint): State<HeartbeatEndpoint>,
    req: Request,
    next: Next,
) -> Response {
    if !endpoint.intercepts(req.method(), req.uri().path()) {
        return next.run(req).await;
    }

    tracing::trace!(path = %endpoint.as_str(), "Heartbeat");

    let body = if req.method() == Method::HEAD {
        Body::empty()
    } else {
        Body::from(".")
    };

    (StatusCode::OK, [(header::CONTENT_TYPE, "text/plain")], body).into_response()
}
