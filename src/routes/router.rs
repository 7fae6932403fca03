use crate::config::{CorsConfig, HeartbeatConfig};
use crate::cors::{cors_layer, cors_middleware};
use crate::error::AppResult;
use crate::heartbeat::{heartbeat_middleware, HeartbeatEndpoint};
use crate::middleware::request_id_middleware;
use axum::{middleware, Router};
use tower_http::trace::TraceLayer;

use super::fallback;

/// Create application router
///
/// No business routes are registered; unmatched requests fall through to a JSON 404.
/// Layers run outermost first: trace, request ID, CORS, heartbeat. CORS sits outside
/// the heartbeat so liveness responses carry CORS headers as well.
pub fn create_router(cors: &CorsConfig, heartbeat: &HeartbeatConfig) -> AppResult<Router> {
    let cors = cors_layer(cors)?;
    let heartbeat = HeartbeatEndpoint::new(&heartbeat.path);

    tracing::debug!(heartbeat = %heartbeat.as_str(), "Registering routes");

    let router = Router::new()
        .fallback(fallback::not_found)
        .layer(middleware::from_fn_with_state(heartbeat, heartbeat_middleware))
        .layer(middleware::from_fn_with_state(cors, cors_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http());

    Ok(router)
}
