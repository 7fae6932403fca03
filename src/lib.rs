//! broker-service - HTTP entrypoint for the broker.
//!
//! Builds an axum router with a policy-driven CORS stage and a `/ping`
//! liveness endpoint, and serves it with graceful shutdown.

pub mod config;
pub mod cors;
pub mod error;
pub mod heartbeat;
pub mod middleware;
pub mod routes;
pub mod server;

pub use routes::create_router;
