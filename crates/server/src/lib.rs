//! Meet Goiás server - nomination submission and moderation service.
//!
//! # Architecture
//!
//! - Axum web framework serving a JSON API
//! - Whole-collection JSON storage behind the [`store::Storage`] capability
//!   (a file on disk in production, an in-memory map in tests)
//! - tower-sessions for the admin session and the pending security challenge
//! - One binary serves both the public surface (submit, results) and the
//!   session-gated admin surface (moderation, stats, audit log, CSV export)
//!
//! The router is assembled by [`app`] so integration tests can drive the exact
//! production service without binding a socket.

#![cfg_attr(not(test), forbid(unsafe_code))]

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;

use state::AppState;

/// Build the full application router with the session layer attached.
#[must_use]
pub fn app(state: AppState) -> Router {
    let session_layer = middleware::create_session_layer(state.config());

    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes::routes())
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies the storage substrate is readable before returning OK.
/// Returns 503 Service Unavailable if it is not.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.store().ping().await {
        Ok(()) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}
