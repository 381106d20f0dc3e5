//! Admin surface: authentication, moderation, stats, audit log, CSV export.

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::state::AppState;

pub mod audit;
pub mod auth;
pub mod dashboard;
pub mod export;
pub mod nominations;

/// Build the admin route table.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin/login", post(auth::login))
        .route("/admin/logout", post(auth::logout))
        .route("/admin/me", get(auth::me))
        .route("/admin/nominations", get(nominations::list))
        .route("/admin/nominations/{id}", patch(nominations::update))
        .route("/admin/stats", get(dashboard::stats))
        .route("/admin/audit-log", get(audit::list))
        .route("/admin/export.csv", get(export::csv))
}
