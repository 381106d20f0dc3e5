//! Route definitions for the public and admin surfaces.
//!
//! Public routes:
//! - `GET  /nominations/challenge` - issue an arithmetic security challenge
//! - `POST /nominations` - submit a nomination
//! - `GET  /results` - approved dish/restaurant rankings (filterable)
//! - `GET  /results/cities` - city leaderboard
//!
//! Admin routes (session-gated, see [`crate::middleware::RequireAdminAuth`]):
//! - `POST  /admin/login`
//! - `POST  /admin/logout`
//! - `GET   /admin/me`
//! - `GET   /admin/nominations`
//! - `PATCH /admin/nominations/{id}`
//! - `GET   /admin/stats`
//! - `GET   /admin/audit-log`
//! - `GET   /admin/export.csv`

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

pub mod admin;
pub mod challenge;
pub mod nominations;
pub mod results;

/// Build the public + admin route table.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/nominations/challenge", get(challenge::issue))
        .route("/nominations", post(nominations::submit))
        .route("/results", get(results::rankings))
        .route("/results/cities", get(results::cities))
        .merge(admin::router())
}
