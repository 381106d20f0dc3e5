//! Audit log listing.

use axum::{Json, extract::State};
use meet_goias_core::AuditLogEntry;

use crate::error::Result;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// The full audit trail, newest first.
pub async fn list(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<AuditLogEntry>>> {
    let mut entries = state.store().audit_log().await?;
    entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    Ok(Json(entries))
}
