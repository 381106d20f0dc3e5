//! Moderation queue: listing and partial updates.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use meet_goias_core::{Nomination, NominationId, NominationUpdate, Status};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// Query parameters for the moderation queue.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub status: Option<String>,
}

/// All nominations, newest first, optionally filtered by status.
///
/// `status=ALL` (or an empty value) disables the filter; any other value must
/// parse as a known status.
pub async fn list(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Nomination>>> {
    let mut nominations = state.store().list_all().await?;
    nominations.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    if let Some(raw) = query.status.as_deref().map(str::trim)
        && !raw.is_empty()
        && !raw.eq_ignore_ascii_case("ALL")
    {
        let status: Status = raw
            .parse()
            .map_err(|_| AppError::Validation(format!("Status desconhecido: {raw}")))?;
        nominations.retain(|n| n.status == status);
    }

    Ok(Json(nominations))
}

/// Apply a partial update to one nomination and return the merged record.
#[instrument(skip_all, fields(admin = %admin.email, id = %id))]
pub async fn update(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<NominationId>,
    Json(update): Json<NominationUpdate>,
) -> Result<Json<Nomination>> {
    let updated = state.store().update(id, &update, &admin.email).await?;
    tracing::info!(status = %updated.status, "Nomination updated");
    Ok(Json(updated))
}
