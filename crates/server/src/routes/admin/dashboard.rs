//! Admin dashboard statistics.

use axum::{Json, extract::State};
use meet_goias_core::stats::{CountEntry, DASHBOARD_CHART_TOP_N, NominationStats, compute_stats};
use serde::Serialize;

use crate::error::Result;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// Aggregate statistics plus the top cities for the dashboard chart.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    #[serde(flatten)]
    pub stats: NominationStats,
    pub top_cities: Vec<CountEntry>,
}

/// Counts by status and by city/dish/restaurant over ALL records, regardless
/// of moderation state.
pub async fn stats(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>> {
    let nominations = state.store().list_all().await?;
    let stats = compute_stats(&nominations);
    let top_cities = stats.by_city.top_n(DASHBOARD_CHART_TOP_N);

    Ok(Json(DashboardResponse { stats, top_cities }))
}
