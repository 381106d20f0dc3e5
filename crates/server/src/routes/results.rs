//! Public results: dish/restaurant rankings and the city leaderboard.

use axum::{
    Json,
    extract::{Query, State},
};
use meet_goias_core::stats::{CountEntry, Rankings, ResultsFilter, approved_rankings, city_leaderboard};
use serde::Deserialize;

use crate::error::Result;
use crate::state::AppState;

/// Query parameters for the rankings view. Empty strings mean "no filter".
#[derive(Debug, Default, Deserialize)]
pub struct RankingsQuery {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub q: Option<String>,
}

impl RankingsQuery {
    fn into_filter(self) -> ResultsFilter {
        ResultsFilter {
            city: self.city.filter(|c| !c.trim().is_empty()),
            search: self.q.filter(|q| !q.trim().is_empty()),
        }
    }
}

/// Top approved dishes and restaurants, optionally filtered by city and a
/// free-text search over dish/restaurant names.
pub async fn rankings(
    State(state): State<AppState>,
    Query(query): Query<RankingsQuery>,
) -> Result<Json<Rankings>> {
    let nominations = state.store().list_all().await?;
    Ok(Json(approved_rankings(&nominations, &query.into_filter())))
}

/// City leaderboard by approved-nomination volume.
pub async fn cities(State(state): State<AppState>) -> Result<Json<Vec<CountEntry>>> {
    let nominations = state.store().list_all().await?;
    Ok(Json(city_leaderboard(&nominations)))
}
