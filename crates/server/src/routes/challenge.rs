//! Arithmetic security challenge issued before a submission is accepted.

use axum::Json;
use rand::Rng;
use serde::Serialize;
use tower_sessions::Session;

use crate::error::Result;
use crate::models::session_keys;

/// Challenge payload shown to the submitter.
#[derive(Debug, Serialize)]
pub struct Challenge {
    pub a: u8,
    pub b: u8,
}

/// Issue a fresh challenge and stash the expected answer in the session.
///
/// Each call replaces any previous pending answer, so only the most recently
/// issued challenge can be solved.
pub async fn issue(session: Session) -> Result<Json<Challenge>> {
    // ThreadRng is not Send; keep it scoped so the future stays spawnable
    let (a, b) = {
        let mut rng = rand::rng();
        (rng.random_range(1..=10u8), rng.random_range(1..=10u8))
    };

    session
        .insert(session_keys::CHALLENGE_ANSWER, i64::from(a) + i64::from(b))
        .await?;

    Ok(Json(Challenge { a, b }))
}
