//! Public nomination submission.

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode, header},
};
use meet_goias_core::{Nomination, NominationDraft};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::models::session_keys;
use crate::state::AppState;

/// Submission payload as posted by the public form.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitForm {
    pub dish_name: String,
    pub restaurant_name: String,
    pub city: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub agreed: bool,
    #[serde(default)]
    pub challenge_answer: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub message: String,
    pub nomination: Nomination,
}

/// Accept a public nomination.
///
/// Validation order matters: required fields and the terms checkbox are
/// checked before the challenge answer, so an incomplete form never burns the
/// pending challenge.
#[instrument(skip_all, fields(city = %form.city))]
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Json(form): Json<SubmitForm>,
) -> Result<(StatusCode, Json<SubmitResponse>)> {
    let draft = NominationDraft {
        dish_name: form.dish_name,
        restaurant_name: form.restaurant_name,
        city: form.city,
        description: form.description,
        notes: form.notes,
    };

    if draft.validate().is_err() || !form.agreed {
        return Err(AppError::Validation(
            "Por favor, preencha todos os campos obrigatórios e aceite os termos.".to_owned(),
        ));
    }

    let expected: Option<i64> = session
        .get(session_keys::CHALLENGE_ANSWER)
        .await
        .ok()
        .flatten();
    if expected.is_none() || form.challenge_answer != expected {
        return Err(AppError::Validation(
            "A resposta da verificação de segurança está incorreta.".to_owned(),
        ));
    }

    let ip = client_ip(&headers);
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_owned();

    let nomination = state.store().submit(draft, ip, user_agent).await?;

    // A solved challenge is single-use
    session
        .remove::<i64>(session_keys::CHALLENGE_ANSWER)
        .await?;

    tracing::info!(id = %nomination.id, "Nomination submitted");

    Ok((
        StatusCode::CREATED,
        Json(SubmitResponse {
            success: true,
            message: "Indicação enviada com sucesso! Aguarde a moderação.".to_owned(),
            nomination,
        }),
    ))
}

/// Best-effort client IP from proxy headers.
///
/// `x-forwarded-for` may carry a comma-separated chain; the first hop is the
/// original client.
fn client_ip(headers: &HeaderMap) -> String {
    if let Some(forwarded) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_owned();
            }
        }
    }
    if let Some(real_ip) = headers.get("x-real-ip").and_then(|v| v.to_str().ok()) {
        let real_ip = real_ip.trim();
        if !real_ip.is_empty() {
            return real_ip.to_owned();
        }
    }
    "unknown".to_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn test_client_ip_prefers_first_forwarded_hop() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.9, 10.0.0.1"),
        );
        headers.insert("x-real-ip", HeaderValue::from_static("10.0.0.1"));
        assert_eq!(client_ip(&headers), "203.0.113.9");
    }

    #[test]
    fn test_client_ip_falls_back_to_real_ip() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.7"));
        assert_eq!(client_ip(&headers), "198.51.100.7");
    }

    #[test]
    fn test_client_ip_unknown_without_headers() {
        assert_eq!(client_ip(&HeaderMap::new()), "unknown");
    }

    #[test]
    fn test_client_ip_ignores_empty_forwarded_header() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("  "));
        assert_eq!(client_ip(&headers), "unknown");
    }
}
