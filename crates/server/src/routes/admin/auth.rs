//! Admin login, logout, and session introspection.

use axum::{Json, extract::State, http::StatusCode};
use meet_goias_core::AdminUser;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::{RequireAdminAuth, clear_current_admin, set_current_admin};
use crate::models::CurrentAdmin;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Authenticate against the configured admin credentials.
#[instrument(skip_all, fields(email = %form.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<LoginForm>,
) -> Result<Json<AdminUser>> {
    if !state.config().verify_login(&form.email, &form.password) {
        tracing::warn!("Failed admin login attempt");
        return Err(AppError::Unauthorized(
            "Credenciais inválidas. Tente novamente.".to_owned(),
        ));
    }

    let admin = state.config().admin_user();
    set_current_admin(&session, &CurrentAdmin::from(admin.clone())).await?;

    tracing::info!("Admin logged in");
    Ok(Json(admin))
}

/// End the admin session.
pub async fn logout(session: Session) -> Result<StatusCode> {
    clear_current_admin(&session).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// The currently authenticated admin.
pub async fn me(RequireAdminAuth(admin): RequireAdminAuth) -> Json<CurrentAdmin> {
    Json(admin)
}
