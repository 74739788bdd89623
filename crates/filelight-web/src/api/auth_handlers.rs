use std::time::Instant;

use axum::extract::State;
use axum::Json;

use crate::auth::jwt;
use crate::auth::middleware::AdminUser;
use crate::dto::{LoginRequest, LoginResponse, LogoutResponse};
use crate::error::AppError;
use crate::state::AppState;

const ADMIN_SUBJECT: &str = "admin";

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    if !state.config.admin_enabled() {
        tracing::warn!("Login attempted but no admin password is configured");
        return Err(AppError::Auth("Invalid credentials".to_string()));
    }

    let hash = state.config.auth.admin_password.clone();
    let password = body.password;

    let valid = tokio::task::spawn_blocking(move || {
        crate::auth::password::verify_password(&hash, &password)
    })
    .await??;

    if !valid {
        tracing::warn!("Failed login attempt: invalid password");
        return Err(AppError::Auth("Invalid credentials".to_string()));
    }

    let (token, expires_at) = jwt::create_token(
        &state.config.auth.jwt_secret,
        state.config.auth.jwt_ttl_hours,
        ADMIN_SUBJECT,
    )?;
    tracing::info!("Admin logged in");

    Ok(Json(LoginResponse { token, expires_at }))
}

pub async fn logout(
    admin: AdminUser,
    State(state): State<AppState>,
) -> Json<LogoutResponse> {
    state.revoked_tokens.insert(admin.jti, Instant::now());
    tracing::info!(user = %admin.sub, "Admin logged out");
    Json(LogoutResponse { success: true })
}
