use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::state::AppState;

pub const ADMIN_REQUIRED: &str = "Admin access required";

/// A caller holding a valid, unrevoked admin token.
pub struct AdminUser {
    pub sub: String,
    pub jti: String,
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let deny = |reason: &str| {
            tracing::debug!(reason, "admin request denied");
            AppError::Auth(ADMIN_REQUIRED.to_string())
        };

        if !state.config.admin_enabled() {
            return Err(deny("no admin password configured"));
        }

        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| deny("missing authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| deny("invalid authorization header format"))?;

        let claims = super::jwt::verify_token(&state.config.auth.jwt_secret, token)
            .map_err(|_| deny("invalid or expired token"))?;

        if state.revoked_tokens.contains_key(&claims.jti) {
            return Err(deny("token has been revoked"));
        }

        Ok(AdminUser {
            sub: claims.sub,
            jti: claims.jti,
        })
    }
}
