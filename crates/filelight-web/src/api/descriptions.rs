use axum::extract::State;
use axum::Json;
use filelight_core::{AdminContext, UpdateOutcome, UpdateRequest};

use crate::auth::middleware::AdminUser;
use crate::error::AppError;
use crate::state::AppState;

/// `POST /api/descriptions`
///
/// Validation and write failures come back as `{success: false, error}` with
/// status 200; only a missing admin token is an HTTP error.
pub async fn update_description(
    admin: AdminUser,
    State(state): State<AppState>,
    Json(request): Json<UpdateRequest>,
) -> Result<Json<UpdateOutcome>, AppError> {
    let browser = state.browser.clone();
    let context = AdminContext::new(admin.sub);
    let outcome =
        tokio::task::spawn_blocking(move || browser.update_description(&context, &request)).await?;

    Ok(Json(outcome))
}
