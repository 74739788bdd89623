use axum::extract::{Query, State};
use axum::Json;
use filelight_core::BrowseRequest;

use crate::dto::ListingResponse;
use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/files?dir=&q=&sort=&order=`
pub async fn list_files(
    State(state): State<AppState>,
    Query(request): Query<BrowseRequest>,
) -> Result<Json<ListingResponse>, AppError> {
    let browser = state.browser.clone();
    let listing = tokio::task::spawn_blocking(move || browser.browse(&request)).await??;

    tracing::debug!(
        dir = listing.directory.relative(),
        entries = listing.entries.len(),
        "listing served"
    );

    Ok(Json(ListingResponse::from(&listing)))
}
