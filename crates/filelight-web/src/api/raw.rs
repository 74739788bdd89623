use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use tokio_util::io::ReaderStream;

use crate::dto::RawQuery;
use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/raw?path=` streams a confined file.
pub async fn download(
    State(state): State<AppState>,
    Query(query): Query<RawQuery>,
) -> Result<Response, AppError> {
    let browser = state.browser.clone();
    let requested = query.path.clone();
    let file_path = tokio::task::spawn_blocking(move || browser.resolve_file(&requested)).await??;

    let file = tokio::fs::File::open(file_path.as_path())
        .await
        .map_err(|e| AppError::Internal(format!("Failed to open {}: {e}", file_path.as_path().display())))?;
    let length = file
        .metadata()
        .await
        .map_err(|e| AppError::Internal(format!("Failed to stat file: {e}")))?
        .len();

    let mime = mime_guess::from_path(file_path.as_path()).first_or_octet_stream();
    tracing::debug!(path = file_path.relative(), bytes = length, "raw download");

    let body = Body::from_stream(ReaderStream::new(file));
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, mime.to_string()),
            (header::CONTENT_LENGTH, length.to_string()),
        ],
        body,
    )
        .into_response())
}
