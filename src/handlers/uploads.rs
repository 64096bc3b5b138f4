use axum::{
    body::Body,
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use tokio_util::io::ReaderStream;

use crate::errors::{AppError, Result};
use crate::state::AppState;

/// Stream a stored upload back to the client. The file store rejects names
/// with path separators, so nothing outside the upload directory is served.
pub async fn serve_upload(
    State(state): State<AppState>,
    Path(file_name): Path<String>,
) -> Result<Response> {
    let path = state
        .files
        .resolve(&file_name)
        .ok_or(AppError::FileNotFound)?;

    let file = tokio::fs::File::open(&path)
        .await
        .map_err(|_| AppError::FileNotFound)?;
    let stream = ReaderStream::new(file);

    let headers = [
        (header::CONTENT_TYPE, content_type(&file_name)),
        (header::CACHE_CONTROL, "public, max-age=31536000"),
    ];
    Ok((headers, Body::from_stream(stream)).into_response())
}

fn content_type(file_name: &str) -> &'static str {
    if file_name.ends_with(".png") {
        "image/png"
    } else if file_name.ends_with(".jpg") || file_name.ends_with(".jpeg") {
        "image/jpeg"
    } else if file_name.ends_with(".gif") {
        "image/gif"
    } else if file_name.ends_with(".webp") {
        "image/webp"
    } else {
        "application/octet-stream"
    }
}
