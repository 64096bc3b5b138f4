// src/errors.rs
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("MongoDB error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("Multipart error: {0}")]
    Multipart(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid ObjectId: {0}")]
    InvalidId(String),

    #[error("Post not found")]
    PostNotFound,

    #[error("File not found")]
    FileNotFound,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error"),
            AppError::Multipart(_) => (StatusCode::BAD_REQUEST, "Invalid multipart data"),
            AppError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO error"),
            AppError::InvalidId(_) => (StatusCode::BAD_REQUEST, "Invalid ID format"),
            AppError::PostNotFound => (StatusCode::NOT_FOUND, "Post not found"),
            AppError::FileNotFound => (StatusCode::NOT_FOUND, "File not found"),
        };

        // Full detail goes to the log; only a generic message leaves the process.
        if status.is_server_error() {
            tracing::error!("request failed: {}", self);
        }

        let body = Json(json!({
            "error": error_message,
            "success": false,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        }));

        (status, body).into_response()
    }
}

impl From<axum::extract::multipart::MultipartError> for AppError {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        AppError::Multipart(err.to_string())
    }
}

impl From<mongodb::bson::oid::Error> for AppError {
    fn from(err: mongodb::bson::oid::Error) -> Self {
        AppError::InvalidId(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_failure_maps_to_500() {
        let err = AppError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk full"));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn missing_post_maps_to_404() {
        assert_eq!(
            AppError::PostNotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn bad_id_maps_to_400() {
        assert_eq!(
            AppError::InvalidId("nope".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
    }
}
