use crate::error::AppError;
use axum::http::Uri;

/// Fallback for requests no route matches
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}
