//! HTTP error response conversion
//!
//! This module provides HTTP-specific error response conversion for AppError.
//!
//! **Preferred handler pattern:** Return `Result<impl IntoResponse, HttpAppError>`.
//! Use `AppError` (or types that implement `Into<AppError>`) for errors and `?`
//! so they become `HttpAppError` and render consistently (status, body, logging).

use axum::{
    extract::rejection::JsonRejection,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Serialize};
use showroom_core::{messages, AppError, ErrorMetadata, LogLevel, Message};
use showroom_processing::NormalizeError;
use showroom_storage::StorageError;

/// Client-facing error shape: `{ "success": false, "message": { en, ar } }`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: Message,
}

/// Wrapper type for AppError to implement IntoResponse.
/// Necessary because of Rust's orphan rules - we can't implement
/// IntoResponse (external trait) for AppError (external type from showroom-core).
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::Internal(err.to_string()))
    }
}

impl From<sqlx::Error> for HttpAppError {
    fn from(err: sqlx::Error) -> Self {
        HttpAppError(err.into())
    }
}

// Domain errors convert here rather than in their own crates (orphan rules:
// we implement for the local HttpAppError).

pub fn storage_to_app(err: StorageError) -> AppError {
    match err {
        StorageError::NotFound(key) => AppError::NotFound(messages::not_found_with_id(&key)),
        StorageError::InvalidKey(msg) => AppError::Storage(format!("invalid key: {}", msg)),
        StorageError::IoError(e) => AppError::Storage(format!("IO error: {}", e)),
        other => AppError::Storage(other.to_string()),
    }
}

impl From<StorageError> for HttpAppError {
    fn from(err: StorageError) -> Self {
        HttpAppError(storage_to_app(err))
    }
}

impl From<NormalizeError> for HttpAppError {
    fn from(err: NormalizeError) -> Self {
        HttpAppError(err.into())
    }
}

impl From<showroom_processing::ValidationError> for HttpAppError {
    fn from(err: showroom_processing::ValidationError) -> Self {
        HttpAppError(err.into())
    }
}

/// Convert JSON body deserialization failures into a 400 with the bilingual
/// error shape instead of axum's plain-text default.
impl From<JsonRejection> for HttpAppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(rejection = %rejection.body_text(), "Invalid JSON body");
        HttpAppError(AppError::Validation(messages::invalid_input()))
    }
}

/// JSON body extractor that renders rejections in the API's error shape.
#[derive(Debug, Clone, Copy)]
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = HttpAppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(inner) = Json::<T>::from_request(req, state)
            .await
            .map_err(HttpAppError::from)?;
        Ok(ApiJson(inner))
    }
}

fn log_error(error: &AppError) {
    match error.log_level() {
        LogLevel::Debug => tracing::debug!(error = %error, "Request failed"),
        LogLevel::Warn => tracing::warn!(error = %error, "Request failed"),
        LogLevel::Error => tracing::error!(error = %error, "Request failed"),
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        let body = Json(ErrorResponse {
            success: false,
            message: app_error.client_message(),
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use showroom_processing::validator::ValidationError;

    #[test]
    fn storage_write_failures_are_internal() {
        let err = storage_to_app(StorageError::WriteFailed("disk full".into()));
        assert_eq!(err.http_status_code(), 500);
        // Internals stay out of the client message
        assert_eq!(err.client_message(), messages::server_error());
    }

    #[test]
    fn storage_not_found_maps_to_404() {
        let err = storage_to_app(StorageError::NotFound("cars/x.jpg".into()));
        assert_eq!(err.http_status_code(), 404);
    }

    #[test]
    fn validation_errors_render_bilingual_image_messages() {
        let err: AppError = ValidationError::InvalidContentType {
            content_type: "application/pdf".into(),
        }
        .into();
        assert_eq!(err.http_status_code(), 400);
        assert_eq!(err.client_message(), messages::image_only());
    }

    #[test]
    fn error_body_has_success_false_and_bilingual_message() {
        let body = ErrorResponse {
            success: false,
            message: messages::not_found(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["success"], false);
        assert!(json["message"]["en"].is_string());
        assert!(json["message"]["ar"].is_string());
    }
}
