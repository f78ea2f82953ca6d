//! Error types module
//!
//! All errors are unified under the [`AppError`] enum. Lower layers (storage,
//! processing) have their own typed errors and are converted at the service
//! boundary; the HTTP layer only translates `AppError` into a status code and
//! a bilingual client message, never interprets error internals.

use crate::locales::{messages, Message};

#[cfg(feature = "sqlx")]
use sqlx::Error as SqlxError;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Expected errors like validation failures
    Debug,
    /// Recoverable issues like size limits
    Warn,
    /// Unexpected failures
    Error,
}

/// How an error should be presented over HTTP.
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Bilingual client-facing message (may differ from the internal message)
    fn client_message(&self) -> Message;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[cfg(feature = "sqlx")]
    #[error("Database error: {0}")]
    Database(#[source] SqlxError),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Image decode error: {0}")]
    ImageDecode(String),

    #[error("Image too large: {size} bytes (max {max})")]
    ImageTooLarge { size: usize, max: usize },

    #[error("File too large: {size} bytes (max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("Main-image invariant violated: {0}")]
    ImageInvariant(String),

    #[error("Validation failed: {}", .0.en)]
    Validation(Message),

    #[error("Not found: {}", .0.en)]
    NotFound(Message),

    #[error("Duplicate value for field '{0}'")]
    DuplicateKey(String),

    #[error("Unauthorized: {}", .0.en)]
    Unauthorized(Message),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn not_found() -> Self {
        AppError::NotFound(messages::not_found())
    }

    pub fn not_found_with_id(id: &str) -> Self {
        AppError::NotFound(messages::not_found_with_id(id))
    }
}

#[cfg(feature = "sqlx")]
impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        // Unique violations render as a 400 with the offending constraint,
        // matching the original duplicate-key behavior.
        if let SqlxError::Database(ref db) = err {
            if db.is_unique_violation() {
                let field = db
                    .constraint()
                    .unwrap_or("value")
                    .trim_end_matches("_key")
                    .rsplit('_')
                    .next()
                    .unwrap_or("value")
                    .to_string();
                return AppError::DuplicateKey(field);
            }
        }
        AppError::Database(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<uuid::Error> for AppError {
    fn from(err: uuid::Error) -> Self {
        AppError::Validation(messages::invalid_id(&err.to_string()))
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        match self {
            #[cfg(feature = "sqlx")]
            AppError::Database(_) => 500,
            AppError::Storage(_) => 500,
            AppError::Internal(_) => 500,
            AppError::ImageInvariant(_) => 500,
            AppError::NotFound(_) => 404,
            AppError::Unauthorized(_) => 401,
            AppError::ImageDecode(_)
            | AppError::ImageTooLarge { .. }
            | AppError::PayloadTooLarge { .. }
            | AppError::UnsupportedMediaType(_)
            | AppError::Validation(_)
            | AppError::DuplicateKey(_) => 400,
        }
    }

    fn client_message(&self) -> Message {
        match self {
            #[cfg(feature = "sqlx")]
            AppError::Database(_) => messages::server_error(),
            AppError::Storage(_) | AppError::Internal(_) | AppError::ImageInvariant(_) => {
                messages::server_error()
            }
            AppError::ImageDecode(_) | AppError::UnsupportedMediaType(_) => messages::image_only(),
            AppError::ImageTooLarge { max, .. } | AppError::PayloadTooLarge { max, .. } => {
                messages::image_too_large(&(max / 1024 / 1024).max(1).to_string())
            }
            AppError::Validation(msg) | AppError::NotFound(msg) | AppError::Unauthorized(msg) => {
                msg.clone()
            }
            AppError::DuplicateKey(field) => messages::duplicate_key(field),
        }
    }

    fn log_level(&self) -> LogLevel {
        match self {
            #[cfg(feature = "sqlx")]
            AppError::Database(_) => LogLevel::Error,
            AppError::Storage(_) | AppError::Internal(_) | AppError::ImageInvariant(_) => {
                LogLevel::Error
            }
            AppError::ImageTooLarge { .. } | AppError::PayloadTooLarge { .. } => LogLevel::Warn,
            _ => LogLevel::Debug,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_400_and_debug() {
        let err = AppError::Validation(messages::invalid_input());
        assert_eq!(err.http_status_code(), 400);
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn invariant_violations_are_500() {
        let err = AppError::ImageInvariant("two main images".into());
        assert_eq!(err.http_status_code(), 500);
        // Internal details never leak to the client
        assert_eq!(err.client_message(), messages::server_error());
    }

    #[test]
    fn size_errors_surface_limit_in_megabytes() {
        let err = AppError::PayloadTooLarge {
            size: 6 * 1024 * 1024,
            max: 2 * 1024 * 1024,
        };
        assert_eq!(err.http_status_code(), 400);
        assert!(err.client_message().en.contains('2'));
    }

    #[test]
    fn decode_errors_render_as_image_only() {
        let err = AppError::ImageDecode("not a jpeg".into());
        assert_eq!(err.http_status_code(), 400);
        assert_eq!(err.client_message(), messages::image_only());
    }
}
