//! Pre-normalization upload checks.
//!
//! These run on the declared metadata of each multipart part before any bytes
//! are decoded: content type allow-list, per-file size cap, per-field count
//! cap. Content spoofing is caught later by the decoder, not here.

use showroom_core::{messages, AppError};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("File too large: {size} bytes (max {max})")]
    FileTooLarge { size: usize, max: usize },

    #[error("Content type not allowed: {content_type}")]
    InvalidContentType { content_type: String },

    #[error("Empty file")]
    EmptyFile,

    #[error("Too many files: {count} (max {max})")]
    TooManyFiles { count: usize, max: usize },
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::FileTooLarge { size, max } => AppError::PayloadTooLarge { size, max },
            ValidationError::InvalidContentType { content_type } => {
                AppError::UnsupportedMediaType(content_type)
            }
            ValidationError::EmptyFile => AppError::Validation(messages::image_required()),
            ValidationError::TooManyFiles { max, .. } => {
                AppError::Validation(messages::too_many_images(&max.to_string()))
            }
        }
    }
}

/// Upload policy applied to every incoming file.
#[derive(Clone, Debug)]
pub struct UploadRules {
    pub max_file_size: usize,
    pub allowed_content_types: Vec<String>,
    pub max_files_per_field: usize,
}

impl UploadRules {
    pub fn new(
        max_file_size: usize,
        allowed_content_types: Vec<String>,
        max_files_per_field: usize,
    ) -> Self {
        Self {
            max_file_size,
            allowed_content_types,
            max_files_per_field,
        }
    }

    /// Check a declared content type against the allow-list. Parameters such
    /// as `;charset=...` are ignored; comparison is case-insensitive.
    pub fn check_content_type(&self, content_type: &str) -> Result<(), ValidationError> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or("")
            .trim()
            .to_ascii_lowercase();

        if self.allowed_content_types.iter().any(|t| *t == essence) {
            Ok(())
        } else {
            Err(ValidationError::InvalidContentType {
                content_type: content_type.to_string(),
            })
        }
    }

    /// Check accumulated file bytes. Called incrementally while streaming so
    /// an oversized upload is rejected before being fully buffered.
    pub fn check_size(&self, size: usize) -> Result<(), ValidationError> {
        if size > self.max_file_size {
            return Err(ValidationError::FileTooLarge {
                size,
                max: self.max_file_size,
            });
        }
        Ok(())
    }

    /// Check a completed file: non-empty and within the size cap.
    pub fn check_file(&self, content_type: &str, size: usize) -> Result<(), ValidationError> {
        self.check_content_type(content_type)?;
        if size == 0 {
            return Err(ValidationError::EmptyFile);
        }
        self.check_size(size)
    }

    /// Check how many files arrived under one multipart field.
    pub fn check_file_count(&self, count: usize) -> Result<(), ValidationError> {
        if count > self.max_files_per_field {
            return Err(ValidationError::TooManyFiles {
                count,
                max: self.max_files_per_field,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> UploadRules {
        UploadRules::new(
            2 * 1024 * 1024,
            vec![
                "image/jpeg".to_string(),
                "image/png".to_string(),
                "image/webp".to_string(),
            ],
            10,
        )
    }

    #[test]
    fn allows_listed_content_types() {
        assert!(rules().check_content_type("image/jpeg").is_ok());
        assert!(rules().check_content_type("image/png").is_ok());
    }

    #[test]
    fn strips_parameters_and_ignores_case() {
        assert!(rules()
            .check_content_type("IMAGE/JPEG; charset=binary")
            .is_ok());
    }

    #[test]
    fn rejects_non_image_types() {
        let err = rules().check_content_type("application/pdf").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidContentType { .. }));
    }

    #[test]
    fn rejects_oversized_files() {
        let err = rules().check_size(3 * 1024 * 1024).unwrap_err();
        assert!(matches!(err, ValidationError::FileTooLarge { .. }));
        assert!(rules().check_size(2 * 1024 * 1024).is_ok());
    }

    #[test]
    fn rejects_empty_files() {
        let err = rules().check_file("image/jpeg", 0).unwrap_err();
        assert_eq!(err, ValidationError::EmptyFile);
    }

    #[test]
    fn enforces_per_field_file_cap() {
        assert!(rules().check_file_count(10).is_ok());
        let err = rules().check_file_count(11).unwrap_err();
        assert!(matches!(err, ValidationError::TooManyFiles { .. }));
    }
}
