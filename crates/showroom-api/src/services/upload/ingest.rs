//! Multipart parsing and validation.
//!
//! The whole form is buffered in memory before any processing starts: either
//! every part passes validation or the request is rejected and all buffers
//! drop. File sizes are checked while streaming chunks so an oversized body
//! is aborted without being read to the end.

use std::collections::HashMap;

use axum::extract::Multipart;
use showroom_core::{messages, AppError};
use showroom_processing::UploadRules;

/// One file part, fully buffered and validated.
#[derive(Clone, Debug)]
pub struct UploadedFile {
    pub field_name: String,
    pub original_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// A parsed multipart form: file parts plus plain text fields.
#[derive(Debug, Default)]
pub struct MultipartForm {
    pub files: Vec<UploadedFile>,
    pub fields: HashMap<String, String>,
}

impl MultipartForm {
    /// Take ownership of the files under a field, preserving order.
    pub fn take_files(&mut self, field_name: &str) -> Vec<UploadedFile> {
        let (matched, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut self.files)
            .into_iter()
            .partition(|f| f.field_name == field_name);
        self.files = rest;
        matched
    }

    /// Deserialize the text fields into a typed payload. Each value is first
    /// parsed as JSON (so numbers, booleans and `{en,ar}` objects work) and
    /// falls back to a plain string.
    pub fn parse_fields<T: serde::de::DeserializeOwned>(&self) -> Result<T, AppError> {
        let mut map = serde_json::Map::new();
        for (key, value) in &self.fields {
            let parsed = serde_json::from_str::<serde_json::Value>(value)
                .unwrap_or_else(|_| serde_json::Value::String(value.clone()));
            map.insert(key.clone(), parsed);
        }
        serde_json::from_value(serde_json::Value::Object(map))
            .map_err(|e| {
                tracing::debug!(error = %e, "Form field deserialization failed");
                AppError::Validation(messages::invalid_input())
            })
    }
}

/// Buffer and validate an entire multipart request.
///
/// Per-file checks (content type, streamed size cap, non-empty) come from
/// `rules`; the per-field count cap is enforced after parsing. Any failure
/// rejects the whole request.
pub async fn collect_multipart(
    mut multipart: Multipart,
    rules: &UploadRules,
) -> Result<MultipartForm, AppError> {
    let mut form = MultipartForm::default();
    let mut field_counts: HashMap<String, usize> = HashMap::new();

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| {
            tracing::debug!(error = %e, "Multipart read failed");
            AppError::Validation(messages::invalid_input())
        })?
    {
        let field_name = field.name().unwrap_or_default().to_string();

        match field.file_name().map(str::to_string) {
            Some(original_name) => {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                rules.check_content_type(&content_type)?;

                // Stream chunks so an oversized upload aborts early.
                let mut data = Vec::new();
                while let Some(chunk) = field.chunk().await.map_err(|e| {
                    tracing::debug!(error = %e, "Multipart chunk read failed");
                    AppError::Validation(messages::invalid_input())
                })?
                {
                    data.extend_from_slice(&chunk);
                    rules.check_size(data.len())?;
                }
                rules.check_file(&content_type, data.len())?;

                let count = field_counts.entry(field_name.clone()).or_insert(0);
                *count += 1;
                rules.check_file_count(*count)?;

                form.files.push(UploadedFile {
                    field_name,
                    original_name,
                    content_type,
                    data,
                });
            }
            None => {
                let value = field.text().await.map_err(|e| {
                    tracing::debug!(error = %e, "Multipart field read failed");
                    AppError::Validation(messages::invalid_input())
                })?;
                form.fields.insert(field_name, value);
            }
        }
    }

    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    fn form_with_fields(pairs: &[(&str, &str)]) -> MultipartForm {
        MultipartForm {
            files: Vec::new(),
            fields: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Payload {
        name: showroom_core::models::Localized,
        year: i32,
        warranty: bool,
        stock_number: String,
    }

    #[test]
    fn parse_fields_handles_json_and_plain_strings() {
        let form = form_with_fields(&[
            ("name", r#"{"en":"Corolla","ar":"كورولا"}"#),
            ("year", "2024"),
            ("warranty", "true"),
            ("stockNumber", "EM-1001"),
        ]);
        let payload: Payload = form.parse_fields().unwrap();
        assert_eq!(payload.name.en, "Corolla");
        assert_eq!(payload.year, 2024);
        assert!(payload.warranty);
        assert_eq!(payload.stock_number, "EM-1001");
    }

    #[test]
    fn parse_fields_rejects_missing_required() {
        let form = form_with_fields(&[("year", "2024")]);
        let result: Result<Payload, _> = form.parse_fields();
        assert!(result.is_err());
    }

    #[test]
    fn take_files_preserves_order_and_removes() {
        let mut form = MultipartForm::default();
        for name in ["a.jpg", "b.jpg"] {
            form.files.push(UploadedFile {
                field_name: "images".into(),
                original_name: name.to_string(),
                content_type: "image/jpeg".into(),
                data: vec![0],
            });
        }
        form.files.push(UploadedFile {
            field_name: "other".into(),
            original_name: "c.jpg".into(),
            content_type: "image/jpeg".into(),
            data: vec![0],
        });

        let taken = form.take_files("images");
        assert_eq!(taken.len(), 2);
        assert_eq!(taken[0].original_name, "a.jpg");
        assert_eq!(taken[1].original_name, "b.jpg");
        assert_eq!(form.files.len(), 1);
    }
}
