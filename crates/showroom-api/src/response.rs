//! Success response envelope.
//!
//! Every successful endpoint responds with `{ "success": true, ... }`; list
//! endpoints add `count` (page size), `total` (all matches) and a
//! `pagination` block. Errors use the shape in [`crate::error`].

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use showroom_core::models::{PageInfo, Pagination};
use showroom_core::{messages, Message};

#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PageInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
}

/// `200 { success, data }`
pub fn ok<T: Serialize>(data: T) -> Response {
    Json(ApiResponse {
        success: true,
        count: None,
        total: None,
        pagination: None,
        data: Some(data),
        message: None,
    })
    .into_response()
}

/// `201 { success, data }`
pub fn created<T: Serialize>(data: T) -> Response {
    (
        StatusCode::CREATED,
        Json(ApiResponse {
            success: true,
            count: None,
            total: None,
            pagination: None,
            data: Some(data),
            message: None,
        }),
    )
        .into_response()
}

/// `200 { success, count, total, pagination, data }`
pub fn list<T: Serialize>(items: Vec<T>, total: i64, pagination: &Pagination) -> Response {
    Json(ApiResponse {
        success: true,
        count: Some(items.len()),
        total: Some(total),
        pagination: Some(PageInfo::new(pagination, total)),
        data: Some(items),
        message: None,
    })
    .into_response()
}

/// `200 { success, message }` after a delete.
pub fn deleted() -> Response {
    Json(ApiResponse::<()> {
        success: true,
        count: None,
        total: None,
        pagination: None,
        data: None,
        message: Some(messages::deleted()),
    })
    .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_envelope_carries_count_total_pagination() {
        let body = ApiResponse {
            success: true,
            count: Some(2),
            total: Some(5),
            pagination: Some(PageInfo::new(&Pagination { page: 1, limit: 2 }, 5)),
            data: Some(vec!["a", "b"]),
            message: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["count"], 2);
        assert_eq!(json["total"], 5);
        assert_eq!(json["pagination"]["totalPages"], 3);
    }

    #[test]
    fn plain_envelope_omits_list_fields() {
        let body = ApiResponse {
            success: true,
            count: None,
            total: None,
            pagination: None,
            data: Some("x"),
            message: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("count").is_none());
        assert!(json.get("pagination").is_none());
    }
}
