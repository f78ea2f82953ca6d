use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use showroom_core::{messages, AppError};
use showroom_core::models::Admin;

use crate::error::HttpAppError;
use crate::state::AppState;

/// The authenticated admin for the current request, inserted as a request
/// extension by [`auth_middleware`].
#[derive(Clone, Debug)]
pub struct CurrentAdmin(pub Admin);

/// Protects mutating routes: extracts the bearer token, verifies it, and
/// loads the admin it names. A token whose admin no longer exists is treated
/// the same as an invalid token.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, HttpAppError> {
    let token = bearer_token(&request)
        .ok_or(AppError::Unauthorized(messages::no_auth_token()))?
        .to_string();

    let claims = super::jwt::decode_token(&state.config, &token)?;

    let admin = state
        .repos
        .admins
        .get(claims.sub)
        .await?
        .ok_or(AppError::Unauthorized(messages::invalid_token()))?;

    request.extensions_mut().insert(CurrentAdmin(admin));
    Ok(next.run(request).await)
}

fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request_with_auth(value: Option<&str>) -> Request {
        let mut builder = Request::builder().uri("/api/cars");
        if let Some(v) = value {
            builder = builder.header(AUTHORIZATION, v);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn extracts_bearer_token() {
        let req = request_with_auth(Some("Bearer abc.def.ghi"));
        assert_eq!(bearer_token(&req), Some("abc.def.ghi"));
    }

    #[test]
    fn missing_header_yields_none() {
        assert_eq!(bearer_token(&request_with_auth(None)), None);
    }

    #[test]
    fn non_bearer_scheme_yields_none() {
        let req = request_with_auth(Some("Basic dXNlcjpwYXNz"));
        assert_eq!(bearer_token(&req), None);
    }

    #[test]
    fn empty_token_yields_none() {
        let req = request_with_auth(Some("Bearer "));
        assert_eq!(bearer_token(&req), None);
    }
}
