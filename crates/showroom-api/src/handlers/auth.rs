//! Admin login and session endpoints.

use std::sync::Arc;

use axum::extract::State;
use axum::response::Response;
use axum::Extension;
use serde::{Deserialize, Serialize};
use showroom_core::models::Admin;
use showroom_core::{messages, AppError};

use crate::auth::{issue_token, CurrentAdmin};
use crate::error::{ApiJson, HttpAppError};
use crate::response;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub admin: Admin,
}

/// Verify credentials and issue a JWT. Unknown email and wrong password are
/// indistinguishable to the client.
pub async fn login(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<LoginRequest>,
) -> Result<Response, HttpAppError> {
    if body.email.trim().is_empty() || body.password.is_empty() {
        return Err(AppError::Validation(messages::provide_email_password()).into());
    }

    let admin = state
        .repos
        .admins
        .find_by_email(body.email.trim())
        .await?
        .ok_or(AppError::Unauthorized(messages::invalid_credentials()))?;

    let verified = bcrypt::verify(&body.password, &admin.password_hash)
        .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))?;
    if !verified {
        return Err(AppError::Unauthorized(messages::invalid_credentials()).into());
    }

    let token = issue_token(&state.config, admin.id)?;
    Ok(response::ok(LoginResponse { token, admin }))
}

/// The admin identified by the current bearer token.
pub async fn me(Extension(admin): Extension<CurrentAdmin>) -> Result<Response, HttpAppError> {
    Ok(response::ok(admin.0))
}
