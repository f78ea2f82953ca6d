use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use showroom_core::{messages, AppError, Config};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Admin id.
    pub sub: Uuid,
    pub iat: i64,
    pub exp: i64,
}

/// Sign a token for the given admin, expiring per `JWT_EXPIRY_HOURS`.
pub fn issue_token(config: &Config, admin_id: Uuid) -> Result<String, AppError> {
    let now = Utc::now();
    let claims = Claims {
        sub: admin_id,
        iat: now.timestamp(),
        exp: (now + Duration::hours(config.jwt_expiry_hours)).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
}

/// Verify signature and expiry; invalid tokens become a bilingual 401.
pub fn decode_token(config: &Config, token: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| {
        tracing::debug!(error = %e, "Token validation failed");
        AppError::Unauthorized(messages::invalid_token())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use showroom_core::StorageBackend;

    fn test_config() -> Config {
        Config {
            server_port: 3000,
            environment: "test".into(),
            cors_origins: vec![],
            database_url: "postgres://localhost/test".into(),
            db_max_connections: 5,
            db_timeout_seconds: 5,
            jwt_secret: "0123456789abcdef0123456789abcdef".into(),
            jwt_expiry_hours: 24,
            root_admin_email: None,
            root_admin_password: None,
            storage_backend: StorageBackend::Local,
            local_storage_path: "uploads".into(),
            local_storage_base_url: "/uploads".into(),
            s3_bucket: None,
            s3_region: None,
            s3_endpoint: None,
            max_file_size_bytes: 2 * 1024 * 1024,
            max_image_width: 1200,
            jpeg_quality: 80,
            max_images_per_car: 10,
            allowed_content_types: vec!["image/jpeg".into()],
        }
    }

    #[test]
    fn round_trips_admin_id() {
        let config = test_config();
        let admin_id = Uuid::new_v4();
        let token = issue_token(&config, admin_id).unwrap();
        let claims = decode_token(&config, &token).unwrap();
        assert_eq!(claims.sub, admin_id);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn rejects_token_signed_with_other_secret() {
        let config = test_config();
        let mut other = test_config();
        other.jwt_secret = "fedcba9876543210fedcba9876543210".into();

        let token = issue_token(&other, Uuid::new_v4()).unwrap();
        let err = decode_token(&config, &token).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn rejects_garbage_tokens() {
        let config = test_config();
        assert!(decode_token(&config, "not.a.jwt").is_err());
    }
}
