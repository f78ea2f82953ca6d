//! Configuration module
//!
//! Env-driven configuration with defaults, loaded once at startup via
//! [`Config::from_env`] and validated fail-fast with [`Config::validate`].

use std::env;
use std::str::FromStr;

use crate::storage_types::StorageBackend;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_MAX_CONNECTIONS: u32 = 20;
const DEFAULT_DB_TIMEOUT_SECS: u64 = 30;
const DEFAULT_JWT_EXPIRY_HOURS: i64 = 24;
const DEFAULT_MAX_FILE_SIZE: usize = 2 * 1024 * 1024;
const DEFAULT_MAX_IMAGE_WIDTH: u32 = 1200;
const DEFAULT_JPEG_QUALITY: u8 = 80;
const DEFAULT_MAX_IMAGES_PER_CAR: usize = 10;

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
    pub root_admin_email: Option<String>,
    pub root_admin_password: Option<String>,
    // Storage configuration
    pub storage_backend: StorageBackend,
    pub local_storage_path: String,
    pub local_storage_base_url: String,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>,
    // Image pipeline configuration
    pub max_file_size_bytes: usize,
    pub max_image_width: u32,
    pub jpeg_quality: u8,
    pub max_images_per_car: usize,
    pub allowed_content_types: Vec<String>,
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        // Load .env if present; real env vars win.
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;
        let jwt_secret =
            env::var("JWT_SECRET").map_err(|_| anyhow::anyhow!("JWT_SECRET must be set"))?;

        let storage_backend = env_opt("STORAGE_BACKEND")
            .map(|v| v.parse::<StorageBackend>())
            .transpose()
            .map_err(|e| anyhow::anyhow!(e))?
            .unwrap_or(StorageBackend::Local);

        let cors_origins = env_opt("CORS_ORIGINS")
            .map(|v| {
                v.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Config {
            server_port: env_or("PORT", DEFAULT_PORT),
            environment: env_opt("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            cors_origins,
            database_url,
            db_max_connections: env_or("DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS),
            db_timeout_seconds: env_or("DB_TIMEOUT_SECONDS", DEFAULT_DB_TIMEOUT_SECS),
            jwt_secret,
            jwt_expiry_hours: env_or("JWT_EXPIRY_HOURS", DEFAULT_JWT_EXPIRY_HOURS),
            root_admin_email: env_opt("ROOT_ADMIN_EMAIL"),
            root_admin_password: env_opt("ROOT_ADMIN_PASSWORD"),
            storage_backend,
            local_storage_path: env_opt("LOCAL_STORAGE_PATH")
                .unwrap_or_else(|| "uploads".to_string()),
            local_storage_base_url: env_opt("LOCAL_STORAGE_BASE_URL")
                .unwrap_or_else(|| "/uploads".to_string()),
            s3_bucket: env_opt("S3_BUCKET"),
            s3_region: env_opt("S3_REGION").or_else(|| env_opt("AWS_REGION")),
            s3_endpoint: env_opt("S3_ENDPOINT"),
            max_file_size_bytes: env_or("MAX_FILE_SIZE", DEFAULT_MAX_FILE_SIZE),
            max_image_width: env_or("MAX_IMAGE_WIDTH", DEFAULT_MAX_IMAGE_WIDTH),
            jpeg_quality: env_or("JPEG_QUALITY", DEFAULT_JPEG_QUALITY),
            max_images_per_car: env_or("MAX_IMAGES_PER_CAR", DEFAULT_MAX_IMAGES_PER_CAR),
            allowed_content_types: vec![
                "image/jpeg".to_string(),
                "image/jpg".to_string(),
                "image/png".to_string(),
                "image/webp".to_string(),
            ],
        })
    }

    /// Fail fast on misconfiguration before any service starts.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.jwt_secret.len() < 16 {
            anyhow::bail!("JWT_SECRET must be at least 16 characters");
        }
        if self.max_file_size_bytes == 0 {
            anyhow::bail!("MAX_FILE_SIZE must be greater than zero");
        }
        if self.jpeg_quality == 0 || self.jpeg_quality > 100 {
            anyhow::bail!("JPEG_QUALITY must be within 1..=100");
        }
        if self.storage_backend == StorageBackend::S3 && self.s3_bucket.is_none() {
            anyhow::bail!("S3_BUCKET must be set when STORAGE_BACKEND=s3");
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            server_port: 3000,
            environment: "test".into(),
            cors_origins: vec![],
            database_url: "postgres://localhost/showroom_test".into(),
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
            max_file_size_bytes: DEFAULT_MAX_FILE_SIZE,
            max_image_width: DEFAULT_MAX_IMAGE_WIDTH,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            max_images_per_car: DEFAULT_MAX_IMAGES_PER_CAR,
            allowed_content_types: vec!["image/jpeg".into()],
        }
    }

    #[test]
    fn valid_config_passes_validation() {
        assert!(test_config().validate().is_ok());
    }

    #[test]
    fn short_jwt_secret_is_rejected() {
        let mut config = test_config();
        config.jwt_secret = "short".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn s3_backend_requires_bucket() {
        let mut config = test_config();
        config.storage_backend = StorageBackend::S3;
        assert!(config.validate().is_err());
        config.s3_bucket = Some("showroom-media".into());
        assert!(config.validate().is_ok());
    }
}
