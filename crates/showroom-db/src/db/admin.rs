use showroom_core::models::Admin;
use showroom_core::AppError;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

const ADMIN_COLUMNS: &str = "id, name, mobile, email, password_hash, created_at, updated_at";

/// Repository for admin accounts.
#[derive(Clone)]
pub struct AdminRepository {
    pool: PgPool,
}

impl AdminRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self, password_hash), fields(db.table = "admins", db.operation = "insert"))]
    pub async fn create(
        &self,
        name: &str,
        mobile: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<Admin, AppError> {
        let query = format!(
            "INSERT INTO admins (name, mobile, email, password_hash) \
             VALUES ($1, $2, $3, $4) RETURNING {}",
            ADMIN_COLUMNS
        );
        let admin = sqlx::query_as::<Postgres, Admin>(&query)
            .bind(name)
            .bind(mobile)
            .bind(email)
            .bind(password_hash)
            .fetch_one(&self.pool)
            .await?;

        Ok(admin)
    }

    /// Seed helper: insert unless the email is already registered.
    #[tracing::instrument(skip(self, password_hash), fields(db.table = "admins", db.operation = "upsert"))]
    pub async fn create_if_absent(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<Option<Admin>, AppError> {
        let query = format!(
            "INSERT INTO admins (name, email, password_hash) VALUES ($1, $2, $3) \
             ON CONFLICT (email) DO NOTHING RETURNING {}",
            ADMIN_COLUMNS
        );
        let admin = sqlx::query_as::<Postgres, Admin>(&query)
            .bind(name)
            .bind(email)
            .bind(password_hash)
            .fetch_optional(&self.pool)
            .await?;

        Ok(admin)
    }

    #[tracing::instrument(skip(self), fields(db.table = "admins", db.operation = "select", db.record_id = %id))]
    pub async fn get(&self, id: Uuid) -> Result<Option<Admin>, AppError> {
        let query = format!("SELECT {} FROM admins WHERE id = $1", ADMIN_COLUMNS);
        let admin = sqlx::query_as::<Postgres, Admin>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(admin)
    }

    #[tracing::instrument(skip(self), fields(db.table = "admins", db.operation = "select"))]
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Admin>, AppError> {
        let query = format!("SELECT {} FROM admins WHERE email = $1", ADMIN_COLUMNS);
        let admin = sqlx::query_as::<Postgres, Admin>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(admin)
    }
}
