use showroom_core::models::{Feedback, FeedbackDraft, Pagination};
use showroom_core::AppError;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

const FEEDBACK_COLUMNS: &str = "id, full_name, mobile_number, email, message, created_at";

/// Repository for visitor feedback submissions.
#[derive(Clone)]
pub struct FeedbackRepository {
    pool: PgPool,
}

impl FeedbackRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self, draft), fields(db.table = "feedback", db.operation = "insert"))]
    pub async fn create(&self, draft: &FeedbackDraft) -> Result<Feedback, AppError> {
        let query = format!(
            "INSERT INTO feedback (full_name, mobile_number, email, message) \
             VALUES ($1, $2, $3, $4) RETURNING {}",
            FEEDBACK_COLUMNS
        );
        let feedback = sqlx::query_as::<Postgres, Feedback>(&query)
            .bind(&draft.full_name)
            .bind(&draft.mobile_number)
            .bind(&draft.email)
            .bind(&draft.message)
            .fetch_one(&self.pool)
            .await?;

        Ok(feedback)
    }

    #[tracing::instrument(skip(self), fields(db.table = "feedback", db.operation = "select"))]
    pub async fn list(&self, pagination: Pagination) -> Result<(Vec<Feedback>, i64), AppError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM feedback")
            .fetch_one(&self.pool)
            .await?;

        let query = format!(
            "SELECT {} FROM feedback ORDER BY created_at DESC LIMIT $1 OFFSET $2",
            FEEDBACK_COLUMNS
        );
        let entries = sqlx::query_as::<Postgres, Feedback>(&query)
            .bind(pagination.limit)
            .bind(pagination.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok((entries, total))
    }

    #[tracing::instrument(skip(self), fields(db.table = "feedback", db.operation = "delete", db.record_id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let rows_affected = sqlx::query("DELETE FROM feedback WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected > 0)
    }
}
