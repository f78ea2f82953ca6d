//! Visitor feedback model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Clone, Debug, Serialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: Uuid,
    pub full_name: String,
    pub mobile_number: String,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Public submission body; validated before insertion.
#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackDraft {
    #[validate(length(min = 1))]
    pub full_name: String,
    #[validate(length(min = 1))]
    pub mobile_number: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_feedback_passes() {
        let draft = FeedbackDraft {
            full_name: "Jane Roe".into(),
            mobile_number: "0501234567".into(),
            email: "jane@example.com".into(),
            message: "Great showroom".into(),
        };
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn bad_email_is_rejected() {
        let draft = FeedbackDraft {
            full_name: "Jane Roe".into(),
            mobile_number: "0501234567".into(),
            email: "not-an-email".into(),
            message: "hello".into(),
        };
        assert!(draft.validate().is_err());
    }
}
