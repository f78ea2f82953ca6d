//! News item model.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::Localized;

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct News {
    pub id: Uuid,
    pub title: Localized,
    pub details: Localized,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug)]
pub struct NewsDraft {
    pub title: Localized,
    pub details: Localized,
}
