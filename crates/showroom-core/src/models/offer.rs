//! Seasonal offer model.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::Localized;

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonalOffer {
    pub id: Uuid,
    pub title: Localized,
    pub details: Localized,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Whether the offer is currently displayed on the site.
    pub show: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug)]
pub struct SeasonalOfferDraft {
    pub title: Localized,
    pub details: Localized,
    pub show: bool,
}
