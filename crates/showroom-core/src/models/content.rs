//! Site-wide singleton content: home page images, social links, terms and
//! the "what we do" blurb. Exactly one row of each exists; repositories
//! enforce that with a unique singleton column and insert-if-absent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Localized;

/// The named, independently replaceable image slots on the home page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HomeSlot {
    WhatWeDo,
    Brands,
    News,
    Showroom,
    Feedback,
    Terms,
}

impl HomeSlot {
    pub const ALL: [HomeSlot; 6] = [
        HomeSlot::WhatWeDo,
        HomeSlot::Brands,
        HomeSlot::News,
        HomeSlot::Showroom,
        HomeSlot::Feedback,
        HomeSlot::Terms,
    ];

    /// Multipart field name for this slot.
    pub fn field_name(&self) -> &'static str {
        match self {
            HomeSlot::WhatWeDo => "whatWeDo",
            HomeSlot::Brands => "brands",
            HomeSlot::News => "news",
            HomeSlot::Showroom => "showroom",
            HomeSlot::Feedback => "feedback",
            HomeSlot::Terms => "terms",
        }
    }

    pub fn from_field_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.field_name() == name)
    }
}

#[derive(Clone, Debug, Serialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct HomePageImages {
    pub id: Uuid,
    pub what_we_do: Option<String>,
    pub brands: Option<String>,
    pub news: Option<String>,
    pub showroom: Option<String>,
    pub feedback: Option<String>,
    pub terms: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl HomePageImages {
    pub fn slot(&self, slot: HomeSlot) -> Option<&str> {
        match slot {
            HomeSlot::WhatWeDo => self.what_we_do.as_deref(),
            HomeSlot::Brands => self.brands.as_deref(),
            HomeSlot::News => self.news.as_deref(),
            HomeSlot::Showroom => self.showroom.as_deref(),
            HomeSlot::Feedback => self.feedback.as_deref(),
            HomeSlot::Terms => self.terms.as_deref(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Social {
    pub id: Uuid,
    pub mobile: Option<String>,
    pub insta: Option<String>,
    pub tiktok: Option<String>,
    pub youtube: Option<String>,
    pub snapchat: Option<String>,
    pub location: Option<String>,
    pub location_link: Option<String>,
    pub email: Option<String>,
    pub whatsapp: Option<String>,
    pub sales_numbers: Vec<String>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update for [`Social`]; `None` fields are left unchanged.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialUpdate {
    pub mobile: Option<String>,
    pub insta: Option<String>,
    pub tiktok: Option<String>,
    pub youtube: Option<String>,
    pub snapchat: Option<String>,
    pub location: Option<String>,
    pub location_link: Option<String>,
    pub email: Option<String>,
    pub whatsapp: Option<String>,
    pub sales_numbers: Option<Vec<String>>,
}

/// One ordered section of the terms and conditions.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TermsSection {
    pub title: Localized,
    pub details: Localized,
    pub order: i32,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Terms {
    pub id: Uuid,
    pub content: Vec<TermsSection>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WhatWeDo {
    pub id: Uuid,
    pub content: Localized,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_field_names_round_trip() {
        for slot in HomeSlot::ALL {
            assert_eq!(HomeSlot::from_field_name(slot.field_name()), Some(slot));
        }
        assert_eq!(HomeSlot::from_field_name("bogus"), None);
    }
}
