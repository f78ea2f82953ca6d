//! Car listing model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::image::StoredImage;
use super::Localized;

/// Car condition; the two values the showroom sells under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Condition {
    #[serde(rename = "Brand New")]
    BrandNew,
    #[serde(rename = "Elite Approved")]
    EliteApproved,
}

impl Condition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::BrandNew => "Brand New",
            Condition::EliteApproved => "Elite Approved",
        }
    }
}

impl std::str::FromStr for Condition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Brand New" => Ok(Condition::BrandNew),
            "Elite Approved" => Ok(Condition::EliteApproved),
            other => Err(format!("Unknown condition: {}", other)),
        }
    }
}

/// The make a car belongs to, populated onto responses.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MakeRef {
    pub id: Uuid,
    pub name: String,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    pub id: Uuid,
    pub make: MakeRef,
    pub model: Localized,
    pub name: Localized,
    pub year: i32,
    pub condition: Condition,
    pub mileage: i64,
    pub stock_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exterior_color: Option<Localized>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interior_color: Option<Localized>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine: Option<Localized>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bhp: Option<Localized>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doors: Option<i32>,
    pub warranty: bool,
    pub price: f64,
    pub images: Vec<StoredImage>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for inserting or updating a car, sans images (those are merged by
/// the association service after the upload pipeline runs).
#[derive(Clone, Debug)]
pub struct CarDraft {
    pub make_id: Uuid,
    pub model: Localized,
    pub name: Localized,
    pub year: i32,
    pub condition: Condition,
    pub mileage: i64,
    pub stock_number: String,
    pub exterior_color: Option<Localized>,
    pub interior_color: Option<Localized>,
    pub engine: Option<Localized>,
    pub bhp: Option<Localized>,
    pub doors: Option<i32>,
    pub warranty: bool,
    pub price: f64,
}

/// Optional filters for the car list endpoint.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CarFilter {
    pub make: Option<Uuid>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub condition: Option<Condition>,
}
