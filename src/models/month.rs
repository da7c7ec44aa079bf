use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Name of the registry collection listing known monthly collections.
pub const MONTHS_COLLECTION: &str = "months";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthEntry {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub month: String,
    pub year: i32,
    pub collection_name: String,
    pub created_at: bson::DateTime,
}

impl MonthEntry {
    pub fn new(raw_month: &str, year: i32) -> Self {
        let month = normalize_month_name(raw_month);
        let collection_name = collection_name(&month, year);
        Self {
            id: Some(ObjectId::new()),
            month,
            year,
            collection_name,
            created_at: bson::DateTime::now(),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateMonthRequest {
    #[validate(length(min = 1, message = "month is required"))]
    pub month: String,
    #[validate(range(min = 1, message = "year is required"))]
    pub year: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthResponse {
    pub id: Option<String>,
    pub month: String,
    pub year: i32,
    pub collection_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<MonthEntry> for MonthResponse {
    fn from(e: MonthEntry) -> Self {
        Self {
            id: e.id.map(|id| id.to_hex()),
            month: e.month,
            year: e.year,
            collection_name: e.collection_name,
            created_at: e.created_at.to_chrono(),
        }
    }
}

/// Lower-cases the name and upper-cases its first character only,
/// so "new year" becomes "New year".
pub fn normalize_month_name(raw: &str) -> String {
    let lower = raw.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn collection_name(month: &str, year: i32) -> String {
    format!("{month}-{year}")
}
