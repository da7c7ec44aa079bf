use bson::{doc, oid::ObjectId, Document};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A student document as stored in a monthly collection.
///
/// Stored keys keep the lower-cased layout already present in existing
/// collections (`fathername`, `seatnumber`, ...). Missing keys decode to
/// their zero value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub aadhaar: String,
    #[serde(default)]
    pub photo: String,
    #[serde(rename = "aadhaarphoto", default)]
    pub aadhaar_photo: String,
    #[serde(rename = "fathername", default)]
    pub father_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(rename = "registerdate", default)]
    pub register_date: String,
    #[serde(rename = "seatnumber", default)]
    pub seat_number: i64,
    #[serde(rename = "amountpaid", default)]
    pub amount_paid: bool,
    #[serde(rename = "isactive", default)]
    pub is_active: bool,
}

impl Student {
    /// Re-issue this record for another month: fresh identity and
    /// registration date, payment reset.
    pub fn reissued(mut self, register_date: &str) -> Self {
        self.id = ObjectId::new();
        self.register_date = register_date.to_string();
        self.amount_paid = false;
        self
    }
}

/// Request body for creating or replacing a student.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct StudentPayload {
    #[serde(default)]
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "phone is required"))]
    pub phone: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "aadhaar is required"))]
    pub aadhaar: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "photo is required"))]
    pub photo: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "aadhaar_photo is required"))]
    pub aadhaar_photo: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "father_name is required"))]
    pub father_name: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "address is required"))]
    pub address: String,
    /// Ignored on create; on replace it overwrites the stored date only when present.
    pub register_date: Option<String>,
    #[serde(default)]
    pub seat_number: i64,
    #[serde(default)]
    pub amount_paid: bool,
    /// Active when omitted on create; left unchanged when omitted on replace.
    pub is_active: Option<bool>,
}

impl StudentPayload {
    pub fn into_student(self, id: ObjectId, register_date: String) -> Student {
        Student {
            id,
            name: self.name,
            phone: self.phone,
            aadhaar: self.aadhaar,
            photo: self.photo,
            aadhaar_photo: self.aadhaar_photo,
            father_name: self.father_name,
            address: self.address,
            register_date,
            seat_number: self.seat_number,
            amount_paid: self.amount_paid,
            is_active: self.is_active.unwrap_or(true),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PaymentRequest {
    pub amount_paid: bool,
}

#[derive(Debug, Deserialize)]
pub struct SeatRequest {
    pub seat_number: i64,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// Which students of a collection to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudentFilter {
    All,
    /// Case-insensitive substring match on name, phone or aadhaar.
    Search(String),
}

impl StudentFilter {
    pub fn matches(&self, student: &Student) -> bool {
        match self {
            StudentFilter::All => true,
            StudentFilter::Search(q) => {
                let q = q.to_lowercase();
                [&student.name, &student.phone, &student.aadhaar]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&q))
            }
        }
    }
}

/// A mutation applied to one student document.
#[derive(Debug, Clone)]
pub enum StudentUpdate {
    Replace(StudentPayload),
    AmountPaid(bool),
    SeatNumber(i64),
    Deactivate,
}

impl StudentUpdate {
    /// The fields to `$set`, keyed by their stored names.
    pub fn set_document(&self) -> Document {
        match self {
            StudentUpdate::Replace(p) => {
                let mut set = doc! {
                    "name": p.name.clone(),
                    "phone": p.phone.clone(),
                    "aadhaar": p.aadhaar.clone(),
                    "photo": p.photo.clone(),
                    "aadhaarphoto": p.aadhaar_photo.clone(),
                    "fathername": p.father_name.clone(),
                    "address": p.address.clone(),
                    "seatnumber": p.seat_number,
                    "amountpaid": p.amount_paid,
                };
                if let Some(date) = &p.register_date {
                    set.insert("registerdate", date.clone());
                }
                if let Some(active) = p.is_active {
                    set.insert("isactive", active);
                }
                set
            }
            StudentUpdate::AmountPaid(paid) => doc! { "amountpaid": *paid },
            StudentUpdate::SeatNumber(seat) => doc! { "seatnumber": *seat },
            StudentUpdate::Deactivate => doc! { "isactive": false },
        }
    }
}

/// JSON view of a student.
#[derive(Debug, Clone, Serialize)]
pub struct StudentResponse {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub aadhaar: String,
    pub photo: String,
    pub aadhaar_photo: String,
    pub father_name: String,
    pub address: String,
    pub register_date: String,
    pub seat_number: i64,
    pub amount_paid: bool,
    pub is_active: bool,
}

impl From<Student> for StudentResponse {
    fn from(s: Student) -> Self {
        Self {
            id: s.id.to_hex(),
            name: s.name,
            phone: s.phone,
            aadhaar: s.aadhaar,
            photo: s.photo,
            aadhaar_photo: s.aadhaar_photo,
            father_name: s.father_name,
            address: s.address,
            register_date: s.register_date,
            seat_number: s.seat_number,
            amount_paid: s.amount_paid,
            is_active: s.is_active,
        }
    }
}

/// RFC 3339 timestamp at second precision, used for `register_date`.
pub fn registration_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}
