use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct MigrateRequest {
    #[validate(length(min = 1, message = "from is required"))]
    pub from: String,
    #[validate(length(min = 1, message = "to is required"))]
    pub to: String,
}

/// A source document left out of a migration because it could not be decoded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedDocument {
    pub id: Option<String>,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MigrationReport {
    pub message: String,
    pub count: usize,
    pub skipped: Vec<SkippedDocument>,
}

impl MigrationReport {
    pub fn new(count: usize, skipped: Vec<SkippedDocument>) -> Self {
        let message = match (count, skipped.is_empty()) {
            (0, true) => "No students to migrate",
            (0, false) => "No students migrated",
            (_, true) => "Migration successful",
            (_, false) => "Migration completed with skipped students",
        };
        Self {
            message: message.to_string(),
            count,
            skipped,
        }
    }
}
