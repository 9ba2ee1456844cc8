use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::db::models::LateUploadStatus;
use crate::policy::deadline::MONTH_PATTERN;

/// Signed monthly combined sheet. The file itself lives in blob storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedSheet {
    pub id: Uuid,
    pub trainer_id: Uuid,
    pub trainer_name: String,
    pub trainer_email: String,
    pub school_id: Uuid,
    pub school_name: String,
    pub month: String,
    pub year: i32,
    pub file_url: String,
    pub file_name: String,
    pub file_size: u64,
    pub uploaded_at: NaiveDateTime,
    /// Set when the upload was accepted after the deadline.
    pub late_request_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewUploadedSheet {
    #[validate(regex(path = *MONTH_PATTERN, message = "Month must be in YYYY-MM format"))]
    pub month: String,
    pub year: i32,
    #[validate(length(min = 1, message = "File URL is required"))]
    pub file_url: String,
    #[validate(length(min = 1, message = "File name is required"))]
    pub file_name: String,
    #[validate(range(min = 1, message = "File must not be empty"))]
    pub file_size: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UploadedSheetQuery {
    pub month: Option<String>,
    pub school_id: Option<Uuid>,
    pub trainer_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadStatusQuery {
    pub month: String,
}

/// What the upload form needs to decide between direct upload and a late request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadStatus {
    pub month: String,
    pub deadline: NaiveDateTime,
    pub window_open: bool,
    pub late_request_status: Option<LateUploadStatus>,
    pub can_upload: bool,
}
