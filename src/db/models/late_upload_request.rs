use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::policy::deadline::MONTH_PATTERN;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LateUploadStatus {
    Pending,
    Approved,
    Rejected,
}

impl LateUploadStatus {
    /// `APPROVED` and `REJECTED` have no outgoing transitions.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, LateUploadStatus::Pending)
    }

    /// Whether an existing request in this state prevents filing another
    /// one for the same trainer and month.
    pub fn blocks_new_request(&self) -> bool {
        matches!(self, LateUploadStatus::Pending | LateUploadStatus::Approved)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LateUploadRequest {
    pub id: Uuid,
    pub trainer_id: Uuid,
    pub trainer_name: String,
    pub trainer_email: String,
    pub school_id: Uuid,
    pub school_name: String,
    pub month: String,
    pub year: i32,
    pub reason: String,
    pub status: LateUploadStatus,
    pub created_at: NaiveDateTime,
    pub decided_at: Option<NaiveDateTime>,
    pub decided_by: Option<Uuid>,
    pub decided_by_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewLateUploadRequest {
    #[validate(regex(path = *MONTH_PATTERN, message = "Month must be in YYYY-MM format"))]
    pub month: String,
    pub year: i32,
    #[validate(length(min = 10, message = "Reason must be at least 10 characters"))]
    pub reason: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LateUploadDecision {
    pub status: LateUploadStatus,
}

/// Fields written by an admin decision.
#[derive(Debug, Clone, Serialize)]
pub struct DecisionRecord {
    pub status: LateUploadStatus,
    pub decided_at: NaiveDateTime,
    pub decided_by: Uuid,
    pub decided_by_name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LateUploadQuery {
    pub status: Option<LateUploadStatus>,
    pub month: Option<String>,
    pub school_id: Option<Uuid>,
    pub trainer_name: Option<String>,
}
