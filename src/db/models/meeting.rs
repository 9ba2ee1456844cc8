use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::db::models::UserRole;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meeting {
    pub id: Uuid,
    pub title: String,
    pub url: String,
    /// `None` means the meeting is visible to every school.
    pub school_id: Option<Uuid>,
    pub scheduled_at: NaiveDateTime,
    pub created_by: Uuid,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewMeeting {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(url(message = "A valid meeting URL is required"))]
    pub url: String,
    pub school_id: Option<Uuid>,
    pub scheduled_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeetingClick {
    pub id: Uuid,
    pub meeting_id: Uuid,
    pub user_id: Uuid,
    pub user_role: UserRole,
    pub school_id: Option<Uuid>,
    pub clicked_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeetingAnalytics {
    pub meeting_id: Uuid,
    pub title: String,
    pub scheduled_at: NaiveDateTime,
    pub total_clicks: u64,
    pub unique_users: usize,
    pub last_clicked_at: Option<NaiveDateTime>,
}
