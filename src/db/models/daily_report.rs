use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportType {
    TeacherTraining,
    TrainerClass,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyReport {
    pub id: Uuid,
    pub report_type: ReportType,
    pub school_id: Option<Uuid>,
    pub author_id: Uuid,
    pub class_label: Option<String>,
    pub topics: String,
    pub summary: String,
    pub notes: Option<String>,
    pub timestamp: NaiveDateTime,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewDailyReport {
    pub report_type: ReportType,
    pub class_label: Option<String>,
    #[validate(length(min = 1, message = "Topics are required"))]
    pub topics: String,
    #[validate(length(min = 1, message = "Summary is required"))]
    pub summary: String,
    pub notes: Option<String>,
}
