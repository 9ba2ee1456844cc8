use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: Option<f64>,
}

/// Point-in-time class attendance mark. Never updated after insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: Uuid,
    pub school_id: Uuid,
    pub trainer_id: Uuid,
    pub class_label: String,
    pub timestamp: NaiveDateTime,
    pub photo_url: String,
    pub location: Option<GeoLocation>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewAttendance {
    #[validate(length(min = 1, message = "Class is required"))]
    pub class_label: String,
    #[validate(length(min = 1, message = "Photo is required"))]
    pub photo_url: String,
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude out of range"))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0, message = "Longitude out of range"))]
    pub longitude: Option<f64>,
    #[validate(range(min = 0.0, message = "Accuracy must not be negative"))]
    pub accuracy: Option<f64>,
}

impl NewAttendance {
    pub fn location(&self) -> Option<GeoLocation> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(GeoLocation {
                latitude,
                longitude,
                accuracy: self.accuracy,
            }),
            _ => None,
        }
    }
}

/// Listing filters shared by attendance, reports and the combined view.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub school_id: Option<Uuid>,
    pub trainer_id: Option<Uuid>,
    pub trainer_name: Option<String>,
    pub trainer_email: Option<String>,
}
