use chrono::NaiveDateTime;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::auth::CallerContext;
use crate::db::models::{AttendanceRecord, NewAttendance, RecordQuery};
use crate::db::repositories::AttendanceRepository;
use crate::db::{DocumentStore, Filter};
use crate::error::{AppError, AppResult};
use crate::modules::check_date_range;
use crate::policy::{scope_for, AccessScope, Listing};

pub async fn mark_attendance(
    store: &dyn DocumentStore,
    caller: &CallerContext,
    input: NewAttendance,
    now: NaiveDateTime,
) -> AppResult<AttendanceRecord> {
    caller.require_trainer()?;
    input.validate()?;
    if input.latitude.is_some() != input.longitude.is_some() {
        return Err(AppError::invalid_field(
            "location",
            "Latitude and longitude must be provided together",
        ));
    }
    let school_id = caller.require_school()?;

    let record = AttendanceRecord {
        id: Uuid::new_v4(),
        school_id,
        trainer_id: caller.id,
        class_label: input.class_label.trim().to_string(),
        timestamp: now,
        photo_url: input.photo_url.clone(),
        location: input.location(),
    };
    AttendanceRepository::create_record(store, &record).await?;

    info!(
        attendance_id = %record.id,
        trainer_id = %record.trainer_id,
        school_id = %record.school_id,
        "Attendance marked"
    );
    Ok(record)
}

/// Store filter for attendance under `scope`, shared with the combined view.
pub(crate) fn attendance_filter(scope: &AccessScope, query: &RecordQuery) -> Filter {
    let filter = Filter::new().within_days("timestamp", query.start_date, query.end_date);
    scope.narrow(filter, "trainer_id", query.trainer_id, query.school_id)
}

/// Newest first.
pub async fn list_attendance(
    store: &dyn DocumentStore,
    caller: &CallerContext,
    query: &RecordQuery,
) -> AppResult<Vec<AttendanceRecord>> {
    check_date_range(query.start_date, query.end_date)?;
    let scope = scope_for(caller, Listing::Attendance)?;

    let mut records = AttendanceRepository::list(store, &attendance_filter(&scope, query)).await?;
    records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then_with(|| a.id.cmp(&b.id)));
    Ok(records)
}
