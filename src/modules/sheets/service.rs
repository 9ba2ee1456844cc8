use chrono::NaiveDateTime;
use tracing::info;
use uuid::Uuid;

use crate::auth::CallerContext;
use crate::db::models::{
    LateUploadStatus, NewUploadedSheet, UploadStatus, UploadedSheet, UploadedSheetQuery,
};
use crate::db::repositories::{LateUploadRepository, SheetRepository};
use crate::db::{DocumentStore, Filter};
use crate::error::{AppError, AppResult, RuleCode};
use crate::modules::late_uploads::service::{school_name, validated_month};
use crate::modules::{contains_ignore_case, non_blank};
use crate::policy::{scope_for, DeadlinePolicy, Listing, ReportingMonth};

/// Registers a signed monthly sheet. After the deadline an approved late
/// request for the same month is required.
pub async fn register_sheet(
    store: &dyn DocumentStore,
    deadlines: &DeadlinePolicy,
    caller: &CallerContext,
    input: NewUploadedSheet,
    now: NaiveDateTime,
) -> AppResult<UploadedSheet> {
    caller.require_trainer()?;
    let month = validated_month(&input, &input.month, input.year)?;
    let school_id = caller.require_school()?;

    let late_request_id = if deadlines.is_window_open(month, now)? {
        None
    } else {
        let approved = LateUploadRepository::find_for_month(
            store,
            caller.id,
            &month.to_string(),
            month.year(),
        )
        .await?
        .into_iter()
        .find(|r| r.status == LateUploadStatus::Approved);
        match approved {
            Some(request) => Some(request.id),
            None => {
                return Err(AppError::rule(
                    RuleCode::DeadlinePassed,
                    "The deadline for this month has passed. File a late upload request first.",
                ))
            }
        }
    };

    let sheet = UploadedSheet {
        id: Uuid::new_v4(),
        trainer_id: caller.id,
        trainer_name: caller.name.clone(),
        trainer_email: caller.email.clone(),
        school_id,
        school_name: school_name(store, school_id).await?,
        month: month.to_string(),
        year: month.year(),
        file_url: input.file_url,
        file_name: input.file_name,
        file_size: input.file_size,
        uploaded_at: now,
        late_request_id,
    };
    SheetRepository::create_sheet(store, &sheet).await?;

    info!(
        sheet_id = %sheet.id,
        trainer_id = %sheet.trainer_id,
        month = %sheet.month,
        late = sheet.late_request_id.is_some(),
        "Monthly sheet registered"
    );
    Ok(sheet)
}

pub async fn upload_status(
    store: &dyn DocumentStore,
    deadlines: &DeadlinePolicy,
    caller: &CallerContext,
    month: &str,
    now: NaiveDateTime,
) -> AppResult<UploadStatus> {
    caller.require_trainer()?;
    let month = month.parse::<ReportingMonth>()?;
    let deadline = deadlines.deadline_for(month)?;
    let window_open = now <= deadline;

    let requests =
        LateUploadRepository::find_for_month(store, caller.id, &month.to_string(), month.year())
            .await?;
    let approved = requests
        .iter()
        .any(|r| r.status == LateUploadStatus::Approved);
    let late_request_status = requests
        .iter()
        .max_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)))
        .map(|r| r.status);

    Ok(UploadStatus {
        month: month.to_string(),
        deadline,
        window_open,
        late_request_status,
        can_upload: window_open || approved,
    })
}

pub async fn list_sheets(
    store: &dyn DocumentStore,
    caller: &CallerContext,
    query: &UploadedSheetQuery,
) -> AppResult<Vec<UploadedSheet>> {
    let scope = scope_for(caller, Listing::UploadedSheets)?;

    let month = non_blank(query.month.as_deref())
        .map(str::parse::<ReportingMonth>)
        .transpose()?;
    let filter = Filter::new().eq_opt("month", month.map(|m| m.to_string()));
    let filter = scope.narrow(filter, "trainer_id", None, query.school_id);

    let mut sheets = SheetRepository::list(store, &filter).await?;
    if let Some(needle) = non_blank(query.trainer_name.as_deref()) {
        sheets.retain(|s| contains_ignore_case(&s.trainer_name, needle));
    }
    sheets.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at).then_with(|| a.id.cmp(&b.id)));
    Ok(sheets)
}
