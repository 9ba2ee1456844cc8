use chrono::NaiveDateTime;
use tracing::{info, warn};
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::auth::CallerContext;
use crate::db::models::{
    DecisionRecord, LateUploadDecision, LateUploadQuery, LateUploadRequest, LateUploadStatus,
    NewLateUploadRequest,
};
use crate::db::repositories::{InsertOutcome, LateUploadRepository, SchoolRepository};
use crate::db::{DocumentStore, Filter};
use crate::error::{field_error, AppError, AppResult, RuleCode};
use crate::modules::{contains_ignore_case, non_blank};
use crate::policy::{scope_for, DeadlinePolicy, Listing, ReportingMonth};

/// Runs the input's derived checks, parses `month` and checks that `year`
/// agrees with it. Every failing field is reported together.
pub(crate) fn validated_month<T: Validate>(
    input: &T,
    month: &str,
    year: i32,
) -> AppResult<ReportingMonth> {
    let mut errors = input.validate().err().unwrap_or_else(ValidationErrors::new);

    let parsed = match month.parse::<ReportingMonth>() {
        Ok(parsed) => {
            if parsed.year() != year {
                errors.add("year", field_error("Year must match the year of the month"));
            }
            Some(parsed)
        }
        Err(err) => {
            if !errors.field_errors().contains_key("month") {
                errors.add("month", field_error(err.to_string()));
            }
            None
        }
    };

    match parsed {
        Some(parsed) if errors.is_empty() => Ok(parsed),
        _ => Err(AppError::Validation(errors)),
    }
}

pub(crate) async fn school_name(store: &dyn DocumentStore, school_id: Uuid) -> AppResult<String> {
    match SchoolRepository::get_school_by_id(store, school_id).await? {
        Some(school) => Ok(school.name),
        None => {
            warn!(school_id = %school_id, "Caller is linked to a school that does not exist");
            Ok(String::new())
        }
    }
}

/// Files a late-upload request for a month whose window has closed.
pub async fn submit_late_request(
    store: &dyn DocumentStore,
    deadlines: &DeadlinePolicy,
    caller: &CallerContext,
    input: NewLateUploadRequest,
    now: NaiveDateTime,
) -> AppResult<LateUploadRequest> {
    caller.require_trainer()?;
    let month = validated_month(&input, &input.month, input.year)?;
    let school_id = caller.require_school()?;

    if deadlines.is_window_open(month, now)? {
        return Err(AppError::rule(
            RuleCode::BeforeDeadline,
            "The submission window for this month is still open. Upload the sheet directly.",
        ));
    }

    let request = LateUploadRequest {
        id: Uuid::new_v4(),
        trainer_id: caller.id,
        trainer_name: caller.name.clone(),
        trainer_email: caller.email.clone(),
        school_id,
        school_name: school_name(store, school_id).await?,
        month: month.to_string(),
        year: month.year(),
        reason: input.reason,
        status: LateUploadStatus::Pending,
        created_at: now,
        decided_at: None,
        decided_by: None,
        decided_by_name: None,
    };

    match LateUploadRepository::insert_if_unblocked(store, request).await? {
        InsertOutcome::Inserted(request) => {
            info!(
                request_id = %request.id,
                trainer_id = %request.trainer_id,
                month = %request.month,
                "Late upload request submitted"
            );
            Ok(request)
        }
        InsertOutcome::Blocked(existing) if existing.status == LateUploadStatus::Approved => {
            Err(AppError::rule(
                RuleCode::AlreadyApproved,
                "A late upload for this month has already been approved",
            ))
        }
        InsertOutcome::Blocked(_) => Err(AppError::rule(
            RuleCode::AlreadyPending,
            "A late upload request for this month is already pending",
        )),
    }
}

/// Moves a pending request to `APPROVED` or `REJECTED`.
pub async fn decide_late_request(
    store: &dyn DocumentStore,
    caller: &CallerContext,
    id: Uuid,
    decision: LateUploadDecision,
    now: NaiveDateTime,
) -> AppResult<LateUploadRequest> {
    caller.require_admin()?;
    if decision.status == LateUploadStatus::Pending {
        return Err(AppError::invalid_field(
            "status",
            "Decision must be APPROVED or REJECTED",
        ));
    }

    let mut request = LateUploadRepository::get_by_id(store, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Late upload request not found".to_string()))?;

    if request.status.is_terminal() {
        return Err(AppError::rule(
            RuleCode::AlreadyDecided,
            "This request has already been decided",
        ));
    }

    let record = DecisionRecord {
        status: decision.status,
        decided_at: now,
        decided_by: caller.id,
        decided_by_name: caller.name.clone(),
    };
    if !LateUploadRepository::record_decision(store, id, &record).await? {
        return Err(AppError::NotFound("Late upload request not found".to_string()));
    }

    request.status = record.status;
    request.decided_at = Some(record.decided_at);
    request.decided_by = Some(record.decided_by);
    request.decided_by_name = Some(record.decided_by_name);

    info!(
        request_id = %request.id,
        status = ?request.status,
        admin_id = %caller.id,
        "Late upload request decided"
    );
    Ok(request)
}

/// Newest first. Trainers see only their own requests.
pub async fn list_late_requests(
    store: &dyn DocumentStore,
    caller: &CallerContext,
    query: &LateUploadQuery,
) -> AppResult<Vec<LateUploadRequest>> {
    let scope = scope_for(caller, Listing::LateUploadRequests)?;

    let month = non_blank(query.month.as_deref())
        .map(str::parse::<ReportingMonth>)
        .transpose()?;
    let filter = Filter::new()
        .eq_opt("status", query.status)
        .eq_opt("month", month.map(|m| m.to_string()));
    let filter = scope.narrow(filter, "trainer_id", None, query.school_id);

    let mut requests = LateUploadRepository::list(store, &filter).await?;
    if let Some(needle) = non_blank(query.trainer_name.as_deref()) {
        requests.retain(|r| contains_ignore_case(&r.trainer_name, needle));
    }
    requests.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
    Ok(requests)
}
