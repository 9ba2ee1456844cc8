use chrono::NaiveDateTime;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::auth::CallerContext;
use crate::db::models::{DailyReport, NewDailyReport, RecordQuery, ReportType, UserRole};
use crate::db::repositories::ReportRepository;
use crate::db::{DocumentStore, Filter};
use crate::error::{AppError, AppResult};
use crate::modules::{check_date_range, non_blank};
use crate::policy::{scope_for, AccessScope, Listing};

pub async fn file_report(
    store: &dyn DocumentStore,
    caller: &CallerContext,
    input: NewDailyReport,
    now: NaiveDateTime,
) -> AppResult<DailyReport> {
    let (school_id, class_label) = match input.report_type {
        ReportType::TrainerClass => {
            caller.require_trainer()?;
            input.validate()?;
            let class_label = non_blank(input.class_label.as_deref())
                .ok_or_else(|| {
                    AppError::invalid_field("class_label", "Class is required for class reports")
                })?
                .to_string();
            (Some(caller.require_school()?), Some(class_label))
        }
        ReportType::TeacherTraining => {
            if !matches!(caller.role, UserRole::Teacher) && !caller.role.is_trainer() {
                return Err(AppError::Authorization(
                    "Only teachers and trainers can file training reports".to_string(),
                ));
            }
            input.validate()?;
            (
                caller.school_id,
                non_blank(input.class_label.as_deref()).map(str::to_string),
            )
        }
    };

    let report = DailyReport {
        id: Uuid::new_v4(),
        report_type: input.report_type,
        school_id,
        author_id: caller.id,
        class_label,
        topics: input.topics,
        summary: input.summary,
        notes: input.notes.filter(|n| !n.trim().is_empty()),
        timestamp: now,
    };
    ReportRepository::create_report(store, &report).await?;

    info!(
        report_id = %report.id,
        author_id = %report.author_id,
        report_type = ?report.report_type,
        "Daily report filed"
    );
    Ok(report)
}

/// Store filter for reports under `scope`, shared with the combined view.
pub(crate) fn report_filter(scope: &AccessScope, query: &RecordQuery) -> Filter {
    let filter = Filter::new().within_days("timestamp", query.start_date, query.end_date);
    scope.narrow(filter, "author_id", query.trainer_id, query.school_id)
}

/// Newest first.
pub async fn list_reports(
    store: &dyn DocumentStore,
    caller: &CallerContext,
    query: &RecordQuery,
) -> AppResult<Vec<DailyReport>> {
    check_date_range(query.start_date, query.end_date)?;
    let scope = scope_for(caller, Listing::DailyReports)?;

    let mut reports = ReportRepository::list(store, &report_filter(&scope, query)).await?;
    reports.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then_with(|| a.id.cmp(&b.id)));
    Ok(reports)
}
