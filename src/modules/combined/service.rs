use tracing::debug;

use super::aggregator::{aggregate, CombinedRecord, Directory, NameFilters};
use crate::auth::CallerContext;
use crate::db::models::RecordQuery;
use crate::db::repositories::{
    AttendanceRepository, ReportRepository, SchoolRepository, UserRepository,
};
use crate::db::DocumentStore;
use crate::error::AppResult;
use crate::modules::attendance::service::attendance_filter;
use crate::modules::check_date_range;
use crate::modules::reports::service::report_filter;
use crate::policy::{scope_for, Listing};

/// Combined attendance and report rows visible to `caller`, newest first.
///
/// Names are resolved from full user and school listings held in memory for
/// the duration of the call.
pub async fn combined_records(
    store: &dyn DocumentStore,
    caller: &CallerContext,
    query: &RecordQuery,
) -> AppResult<Vec<CombinedRecord>> {
    check_date_range(query.start_date, query.end_date)?;
    let scope = scope_for(caller, Listing::CombinedRecords)?;
    if scope.deny_all {
        return Ok(Vec::new());
    }

    let attendance = AttendanceRepository::list(store, &attendance_filter(&scope, query)).await?;
    let reports = ReportRepository::list(store, &report_filter(&scope, query)).await?;
    let directory = Directory::new(
        UserRepository::list_all(store).await?,
        SchoolRepository::list_all(store).await?,
    );

    let filters = NameFilters {
        trainer_name: query.trainer_name.clone(),
        trainer_email: query.trainer_email.clone(),
    };
    let (attendance_count, report_count) = (attendance.len(), reports.len());
    let records = aggregate(attendance, reports, &directory, &filters);

    debug!(
        caller_id = %caller.id,
        attendance = attendance_count,
        reports = report_count,
        rows = records.len(),
        "Combined records aggregated"
    );
    Ok(records)
}
