use uuid::Uuid;

use crate::auth::CallerContext;
use crate::db::models::{ReportType, UserRole};
use crate::db::Filter;
use crate::error::{AppError, AppResult};

/// Listings whose rows are narrowed by caller role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    Attendance,
    DailyReports,
    UploadedSheets,
    LateUploadRequests,
    CombinedRecords,
}

/// Hard restrictions derived from the caller. Caller-supplied filters never
/// widen them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccessScope {
    pub owner_id: Option<Uuid>,
    pub school_id: Option<Uuid>,
    pub report_type: Option<ReportType>,
    /// School-scoped caller with no school: sees no rows.
    pub deny_all: bool,
}

impl AccessScope {
    pub fn unrestricted() -> Self {
        Self::default()
    }

    pub fn nothing() -> Self {
        Self {
            deny_all: true,
            ..Self::default()
        }
    }

    pub fn is_unrestricted(&self) -> bool {
        *self == Self::unrestricted()
    }

    /// Adds the scope to `filter`. `owner_field` names the document field
    /// holding the owning user (`trainer_id`, `author_id`). Requested owner
    /// and school filters only apply where the scope leaves them open.
    pub fn narrow(
        &self,
        filter: Filter,
        owner_field: &str,
        requested_owner: Option<Uuid>,
        requested_school: Option<Uuid>,
    ) -> Filter {
        if self.deny_all {
            return filter.is_in("id", Vec::<Uuid>::new());
        }
        filter
            .eq_opt(owner_field, self.owner_id.or(requested_owner))
            .eq_opt("school_id", self.school_id.or(requested_school))
            .eq_opt("report_type", self.report_type)
    }
}

pub fn scope_for(caller: &CallerContext, listing: Listing) -> AppResult<AccessScope> {
    match caller.role {
        UserRole::Admin => Ok(AccessScope::unrestricted()),
        UserRole::TrainerRobochamps | UserRole::TrainerSchool => Ok(AccessScope {
            owner_id: Some(caller.id),
            school_id: caller.school_id,
            ..AccessScope::default()
        }),
        UserRole::Teacher => match listing {
            Listing::LateUploadRequests => Err(AppError::Authorization(
                "Teachers cannot view late upload requests".to_string(),
            )),
            Listing::DailyReports => Ok(AccessScope {
                owner_id: Some(caller.id),
                report_type: Some(ReportType::TeacherTraining),
                ..AccessScope::default()
            }),
            Listing::Attendance | Listing::UploadedSheets | Listing::CombinedRecords => {
                Ok(match caller.school_id {
                    Some(school_id) => AccessScope {
                        school_id: Some(school_id),
                        ..AccessScope::default()
                    },
                    None => AccessScope::nothing(),
                })
            }
        },
    }
}
