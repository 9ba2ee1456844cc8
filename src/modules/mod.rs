pub mod attendance;
pub mod combined;
pub mod directory;
pub mod late_uploads;
pub mod meetings;
pub mod reports;
pub mod sheets;
#[cfg(test)]
pub(crate) mod fixtures;

use chrono::NaiveDate;

use crate::error::{AppError, AppResult};

/// Case-insensitive substring match used by the name and email filters.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Blank filter values are treated as absent.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

pub(crate) fn check_date_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> AppResult<()> {
    match (start, end) {
        (Some(start), Some(end)) if end < start => Err(AppError::invalid_field(
            "end_date",
            "End date must not be before start date",
        )),
        _ => Ok(()),
    }
}
