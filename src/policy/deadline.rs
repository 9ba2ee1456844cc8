use chrono::{Datelike, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Shape every reporting month must have before it is parsed.
pub static MONTH_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}$").expect("month pattern is a valid regex"));

pub const DEFAULT_DEADLINE_DAY: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid month '{0}', expected YYYY-MM")]
pub struct InvalidMonth(pub String);

/// A validated `YYYY-MM` reporting month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReportingMonth {
    year: i32,
    month: u32,
}

impl ReportingMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, InvalidMonth> {
        if !(1..=12).contains(&month) || !(0..=9999).contains(&year) {
            return Err(InvalidMonth(format!("{year:04}-{month:02}")));
        }
        Ok(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The calendar month immediately following this one.
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl FromStr for ReportingMonth {
    type Err = InvalidMonth;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !MONTH_PATTERN.is_match(s) {
            return Err(InvalidMonth(s.to_string()));
        }
        let year = s[..4].parse::<i32>().map_err(|_| InvalidMonth(s.to_string()))?;
        let month = s[5..].parse::<u32>().map_err(|_| InvalidMonth(s.to_string()))?;
        Self::new(year, month).map_err(|_| InvalidMonth(s.to_string()))
    }
}

impl fmt::Display for ReportingMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl TryFrom<String> for ReportingMonth {
    type Error = InvalidMonth;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ReportingMonth> for String {
    fn from(month: ReportingMonth) -> Self {
        month.to_string()
    }
}

/// Monthly submission window rule.
///
/// The window for month M closes at 23:59:59.999 on `deadline_day` of the
/// month after M, in server-local time. `now == deadline` is still open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeadlinePolicy {
    deadline_day: u32,
}

impl Default for DeadlinePolicy {
    fn default() -> Self {
        Self {
            deadline_day: DEFAULT_DEADLINE_DAY,
        }
    }
}

impl DeadlinePolicy {
    /// `deadline_day` is clamped to 1..=28 so it exists in every month.
    pub fn new(deadline_day: u32) -> Self {
        Self {
            deadline_day: deadline_day.clamp(1, 28),
        }
    }

    pub fn deadline_day(&self) -> u32 {
        self.deadline_day
    }

    pub fn deadline_for(&self, month: ReportingMonth) -> Result<NaiveDateTime, InvalidMonth> {
        let next = month.next();
        NaiveDate::from_ymd_opt(next.year(), next.month(), self.deadline_day)
            .and_then(|day| day.and_hms_milli_opt(23, 59, 59, 999))
            .ok_or_else(|| InvalidMonth(month.to_string()))
    }

    pub fn is_window_open(
        &self,
        month: ReportingMonth,
        now: NaiveDateTime,
    ) -> Result<bool, InvalidMonth> {
        Ok(now <= self.deadline_for(month)?)
    }

    /// String entry point: rejects malformed months instead of deciding.
    pub fn is_submission_window_open(
        &self,
        month: &str,
        now: NaiveDateTime,
    ) -> Result<bool, InvalidMonth> {
        let month = month.parse::<ReportingMonth>()?;
        self.is_window_open(month, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32, ms: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_milli_opt(h, min, s, ms)
            .unwrap()
    }

    #[test]
    fn deadline_is_fifth_of_following_month_end_of_day() {
        let policy = DeadlinePolicy::default();
        let deadline = policy.deadline_for("2025-03".parse().unwrap()).unwrap();
        assert_eq!(deadline, at(2025, 4, 5, 23, 59, 59, 999));
    }

    #[test]
    fn december_rolls_into_next_year() {
        let policy = DeadlinePolicy::default();
        let deadline = policy.deadline_for("2024-12".parse().unwrap()).unwrap();
        assert_eq!(deadline, at(2025, 1, 5, 23, 59, 59, 999));
    }

    #[test]
    fn window_open_up_to_and_including_deadline() {
        let policy = DeadlinePolicy::default();
        let deadline = at(2025, 4, 5, 23, 59, 59, 999);

        assert!(policy.is_submission_window_open("2025-03", deadline).unwrap());
        assert!(policy
            .is_submission_window_open("2025-03", at(2025, 3, 12, 10, 0, 0, 0))
            .unwrap());
        assert!(!policy
            .is_submission_window_open("2025-03", deadline + Duration::milliseconds(1))
            .unwrap());
    }

    #[test]
    fn scenario_sixth_of_april_is_closed_for_march() {
        let policy = DeadlinePolicy::default();
        let now = at(2025, 4, 6, 0, 0, 0, 0);
        assert!(!policy.is_submission_window_open("2025-03", now).unwrap());
        assert!(policy.is_submission_window_open("2025-04", now).unwrap());
    }

    #[test]
    fn malformed_months_are_rejected() {
        let policy = DeadlinePolicy::default();
        let now = at(2025, 4, 6, 0, 0, 0, 0);
        for bad in ["2025-3", "25-03", "2025/03", "2025-13", "2025-00", " 2025-03", ""] {
            assert_eq!(
                policy.is_submission_window_open(bad, now),
                Err(InvalidMonth(bad.to_string())),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn custom_deadline_day_is_clamped() {
        assert_eq!(DeadlinePolicy::new(0).deadline_day(), 1);
        assert_eq!(DeadlinePolicy::new(31).deadline_day(), 28);

        let policy = DeadlinePolicy::new(10);
        let deadline = policy.deadline_for("2025-01".parse().unwrap()).unwrap();
        assert_eq!(deadline, at(2025, 2, 10, 23, 59, 59, 999));
    }

    #[test]
    fn reporting_month_round_trips_through_display() {
        let month: ReportingMonth = "2026-09".parse().unwrap();
        assert_eq!(month.year(), 2026);
        assert_eq!(month.month(), 9);
        assert_eq!(month.to_string(), "2026-09");
        assert_eq!(month.next().to_string(), "2026-10");
    }
}
