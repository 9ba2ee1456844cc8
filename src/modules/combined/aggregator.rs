//! Merges attendance marks and daily reports into one row per
//! (calendar day, trainer, school).
//!
//! The merge is a pure function of its inputs; the order in which the store
//! returned them does not affect the result.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

use crate::db::models::{AttendanceRecord, DailyReport, School, User};
use crate::modules::{contains_ignore_case, non_blank};

/// Display names for enrichment, built from full user and school listings.
#[derive(Debug, Default)]
pub struct Directory {
    users: HashMap<Uuid, User>,
    schools: HashMap<Uuid, School>,
}

impl Directory {
    pub fn new(users: Vec<User>, schools: Vec<School>) -> Self {
        Self {
            users: users.into_iter().map(|u| (u.id, u)).collect(),
            schools: schools.into_iter().map(|s| (s.id, s)).collect(),
        }
    }

    pub fn user(&self, id: Uuid) -> Option<&User> {
        self.users.get(&id)
    }

    pub fn school_name(&self, id: Option<Uuid>) -> Option<&str> {
        id.and_then(|id| self.schools.get(&id)).map(|s| s.name.as_str())
    }
}

#[derive(Debug, Clone, Default)]
pub struct NameFilters {
    pub trainer_name: Option<String>,
    pub trainer_email: Option<String>,
}

impl NameFilters {
    fn accepts(&self, trainer: Option<&User>) -> bool {
        let name_ok = non_blank(self.trainer_name.as_deref())
            .map_or(true, |needle| trainer.is_some_and(|u| contains_ignore_case(&u.name, needle)));
        let email_ok = non_blank(self.trainer_email.as_deref())
            .map_or(true, |needle| trainer.is_some_and(|u| contains_ignore_case(&u.email, needle)));
        name_ok && email_ok
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinedRecord {
    pub key: String,
    pub date: NaiveDate,
    pub trainer_id: Uuid,
    pub trainer_name: Option<String>,
    pub trainer_email: Option<String>,
    pub school_id: Option<Uuid>,
    pub school_name: Option<String>,
    pub attendance: Option<AttendanceRecord>,
    pub reports: Vec<DailyReport>,
    /// Attendance time if present, otherwise the earliest report time.
    pub representative_at: NaiveDateTime,
}

/// `day_trainer_school`; an absent school renders as an empty segment.
pub fn record_key(date: NaiveDate, trainer_id: Uuid, school_id: Option<Uuid>) -> String {
    let school = school_id.map(|id| id.to_string()).unwrap_or_default();
    format!("{}_{}_{}", date.format("%Y-%m-%d"), trainer_id, school)
}

struct Row {
    date: NaiveDate,
    trainer_id: Uuid,
    school_id: Option<Uuid>,
    attendance: Option<AttendanceRecord>,
    reports: Vec<DailyReport>,
}

impl Row {
    fn new(date: NaiveDate, trainer_id: Uuid, school_id: Option<Uuid>) -> Self {
        Self {
            date,
            trainer_id,
            school_id,
            attendance: None,
            reports: Vec::new(),
        }
    }
}

pub fn aggregate(
    mut attendance: Vec<AttendanceRecord>,
    mut reports: Vec<DailyReport>,
    directory: &Directory,
    filters: &NameFilters,
) -> Vec<CombinedRecord> {
    attendance.retain(|a| filters.accepts(directory.user(a.trainer_id)));
    reports.retain(|r| filters.accepts(directory.user(r.author_id)));

    // Earliest first, so the first attendance seen for a key wins.
    attendance.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then_with(|| a.id.cmp(&b.id)));
    reports.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then_with(|| a.id.cmp(&b.id)));

    let mut rows: BTreeMap<String, Row> = BTreeMap::new();
    for record in attendance {
        let date = record.timestamp.date();
        let school_id = Some(record.school_id);
        let row = rows
            .entry(record_key(date, record.trainer_id, school_id))
            .or_insert_with(|| Row::new(date, record.trainer_id, school_id));
        if row.attendance.is_none() {
            row.attendance = Some(record);
        }
    }
    for report in reports {
        let date = report.timestamp.date();
        rows.entry(record_key(date, report.author_id, report.school_id))
            .or_insert_with(|| Row::new(date, report.author_id, report.school_id))
            .reports
            .push(report);
    }

    let mut combined: Vec<CombinedRecord> = rows
        .into_iter()
        .filter_map(|(key, row)| {
            let representative_at = row
                .attendance
                .as_ref()
                .map(|a| a.timestamp)
                .or_else(|| row.reports.first().map(|r| r.timestamp))?;
            let trainer = directory.user(row.trainer_id);
            Some(CombinedRecord {
                key,
                date: row.date,
                trainer_id: row.trainer_id,
                trainer_name: trainer.map(|u| u.name.clone()),
                trainer_email: trainer.map(|u| u.email.clone()),
                school_id: row.school_id,
                school_name: directory.school_name(row.school_id).map(str::to_string),
                attendance: row.attendance,
                reports: row.reports,
                representative_at,
            })
        })
        .collect();

    combined.sort_by(|a, b| {
        b.representative_at
            .cmp(&a.representative_at)
            .then_with(|| a.key.cmp(&b.key))
    });
    combined
}
