use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Status value the API uses for punctual check-ins.
pub const ON_TIME: &str = "On Time";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "employeeId")]
    pub employee: EmployeeRef,
    #[serde(default, deserialize_with = "super::nullable_string")]
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_in_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_out_time: Option<String>,
    #[serde(default, deserialize_with = "super::nullable_string")]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orphanage_location: Option<String>,
}

/// Populated employee reference embedded in an attendance record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRef {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "super::nullable_string")]
    pub name: String,
    #[serde(default, deserialize_with = "super::nullable_string")]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

impl AttendanceRecord {
    pub fn is_on_time(&self) -> bool {
        self.status == ON_TIME
    }

    pub fn check_in_display(&self) -> String {
        format_clock(self.check_in_time.as_deref())
    }

    pub fn check_out_display(&self) -> String {
        format_clock(self.check_out_time.as_deref())
    }
}

/// Local `HH:MM`, or `--` when the time is missing (not yet checked out).
fn format_clock(raw: Option<&str>) -> String {
    match raw {
        Some(raw) => match DateTime::parse_from_rfc3339(raw) {
            Ok(ts) => ts.with_timezone(&Local).format("%H:%M").to_string(),
            Err(_) => raw.to_string(),
        },
        None => "--".to_string(),
    }
}

/// Attendance records sharing one calendar date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceDay {
    pub date: Option<NaiveDate>,
    /// Short heading such as `Oct 16`; the raw date text when it does not parse.
    pub label: String,
    pub records: Vec<AttendanceRecord>,
}

/// Group records by calendar date.
///
/// Groups appear in the order their first record appears, and records keep
/// server order within a group.
pub fn group_by_day(records: Vec<AttendanceRecord>) -> Vec<AttendanceDay> {
    let mut days: Vec<AttendanceDay> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in records {
        let date = super::parse_date(&record.date);
        let key = match date {
            Some(d) => d.to_string(),
            None => record.date.clone(),
        };

        match index.get(&key) {
            Some(&pos) => days[pos].records.push(record),
            None => {
                let label = match date {
                    Some(d) => d.format("%b %-d").to_string(),
                    None => record.date.clone(),
                };
                index.insert(key, days.len());
                days.push(AttendanceDay {
                    date,
                    label,
                    records: vec![record],
                });
            }
        }
    }

    days
}
