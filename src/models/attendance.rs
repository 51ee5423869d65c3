//! Attendance records.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// How an employee spent a working day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    /// Worked the day.
    Present,
    /// Did not come in and was not on leave.
    Absent,
    /// Came in late; still paid.
    Late,
    /// On approved vacation or leave; paid.
    Leave,
}

/// One employee's attendance on one day.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{AttendanceRecord, AttendanceStatus};
/// use chrono::NaiveDate;
///
/// let record = AttendanceRecord {
///     employee_id: "emp_001".to_string(),
///     date: NaiveDate::from_ymd_opt(2025, 3, 4).unwrap(),
///     status: AttendanceStatus::Absent,
/// };
/// assert!(record.is_unpaid_absence());
/// assert!(record.falls_in(2025, 3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// The employee the record belongs to.
    pub employee_id: String,
    /// The day recorded.
    pub date: NaiveDate,
    /// What happened that day.
    pub status: AttendanceStatus,
}

impl AttendanceRecord {
    /// Returns true if this day reduces the employee's bonus.
    pub fn is_unpaid_absence(&self) -> bool {
        self.status == AttendanceStatus::Absent
    }

    /// Returns true if the record's date is in the given year and month.
    pub fn falls_in(&self, year: i32, month: u32) -> bool {
        self.date.year() == year && self.date.month() == month
    }
}
