//! Attendance store and absence lookup.

use std::collections::BTreeSet;
use std::sync::RwLock;

use crate::error::{EngineResult, FetchError};
use crate::models::AttendanceRecord;

use super::{read_lock, write_lock};

const STORE: &str = "attendance";

/// Supplies the number of unpaid absences for an employee and month.
///
/// Payroll calculation depends on this figure, so implementations report
/// failures instead of guessing.
pub trait AbsenceSource: Send + Sync {
    /// Counts the distinct unpaid absence days in `year`-`month`.
    fn absences_in_month(&self, employee_id: &str, year: i32, month: u32)
    -> Result<u32, FetchError>;
}

/// Attendance records kept in memory, one per employee and day.
#[derive(Debug, Default)]
pub struct AttendanceStore {
    records: RwLock<Vec<AttendanceRecord>>,
}

impl AttendanceStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records attendance, replacing any earlier record for the same day.
    pub fn record(&self, record: AttendanceRecord) -> EngineResult<AttendanceRecord> {
        let mut records = write_lock(&self.records, STORE)?;
        records.retain(|r| !(r.employee_id == record.employee_id && r.date == record.date));
        records.push(record.clone());
        Ok(record)
    }

    /// Lists an employee's records for a month in date order.
    pub fn records_for(
        &self,
        employee_id: &str,
        year: i32,
        month: u32,
    ) -> EngineResult<Vec<AttendanceRecord>> {
        let mut records: Vec<AttendanceRecord> = read_lock(&self.records, STORE)?
            .iter()
            .filter(|r| r.employee_id == employee_id && r.falls_in(year, month))
            .cloned()
            .collect();
        records.sort_by_key(|r| r.date);
        Ok(records)
    }
}

impl AbsenceSource for AttendanceStore {
    fn absences_in_month(
        &self,
        employee_id: &str,
        year: i32,
        month: u32,
    ) -> Result<u32, FetchError> {
        if !(1..=12).contains(&month) {
            return Err(FetchError::InvalidPeriod { year, month });
        }

        let records = self.records.read().map_err(|_| FetchError::Unavailable {
            reason: "attendance store lock poisoned".to_string(),
        })?;

        let days: BTreeSet<_> = records
            .iter()
            .filter(|r| r.employee_id == employee_id && r.falls_in(year, month))
            .filter(|r| r.is_unpaid_absence())
            .map(|r| r.date)
            .collect();

        Ok(days.len() as u32)
    }
}
