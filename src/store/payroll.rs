//! Payroll record store.

use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{PayrollRecord, PayrollStatus};

use super::{read_lock, write_lock};

const STORE: &str = "payroll";

/// Optional criteria for listing payroll records.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PayrollFilter {
    /// Only records for this employee.
    #[serde(default)]
    pub employee_id: Option<String>,
    /// Only records for this year.
    #[serde(default)]
    pub year: Option<i32>,
    /// Only records for this month.
    #[serde(default)]
    pub month: Option<u32>,
    /// Only records in this state.
    #[serde(default)]
    pub status: Option<PayrollStatus>,
}

impl PayrollFilter {
    fn matches(&self, record: &PayrollRecord) -> bool {
        self.employee_id
            .as_deref()
            .is_none_or(|id| record.employee_id == id)
            && self.year.is_none_or(|y| record.year == y)
            && self.month.is_none_or(|m| record.month == m)
            && self.status.is_none_or(|s| record.status == s)
    }
}

/// Holds payroll records, at most one per employee and month.
#[derive(Debug, Default)]
pub struct PayrollStore {
    records: RwLock<HashMap<Uuid, PayrollRecord>>,
}

impl PayrollStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a new record.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::DuplicatePayroll`] if the employee already has a
    /// record for the same year and month.
    pub fn insert(&self, record: PayrollRecord) -> EngineResult<PayrollRecord> {
        let mut records = write_lock(&self.records, STORE)?;
        let duplicate = records.values().any(|r| {
            r.employee_id == record.employee_id && r.year == record.year && r.month == record.month
        });
        if duplicate {
            return Err(EngineError::DuplicatePayroll {
                employee_id: record.employee_id,
                year: record.year,
                month: record.month,
            });
        }
        records.insert(record.id, record.clone());
        Ok(record)
    }

    /// Fetches a record by id.
    pub fn get(&self, payroll_id: Uuid) -> EngineResult<PayrollRecord> {
        read_lock(&self.records, STORE)?
            .get(&payroll_id)
            .cloned()
            .ok_or(EngineError::PayrollNotFound { payroll_id })
    }

    /// Lists matching records, oldest period first.
    pub fn list(&self, filter: &PayrollFilter) -> EngineResult<Vec<PayrollRecord>> {
        let mut records: Vec<PayrollRecord> = read_lock(&self.records, STORE)?
            .values()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        records.sort_by(|a, b| {
            (a.year, a.month, &a.employee_id, a.created_at).cmp(&(
                b.year,
                b.month,
                &b.employee_id,
                b.created_at,
            ))
        });
        Ok(records)
    }

    /// Applies a change to a record. The stored record is only replaced when
    /// the change succeeds.
    pub fn update<F>(&self, payroll_id: Uuid, change: F) -> EngineResult<PayrollRecord>
    where
        F: FnOnce(&mut PayrollRecord) -> EngineResult<()>,
    {
        let mut records = write_lock(&self.records, STORE)?;
        let stored = records
            .get_mut(&payroll_id)
            .ok_or(EngineError::PayrollNotFound { payroll_id })?;

        let mut updated = stored.clone();
        change(&mut updated)?;
        *stored = updated.clone();
        Ok(updated)
    }

    /// Moves a record to `PAID`.
    pub fn mark_paid(&self, payroll_id: Uuid) -> EngineResult<PayrollRecord> {
        self.update(payroll_id, PayrollRecord::mark_paid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::{IrpsTable, NegativeAmountPolicy, PayrollInputs, calculate_net_salary};
    use crate::models::{PayrollBreakdown, PayrollSubmission};
    use rust_decimal::Decimal;

    fn breakdown() -> PayrollBreakdown {
        calculate_net_salary(
            &PayrollInputs {
                base_salary: Decimal::new(15000, 0),
                bonus: Decimal::ZERO,
                manual_deductions: Decimal::ZERO,
                working_days: 22,
                absences: 0,
            },
            &IrpsTable::statutory(),
            NegativeAmountPolicy::PassThrough,
        )
        .unwrap()
    }

    fn record(employee_id: &str, year: i32, month: u32) -> PayrollRecord {
        let submission = PayrollSubmission {
            employee_id: employee_id.to_string(),
            month,
            year,
            bonuses: Decimal::ZERO,
            deductions: Decimal::ZERO,
            working_days: None,
        }
        .validate(22)
        .unwrap();
        PayrollRecord::new(&submission, &breakdown())
    }

    #[test]
    fn test_insert_and_get() {
        let store = PayrollStore::new();
        let inserted = store.insert(record("emp_001", 2025, 3)).unwrap();
        assert_eq!(store.get(inserted.id).unwrap(), inserted);
    }

    #[test]
    fn test_duplicate_period_rejected() {
        let store = PayrollStore::new();
        store.insert(record("emp_001", 2025, 3)).unwrap();

        assert!(matches!(
            store.insert(record("emp_001", 2025, 3)),
            Err(EngineError::DuplicatePayroll { .. })
        ));
        assert!(store.insert(record("emp_001", 2025, 4)).is_ok());
        assert!(store.insert(record("emp_002", 2025, 3)).is_ok());
    }

    #[test]
    fn test_get_unknown_record() {
        let store = PayrollStore::new();
        assert!(matches!(
            store.get(Uuid::new_v4()),
            Err(EngineError::PayrollNotFound { .. })
        ));
    }

    #[test]
    fn test_list_filters_and_orders() {
        let store = PayrollStore::new();
        store.insert(record("emp_002", 2025, 2)).unwrap();
        store.insert(record("emp_001", 2025, 3)).unwrap();
        let paid = store.insert(record("emp_001", 2025, 1)).unwrap();
        store.mark_paid(paid.id).unwrap();

        let all = store.list(&PayrollFilter::default()).unwrap();
        let months: Vec<u32> = all.iter().map(|r| r.month).collect();
        assert_eq!(months, vec![1, 2, 3]);

        let emp_001 = PayrollFilter {
            employee_id: Some("emp_001".to_string()),
            ..Default::default()
        };
        assert_eq!(store.list(&emp_001).unwrap().len(), 2);

        let pending = PayrollFilter {
            status: Some(PayrollStatus::Pending),
            ..Default::default()
        };
        assert_eq!(store.list(&pending).unwrap().len(), 2);

        let march = PayrollFilter {
            year: Some(2025),
            month: Some(3),
            ..Default::default()
        };
        assert_eq!(store.list(&march).unwrap()[0].employee_id, "emp_001");
    }

    #[test]
    fn test_mark_paid_twice_fails_and_leaves_record() {
        let store = PayrollStore::new();
        let inserted = store.insert(record("emp_001", 2025, 3)).unwrap();

        let paid = store.mark_paid(inserted.id).unwrap();
        assert_eq!(paid.status, PayrollStatus::Paid);

        assert!(matches!(
            store.mark_paid(inserted.id),
            Err(EngineError::PayrollAlreadyPaid { .. })
        ));
        assert_eq!(store.get(inserted.id).unwrap().paid_at, paid.paid_at);
    }

    #[test]
    fn test_failed_update_does_not_change_record() {
        let store = PayrollStore::new();
        let inserted = store.insert(record("emp_001", 2025, 3)).unwrap();

        let result = store.update(inserted.id, |r| {
            r.bonuses = Decimal::new(999, 0);
            Err(EngineError::validation("bonuses", "rejected"))
        });

        assert!(result.is_err());
        assert_eq!(store.get(inserted.id).unwrap().bonuses, Decimal::ZERO);
    }
}
