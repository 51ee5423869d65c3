//! Payroll submission and record models.
//!
//! A [`PayrollSubmission`] is the typed form posted by a client. It is
//! validated into a [`ValidatedSubmission`] before any calculation runs, and
//! the calculated [`PayrollBreakdown`] is frozen into a [`PayrollRecord`].

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculation::MAX_WORKING_DAYS;
use crate::error::{EngineError, EngineResult};

use super::{PayrollBreakdown, round_to_cents, validate_amount};

/// Lifecycle state of a payroll record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PayrollStatus {
    /// Calculated, not yet paid; may still be amended.
    Pending,
    /// Paid out; frozen.
    Paid,
}

/// A payroll entry as submitted by a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollSubmission {
    /// The employee being paid; empty when none was selected.
    #[serde(default)]
    pub employee_id: String,
    /// Pay month, 1-12.
    pub month: u32,
    /// Pay year.
    pub year: i32,
    /// Bonus before the absence adjustment.
    #[serde(default)]
    pub bonuses: Decimal,
    /// Manual deductions, excluding INSS and IRPS.
    #[serde(default)]
    pub deductions: Decimal,
    /// Working days in the month; the configured default when omitted.
    #[serde(default)]
    pub working_days: Option<u32>,
}

/// A submission whose fields have all been checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSubmission {
    /// The employee being paid.
    pub employee_id: String,
    /// Pay month, 1-12.
    pub month: u32,
    /// Pay year.
    pub year: i32,
    /// Bonus before the absence adjustment, between zero and the amount cap.
    pub bonuses: Decimal,
    /// Manual deductions, between zero and the amount cap.
    pub deductions: Decimal,
    /// Working days, 1-31.
    pub working_days: u32,
}

impl PayrollSubmission {
    /// Validates the submission.
    ///
    /// # Errors
    ///
    /// * [`EngineError::NoEmployeeSelected`] for a blank employee id.
    /// * [`EngineError::Validation`] naming the first field out of range.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::PayrollSubmission;
    /// use rust_decimal::Decimal;
    ///
    /// let submission = PayrollSubmission {
    ///     employee_id: "emp_001".to_string(),
    ///     month: 3,
    ///     year: 2025,
    ///     bonuses: Decimal::new(1000, 0),
    ///     deductions: Decimal::ZERO,
    ///     working_days: None,
    /// };
    /// let validated = submission.validate(22).unwrap();
    /// assert_eq!(validated.working_days, 22);
    /// ```
    pub fn validate(&self, default_working_days: u32) -> EngineResult<ValidatedSubmission> {
        let employee_id = self.employee_id.trim();
        if employee_id.is_empty() {
            return Err(EngineError::NoEmployeeSelected);
        }
        if !(1..=12).contains(&self.month) {
            return Err(EngineError::validation("month", "must be between 1 and 12"));
        }
        if !(1..=9999).contains(&self.year) {
            return Err(EngineError::validation("year", "must be between 1 and 9999"));
        }
        validate_amount("bonuses", self.bonuses)?;
        validate_amount("deductions", self.deductions)?;

        let working_days = self.working_days.unwrap_or(default_working_days);
        if !(1..=MAX_WORKING_DAYS).contains(&working_days) {
            return Err(EngineError::validation(
                "working_days",
                format!("must be between 1 and {}", MAX_WORKING_DAYS),
            ));
        }

        Ok(ValidatedSubmission {
            employee_id: employee_id.to_string(),
            month: self.month,
            year: self.year,
            bonuses: self.bonuses,
            deductions: self.deductions,
            working_days,
        })
    }
}

/// Changes to a pending payroll record. Omitted fields keep their value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollAmendment {
    /// New bonus.
    #[serde(default)]
    pub bonuses: Option<Decimal>,
    /// New manual deductions.
    #[serde(default)]
    pub deductions: Option<Decimal>,
    /// New working days.
    #[serde(default)]
    pub working_days: Option<u32>,
}

impl PayrollAmendment {
    /// Builds the submission that the amended record corresponds to.
    pub fn apply_to(&self, record: &PayrollRecord) -> PayrollSubmission {
        PayrollSubmission {
            employee_id: record.employee_id.clone(),
            month: record.month,
            year: record.year,
            bonuses: self.bonuses.unwrap_or(record.bonuses),
            deductions: self.deductions.unwrap_or(record.manual_deductions),
            working_days: Some(self.working_days.unwrap_or(record.working_days)),
        }
    }
}

/// A stored payroll entry for one employee and month.
///
/// Amounts are rounded to cents. `deductions` is the persisted deduction
/// total: manual deductions plus INSS plus IRPS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRecord {
    /// Unique identifier of the record.
    pub id: Uuid,
    /// The employee paid.
    pub employee_id: String,
    /// Pay month, 1-12.
    pub month: u32,
    /// Pay year.
    pub year: i32,
    /// Base salary at the time of calculation.
    pub base_salary: Decimal,
    /// Bonus before the absence adjustment.
    pub bonuses: Decimal,
    /// Manual deductions as entered.
    pub manual_deductions: Decimal,
    /// Manual deductions plus INSS plus IRPS.
    pub deductions: Decimal,
    /// Working days used for the bonus adjustment.
    pub working_days: u32,
    /// Unpaid absences found for the month.
    pub absences: u32,
    /// Bonus after the absence adjustment.
    pub adjusted_bonus: Decimal,
    /// Base salary plus adjusted bonus.
    pub gross_pay: Decimal,
    /// INSS contribution.
    pub inss: Decimal,
    /// IRPS withholding.
    pub irps: Decimal,
    /// Amount paid to the employee.
    pub net_salary: Decimal,
    /// Lifecycle state.
    pub status: PayrollStatus,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last recalculated.
    pub updated_at: DateTime<Utc>,
    /// When the record was marked paid.
    #[serde(default)]
    pub paid_at: Option<DateTime<Utc>>,
}

impl PayrollRecord {
    /// Freezes a calculated breakdown into a new pending record.
    pub fn new(submission: &ValidatedSubmission, breakdown: &PayrollBreakdown) -> Self {
        let now = Utc::now();
        let mut record = Self {
            id: Uuid::new_v4(),
            employee_id: submission.employee_id.clone(),
            month: submission.month,
            year: submission.year,
            base_salary: Decimal::ZERO,
            bonuses: Decimal::ZERO,
            manual_deductions: Decimal::ZERO,
            deductions: Decimal::ZERO,
            working_days: 0,
            absences: 0,
            adjusted_bonus: Decimal::ZERO,
            gross_pay: Decimal::ZERO,
            inss: Decimal::ZERO,
            irps: Decimal::ZERO,
            net_salary: Decimal::ZERO,
            status: PayrollStatus::Pending,
            created_at: now,
            updated_at: now,
            paid_at: None,
        };
        record.apply_breakdown(breakdown);
        record
    }

    /// Replaces the calculated figures with those of a new breakdown.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::PayrollAlreadyPaid`] if the record is paid.
    pub fn recalculate(&mut self, breakdown: &PayrollBreakdown) -> EngineResult<()> {
        self.ensure_pending()?;
        self.apply_breakdown(breakdown);
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Moves the record from `PENDING` to `PAID`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::PayrollAlreadyPaid`] if the record is paid.
    pub fn mark_paid(&mut self) -> EngineResult<()> {
        self.ensure_pending()?;
        let now = Utc::now();
        self.status = PayrollStatus::Paid;
        self.paid_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    /// Returns true once the record has been paid.
    pub fn is_paid(&self) -> bool {
        self.status == PayrollStatus::Paid
    }

    fn ensure_pending(&self) -> EngineResult<()> {
        if self.is_paid() {
            return Err(EngineError::PayrollAlreadyPaid {
                payroll_id: self.id,
            });
        }
        Ok(())
    }

    fn apply_breakdown(&mut self, breakdown: &PayrollBreakdown) {
        self.base_salary = round_to_cents(breakdown.base_salary);
        self.bonuses = round_to_cents(breakdown.bonus);
        self.manual_deductions = round_to_cents(breakdown.manual_deductions);
        self.deductions = round_to_cents(breakdown.total_deductions);
        self.working_days = breakdown.working_days;
        self.absences = breakdown.absences;
        self.adjusted_bonus = round_to_cents(breakdown.adjusted_bonus);
        self.gross_pay = round_to_cents(breakdown.gross_pay);
        self.inss = round_to_cents(breakdown.inss);
        self.irps = round_to_cents(breakdown.irps);
        self.net_salary = round_to_cents(breakdown.net_salary);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::{
        IrpsTable, NegativeAmountPolicy, PayrollInputs, calculate_net_salary,
    };
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn submission() -> PayrollSubmission {
        PayrollSubmission {
            employee_id: "emp_001".to_string(),
            month: 3,
            year: 2025,
            bonuses: dec("1000"),
            deductions: dec("500"),
            working_days: Some(22),
        }
    }

    fn reference_breakdown() -> PayrollBreakdown {
        calculate_net_salary(
            &PayrollInputs {
                base_salary: dec("20000"),
                bonus: dec("1000"),
                manual_deductions: dec("500"),
                working_days: 22,
                absences: 2,
            },
            &IrpsTable::statutory(),
            NegativeAmountPolicy::PassThrough,
        )
        .unwrap()
    }

    #[test]
    fn test_validate_accepts_well_formed_submission() {
        let validated = submission().validate(22).unwrap();
        assert_eq!(validated.employee_id, "emp_001");
        assert_eq!(validated.working_days, 22);
    }

    #[test]
    fn test_validate_trims_employee_id() {
        let mut s = submission();
        s.employee_id = "  emp_001 ".to_string();
        assert_eq!(s.validate(22).unwrap().employee_id, "emp_001");
    }

    #[test]
    fn test_validate_blank_employee() {
        let mut s = submission();
        s.employee_id = "   ".to_string();
        assert!(matches!(s.validate(22), Err(EngineError::NoEmployeeSelected)));
    }

    #[test]
    fn test_validate_month_out_of_range() {
        let mut s = submission();
        s.month = 13;
        match s.validate(22) {
            Err(EngineError::Validation { field, .. }) => assert_eq!(field, "month"),
            other => panic!("Expected month validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_negative_bonus() {
        let mut s = submission();
        s.bonuses = dec("-1");
        match s.validate(22) {
            Err(EngineError::Validation { field, .. }) => assert_eq!(field, "bonuses"),
            other => panic!("Expected bonuses validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_amounts_above_cap() {
        let mut s = submission();
        s.bonuses = Decimal::MAX;
        match s.validate(22) {
            Err(EngineError::Validation { field, .. }) => assert_eq!(field, "bonuses"),
            other => panic!("Expected bonuses validation error, got {:?}", other),
        }

        let mut s = submission();
        s.deductions = crate::models::max_amount() + Decimal::ONE;
        match s.validate(22) {
            Err(EngineError::Validation { field, .. }) => assert_eq!(field, "deductions"),
            other => panic!("Expected deductions validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_zero_working_days() {
        let mut s = submission();
        s.working_days = Some(0);
        match s.validate(22) {
            Err(EngineError::Validation { field, .. }) => assert_eq!(field, "working_days"),
            other => panic!("Expected working_days validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_uses_default_working_days() {
        let mut s = submission();
        s.working_days = None;
        assert_eq!(s.validate(21).unwrap().working_days, 21);
    }

    #[test]
    fn test_record_folds_statutory_deductions() {
        let validated = submission().validate(22).unwrap();
        let record = PayrollRecord::new(&validated, &reference_breakdown());

        assert_eq!(record.status, PayrollStatus::Pending);
        assert_eq!(record.manual_deductions, dec("500"));
        assert_eq!(record.inss, dec("627.27"));
        assert_eq!(record.irps, dec("3306.82"));
        assert_eq!(record.deductions, dec("4434.09"));
        assert_eq!(record.gross_pay, dec("20909.09"));
        assert_eq!(record.net_salary, dec("16475.00"));
        assert_eq!(record.absences, 2);
    }

    #[test]
    fn test_mark_paid_freezes_record() {
        let validated = submission().validate(22).unwrap();
        let mut record = PayrollRecord::new(&validated, &reference_breakdown());

        record.mark_paid().unwrap();
        assert!(record.is_paid());
        assert!(record.paid_at.is_some());

        assert!(matches!(
            record.mark_paid(),
            Err(EngineError::PayrollAlreadyPaid { .. })
        ));
        assert!(matches!(
            record.recalculate(&reference_breakdown()),
            Err(EngineError::PayrollAlreadyPaid { .. })
        ));
    }

    #[test]
    fn test_amendment_keeps_unspecified_fields() {
        let validated = submission().validate(22).unwrap();
        let record = PayrollRecord::new(&validated, &reference_breakdown());
        let amendment = PayrollAmendment {
            bonuses: Some(dec("2000")),
            ..Default::default()
        };

        let amended = amendment.apply_to(&record);
        assert_eq!(amended.bonuses, dec("2000"));
        assert_eq!(amended.deductions, dec("500"));
        assert_eq!(amended.working_days, Some(22));
        assert_eq!(amended.employee_id, "emp_001");
    }

    #[test]
    fn test_status_serializes_upper_case() {
        assert_eq!(
            serde_json::to_string(&PayrollStatus::Pending).unwrap(),
            "\"PENDING\""
        );
        let status: PayrollStatus = serde_json::from_str("\"PAID\"").unwrap();
        assert_eq!(status, PayrollStatus::Paid);
    }
}
