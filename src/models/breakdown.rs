//! Payroll breakdown and audit models.
//!
//! This module contains the [`PayrollBreakdown`] returned by the net salary
//! calculation and the [`AuditStep`] entries that explain each figure in it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single step in the audit trail recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for one calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the result.
    pub reasoning: String,
}

/// Every intermediate figure of a monthly payroll calculation.
///
/// Amounts keep full decimal precision; rounding to cents happens when a
/// breakdown is turned into a stored [`PayrollRecord`](super::PayrollRecord).
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayrollBreakdown;
/// use rust_decimal::Decimal;
///
/// let breakdown = PayrollBreakdown {
///     base_salary: Decimal::new(3000, 0),
///     bonus: Decimal::ZERO,
///     working_days: 22,
///     absences: 0,
///     adjusted_bonus: Decimal::ZERO,
///     gross_pay: Decimal::new(3000, 0),
///     inss: Decimal::new(90, 0),
///     irps: Decimal::new(300, 0),
///     irps_bracket: 1,
///     manual_deductions: Decimal::ZERO,
///     total_deductions: Decimal::new(390, 0),
///     net_salary: Decimal::new(2610, 0),
///     audit_steps: vec![],
/// };
/// assert_eq!(breakdown.statutory_deductions(), Decimal::new(390, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollBreakdown {
    /// The monthly base salary.
    pub base_salary: Decimal,
    /// The bonus before the absence adjustment.
    pub bonus: Decimal,
    /// Working days the bonus was spread over.
    pub working_days: u32,
    /// Unpaid absence days in the month.
    pub absences: u32,
    /// The bonus after the absence adjustment.
    pub adjusted_bonus: Decimal,
    /// Base salary plus adjusted bonus.
    pub gross_pay: Decimal,
    /// INSS contribution.
    pub inss: Decimal,
    /// Monthly IRPS withholding.
    pub irps: Decimal,
    /// One-based IRPS bracket applied.
    pub irps_bracket: usize,
    /// Deductions entered by hand.
    pub manual_deductions: Decimal,
    /// Manual deductions plus INSS plus IRPS.
    pub total_deductions: Decimal,
    /// Gross pay minus every deduction.
    pub net_salary: Decimal,
    /// How each figure was reached.
    pub audit_steps: Vec<AuditStep>,
}

impl PayrollBreakdown {
    /// Returns INSS plus IRPS.
    pub fn statutory_deductions(&self) -> Decimal {
        self.inss + self.irps
    }
}
