//! Net salary assembly.
//!
//! Runs the bonus adjustment, INSS and IRPS calculators in order and combines
//! their results with the manual deductions into a [`PayrollBreakdown`].

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{AuditStep, PayrollBreakdown};

use super::{
    IrpsTable, NegativeAmountPolicy, adjust_bonus, calculate_inss, calculate_irps, out_of_range,
};

/// Everything the net salary depends on for one employee and month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayrollInputs {
    /// The employee's monthly base salary.
    pub base_salary: Decimal,
    /// The bonus before the absence adjustment.
    pub bonus: Decimal,
    /// Deductions entered by hand, excluding INSS and IRPS.
    pub manual_deductions: Decimal,
    /// Working days in the month.
    pub working_days: u32,
    /// Unpaid absence days in the month.
    pub absences: u32,
}

/// Computes the full payroll breakdown for one month.
///
/// `gross_pay = base_salary + adjusted_bonus` and
/// `net_salary = gross_pay - inss - irps - manual_deductions`.
///
/// # Errors
///
/// Returns [`EngineError::Validation`](crate::error::EngineError::Validation)
/// when `working_days` is zero or an amount is too large to calculate.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{
///     calculate_net_salary, IrpsTable, NegativeAmountPolicy, PayrollInputs,
/// };
/// use rust_decimal::Decimal;
///
/// let inputs = PayrollInputs {
///     base_salary: Decimal::new(20000, 0),
///     bonus: Decimal::new(1000, 0),
///     manual_deductions: Decimal::new(500, 0),
///     working_days: 22,
///     absences: 2,
/// };
/// let breakdown = calculate_net_salary(
///     &inputs,
///     &IrpsTable::statutory(),
///     NegativeAmountPolicy::PassThrough,
/// )
/// .unwrap();
///
/// assert_eq!(breakdown.net_salary.round_dp(2), Decimal::new(1647500, 2));
/// ```
pub fn calculate_net_salary(
    inputs: &PayrollInputs,
    table: &IrpsTable,
    policy: NegativeAmountPolicy,
) -> EngineResult<PayrollBreakdown> {
    let mut audit_steps: Vec<AuditStep> = Vec::with_capacity(4);

    let bonus = adjust_bonus(inputs.bonus, inputs.working_days, inputs.absences, policy, 1)?;
    audit_steps.push(bonus.audit_step);

    let gross_pay = inputs
        .base_salary
        .checked_add(bonus.adjusted_bonus)
        .ok_or_else(|| out_of_range("base_salary"))?;

    let inss = calculate_inss(gross_pay, 2);
    audit_steps.push(inss.audit_step);

    let irps = calculate_irps(gross_pay, table, policy, 3)?;
    audit_steps.push(irps.audit_step);

    let total_deductions = inputs
        .manual_deductions
        .checked_add(inss.contribution)
        .and_then(|d| d.checked_add(irps.monthly_tax))
        .ok_or_else(|| out_of_range("deductions"))?;
    let net_salary = gross_pay
        .checked_sub(inss.contribution)
        .and_then(|n| n.checked_sub(irps.monthly_tax))
        .and_then(|n| n.checked_sub(inputs.manual_deductions))
        .ok_or_else(|| out_of_range("deductions"))?;

    audit_steps.push(AuditStep {
        step_number: 4,
        rule_id: "net_salary".to_string(),
        rule_name: "Net Salary".to_string(),
        input: serde_json::json!({
            "base_salary": inputs.base_salary.normalize().to_string(),
            "adjusted_bonus": bonus.adjusted_bonus.normalize().to_string(),
            "inss": inss.contribution.normalize().to_string(),
            "irps": irps.monthly_tax.normalize().to_string(),
            "manual_deductions": inputs.manual_deductions.normalize().to_string()
        }),
        output: serde_json::json!({
            "gross_pay": gross_pay.normalize().to_string(),
            "total_deductions": total_deductions.normalize().to_string(),
            "net_salary": net_salary.normalize().to_string()
        }),
        reasoning: format!(
            "{} - {} INSS - {} IRPS - {} manual = {}",
            gross_pay.round_dp(2),
            inss.contribution.round_dp(2),
            irps.monthly_tax.round_dp(2),
            inputs.manual_deductions.round_dp(2),
            net_salary.round_dp(2)
        ),
    });

    Ok(PayrollBreakdown {
        base_salary: inputs.base_salary,
        bonus: inputs.bonus,
        working_days: inputs.working_days,
        absences: inputs.absences,
        adjusted_bonus: bonus.adjusted_bonus,
        gross_pay,
        inss: inss.contribution,
        irps: irps.monthly_tax,
        irps_bracket: irps.bracket,
        manual_deductions: inputs.manual_deductions,
        total_deductions,
        net_salary,
        audit_steps,
    })
}
