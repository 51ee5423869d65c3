//! Absence-adjusted bonus calculation.
//!
//! A bonus is earned over the working days of the month; each unpaid absence
//! removes one day's share of it.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::AuditStep;

use super::{NegativeAmountPolicy, out_of_range};

/// Working days per month assumed when a submission does not say otherwise.
pub const DEFAULT_WORKING_DAYS: u32 = 22;

/// The largest accepted number of working days in a month.
pub const MAX_WORKING_DAYS: u32 = 31;

/// The result of adjusting a bonus for absences.
#[derive(Debug, Clone)]
pub struct BonusAdjustmentResult {
    /// The bonus after removing the absence share.
    pub adjusted_bonus: Decimal,
    /// The amount removed for absences.
    pub absence_deduction: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Reduces a bonus proportionally to the absences in the period.
///
/// `adjusted_bonus = bonus - (bonus / working_days) * absences`. The product
/// is taken before the division so that `absences == working_days` leaves
/// exactly zero.
///
/// With [`NegativeAmountPolicy::PassThrough`], more absences than working
/// days produce a negative adjusted bonus.
///
/// # Errors
///
/// Returns [`EngineError::Validation`] when `working_days` is zero or the
/// bonus is too large to multiply by the absences.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{adjust_bonus, NegativeAmountPolicy};
/// use rust_decimal::Decimal;
///
/// let result = adjust_bonus(Decimal::new(1100, 0), 22, 2, NegativeAmountPolicy::PassThrough, 1).unwrap();
/// assert_eq!(result.adjusted_bonus, Decimal::new(1000, 0));
/// ```
pub fn adjust_bonus(
    bonus: Decimal,
    working_days: u32,
    absences: u32,
    policy: NegativeAmountPolicy,
    step_number: u32,
) -> EngineResult<BonusAdjustmentResult> {
    if working_days == 0 {
        return Err(EngineError::validation(
            "working_days",
            "must be at least 1",
        ));
    }

    let days = Decimal::from(working_days);
    let absence_deduction = bonus
        .checked_mul(Decimal::from(absences))
        .and_then(|share| share.checked_div(days))
        .ok_or_else(|| out_of_range("bonuses"))?;
    let unclamped = bonus
        .checked_sub(absence_deduction)
        .ok_or_else(|| out_of_range("bonuses"))?;
    let adjusted_bonus = policy.apply(unclamped);

    let reasoning = if absences == 0 {
        format!("No absences; bonus {} paid in full", bonus.normalize())
    } else {
        format!(
            "{} - ({} / {} days) x {} absences = {}",
            bonus.normalize(),
            bonus.normalize(),
            working_days,
            absences,
            adjusted_bonus.round_dp(2)
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "bonus_adjustment".to_string(),
        rule_name: "Absence-Adjusted Bonus".to_string(),
        input: serde_json::json!({
            "bonus": bonus.normalize().to_string(),
            "working_days": working_days,
            "absences": absences,
            "policy": policy.as_str()
        }),
        output: serde_json::json!({
            "absence_deduction": absence_deduction.normalize().to_string(),
            "adjusted_bonus": adjusted_bonus.normalize().to_string(),
            "clamped": adjusted_bonus != unclamped
        }),
        reasoning,
    };

    Ok(BonusAdjustmentResult {
        adjusted_bonus,
        absence_deduction,
        audit_step,
    })
}
