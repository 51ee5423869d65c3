//! Core data models for the payroll engine.
//!
//! This module contains the domain models shared by the calculators, the
//! stores, and the HTTP API.

mod attendance;
mod breakdown;
mod employee;
mod payroll;
mod product;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{EngineError, EngineResult};

pub use attendance::{AttendanceRecord, AttendanceStatus};
pub use breakdown::{AuditStep, PayrollBreakdown};
pub use employee::Employee;
pub use payroll::{
    PayrollAmendment, PayrollRecord, PayrollStatus, PayrollSubmission, ValidatedSubmission,
};
pub use product::Product;

/// Rounds a monetary amount to cents, halves away from zero.
///
/// ```
/// use payroll_engine::models::round_to_cents;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_to_cents(Decimal::new(12345, 3)), Decimal::new(1235, 2));
/// ```
pub fn round_to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// The largest monetary amount accepted as input: one trillion.
///
/// Amounts up to this bound can be annualised, taxed and summed without
/// leaving the range of [`Decimal`].
pub fn max_amount() -> Decimal {
    Decimal::new(1_000_000_000_000, 0)
}

/// Checks that an input amount is neither negative nor above [`max_amount`].
///
/// # Errors
///
/// Returns [`EngineError::Validation`] naming `field`.
///
/// ```
/// use payroll_engine::models::validate_amount;
/// use rust_decimal::Decimal;
///
/// assert!(validate_amount("bonuses", Decimal::new(1000, 0)).is_ok());
/// assert!(validate_amount("bonuses", Decimal::MAX).is_err());
/// ```
pub fn validate_amount(field: &str, amount: Decimal) -> EngineResult<()> {
    if amount < Decimal::ZERO {
        return Err(EngineError::validation(field, "must not be negative"));
    }
    if amount > max_amount() {
        return Err(EngineError::validation(
            field,
            format!("must not exceed {}", max_amount()),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_bounds() {
        assert!(validate_amount("x", Decimal::ZERO).is_ok());
        assert!(validate_amount("x", max_amount()).is_ok());

        match validate_amount("base_salary", max_amount() + Decimal::ONE) {
            Err(EngineError::Validation { field, message }) => {
                assert_eq!(field, "base_salary");
                assert!(message.contains("must not exceed"));
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
        assert!(validate_amount("x", Decimal::new(-1, 2)).is_err());
    }
}
