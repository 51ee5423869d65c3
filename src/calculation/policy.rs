//! Handling of negative intermediate amounts.
//!
//! Absence deductions can exceed a bonus and a negative gross produces a
//! negative tax. Whether those values are kept or floored at zero is an
//! explicit, configured decision.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// What to do when an adjusted bonus or a tax amount comes out negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NegativeAmountPolicy {
    /// Keep the negative value and let it flow into the totals.
    #[default]
    PassThrough,
    /// Floor the value at zero.
    ClampToZero,
}

impl NegativeAmountPolicy {
    /// Applies the policy to an amount.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::calculation::NegativeAmountPolicy;
    /// use rust_decimal::Decimal;
    ///
    /// let amount = Decimal::new(-4545, 2);
    /// assert_eq!(NegativeAmountPolicy::PassThrough.apply(amount), amount);
    /// assert_eq!(NegativeAmountPolicy::ClampToZero.apply(amount), Decimal::ZERO);
    /// ```
    pub fn apply(self, amount: Decimal) -> Decimal {
        match self {
            NegativeAmountPolicy::PassThrough => amount,
            NegativeAmountPolicy::ClampToZero => amount.max(Decimal::ZERO),
        }
    }

    /// Returns the policy name as written in configuration.
    pub fn as_str(self) -> &'static str {
        match self {
            NegativeAmountPolicy::PassThrough => "pass_through",
            NegativeAmountPolicy::ClampToZero => "clamp_to_zero",
        }
    }
}
