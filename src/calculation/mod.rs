//! Calculation logic for the payroll engine.
//!
//! This module contains the pure payroll calculators: the absence-adjusted
//! bonus, the INSS contribution, the IRPS progressive tax, and the net salary
//! assembly that combines them. Every calculator returns its figure together
//! with an audit step describing how it was reached. Arithmetic is checked;
//! an amount too large to compute is reported as a validation error.

mod bonus_adjustment;
mod inss;
mod irps;
mod net_salary;
mod policy;

pub use bonus_adjustment::{
    BonusAdjustmentResult, DEFAULT_WORKING_DAYS, MAX_WORKING_DAYS, adjust_bonus,
};
pub use inss::{InssResult, calculate_inss, inss_rate};
pub use irps::{IrpsBracket, IrpsResult, IrpsTable, MONTHS_PER_YEAR, calculate_irps};
pub use net_salary::{PayrollInputs, calculate_net_salary};
pub use policy::NegativeAmountPolicy;

use crate::error::EngineError;

/// The error for an amount whose arithmetic leaves the range of `Decimal`.
fn out_of_range(field: &str) -> EngineError {
    EngineError::validation(field, "is too large to calculate")
}
