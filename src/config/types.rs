//! Configuration types for the payroll engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::calculation::{
    DEFAULT_WORKING_DAYS, IrpsBracket, IrpsTable, MAX_WORKING_DAYS, NegativeAmountPolicy,
};
use crate::error::{EngineError, EngineResult};

/// Metadata about the company running the engine.
#[derive(Debug, Clone, Deserialize)]
pub struct CompanyMetadata {
    /// The registered company name.
    pub name: String,
    /// ISO 4217 currency code amounts are expressed in (e.g., "MZN").
    pub currency: String,
    /// ISO 3166 country code whose payroll rules apply (e.g., "MZ").
    pub country: String,
}

/// Payroll configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct PayrollSettings {
    /// Working days used when a submission does not give any.
    pub default_working_days: u32,
    /// Treatment of negative adjusted bonuses and taxes.
    #[serde(default)]
    pub negative_amount_policy: NegativeAmountPolicy,
    /// IRPS brackets in ascending order, the last one without `up_to`.
    pub irps_brackets: Vec<IrpsBracket>,
}

/// Sales configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct SalesSettings {
    /// VAT rate given to products created without one.
    pub default_vat_rate: Decimal,
}

/// The complete engine configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    company: CompanyMetadata,
    default_working_days: u32,
    negative_amount_policy: NegativeAmountPolicy,
    irps: IrpsTable,
    sales: SalesSettings,
}

impl EngineConfig {
    /// Creates a validated configuration from its component parts.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] if the default working days are
    /// outside 1-31, the VAT rate is outside 0-1, or the IRPS brackets are
    /// malformed.
    pub fn new(
        company: CompanyMetadata,
        payroll: PayrollSettings,
        sales: SalesSettings,
    ) -> EngineResult<Self> {
        if !(1..=MAX_WORKING_DAYS).contains(&payroll.default_working_days) {
            return Err(EngineError::InvalidConfig {
                message: format!(
                    "default_working_days {} is outside 1-{}",
                    payroll.default_working_days, MAX_WORKING_DAYS
                ),
            });
        }
        if sales.default_vat_rate < Decimal::ZERO || sales.default_vat_rate > Decimal::ONE {
            return Err(EngineError::InvalidConfig {
                message: format!("default_vat_rate {} is outside 0-1", sales.default_vat_rate),
            });
        }

        let irps = IrpsTable::new(payroll.irps_brackets)?;

        Ok(Self {
            company,
            default_working_days: payroll.default_working_days,
            negative_amount_policy: payroll.negative_amount_policy,
            irps,
            sales,
        })
    }

    /// The built-in configuration: statutory IRPS table, 22 working days,
    /// pass-through negatives, 16% VAT.
    pub fn statutory() -> Self {
        Self {
            company: CompanyMetadata {
                name: "Default Company".to_string(),
                currency: "MZN".to_string(),
                country: "MZ".to_string(),
            },
            default_working_days: DEFAULT_WORKING_DAYS,
            negative_amount_policy: NegativeAmountPolicy::PassThrough,
            irps: IrpsTable::statutory(),
            sales: SalesSettings {
                default_vat_rate: Decimal::new(16, 2),
            },
        }
    }

    /// Returns the company metadata.
    pub fn company(&self) -> &CompanyMetadata {
        &self.company
    }

    /// Returns the default working days per month.
    pub fn default_working_days(&self) -> u32 {
        self.default_working_days
    }

    /// Returns the negative amount policy.
    pub fn negative_amount_policy(&self) -> NegativeAmountPolicy {
        self.negative_amount_policy
    }

    /// Returns the IRPS bracket table.
    pub fn irps_table(&self) -> &IrpsTable {
        &self.irps
    }

    /// Returns the sales settings.
    pub fn sales(&self) -> &SalesSettings {
        &self.sales
    }
}
