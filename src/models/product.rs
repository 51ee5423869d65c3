//! Catalog product model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::validate_amount;

/// A product that can be sold through a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier for the product.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Price of one unit, before VAT.
    pub unit_price: Decimal,
    /// VAT rate as a fraction (0.16 for 16%).
    pub vat_rate: Decimal,
}

impl Product {
    /// Checks the name, that the price lies within the amount cap, and that
    /// the VAT rate lies in 0-1.
    pub fn validate(&self) -> EngineResult<()> {
        if self.name.trim().is_empty() {
            return Err(EngineError::validation("name", "must not be empty"));
        }
        validate_amount("unit_price", self.unit_price)?;
        if self.vat_rate < Decimal::ZERO || self.vat_rate > Decimal::ONE {
            return Err(EngineError::validation("vat_rate", "must be between 0 and 1"));
        }
        Ok(())
    }
}
