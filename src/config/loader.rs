//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the engine
//! configuration from YAML files.

use rust_decimal::Decimal;
use std::fs;
use std::path::Path;
use tracing::warn;

use crate::calculation::{IrpsTable, NegativeAmountPolicy};
use crate::error::{EngineError, EngineResult};

use super::types::{CompanyMetadata, EngineConfig, PayrollSettings, SalesSettings};

/// Loads and provides access to the engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/mz/
/// ├── company.yaml   # Company metadata
/// ├── payroll.yaml   # Working days, negative amount policy, IRPS brackets
/// └── sales.yaml     # Default VAT rate
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/mz")?;
/// println!("Payroll for {}", loader.company().name);
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - The values are inconsistent (see [`EngineConfig::new`])
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let company = Self::load_yaml::<CompanyMetadata>(&path.join("company.yaml"))?;
        let payroll = Self::load_yaml::<PayrollSettings>(&path.join("payroll.yaml"))?;
        let sales = Self::load_yaml::<SalesSettings>(&path.join("sales.yaml"))?;

        let config = EngineConfig::new(company, payroll, sales)?;
        warn_on_discontinuities(config.irps_table());

        Ok(Self { config })
    }

    /// Wraps the built-in statutory configuration.
    pub fn statutory() -> Self {
        Self {
            config: EngineConfig::statutory(),
        }
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the company metadata.
    pub fn company(&self) -> &CompanyMetadata {
        self.config.company()
    }

    /// Returns the IRPS bracket table.
    pub fn irps_table(&self) -> &IrpsTable {
        self.config.irps_table()
    }

    /// Returns the default working days per month.
    pub fn default_working_days(&self) -> u32 {
        self.config.default_working_days()
    }

    /// Returns the negative amount policy.
    pub fn negative_amount_policy(&self) -> NegativeAmountPolicy {
        self.config.negative_amount_policy()
    }

    /// Returns the VAT rate for products created without one.
    pub fn default_vat_rate(&self) -> Decimal {
        self.config.sales().default_vat_rate
    }
}

fn warn_on_discontinuities(table: &IrpsTable) {
    for (bound, gap) in table.boundary_gaps() {
        if !gap.is_zero() {
            warn!(
                bound = %bound,
                annual_gap = %gap,
                "IRPS table is discontinuous at bracket boundary"
            );
        }
    }
}
