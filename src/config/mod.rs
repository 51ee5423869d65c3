//! Configuration loading and management for the payroll engine.
//!
//! This module loads the company metadata, payroll settings (working days,
//! negative amount policy, IRPS brackets) and sales settings from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/mz").unwrap();
//! println!("Default working days: {}", config.default_working_days());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{CompanyMetadata, EngineConfig, PayrollSettings, SalesSettings};
