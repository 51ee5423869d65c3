//! Payroll engine and sales cart service for a small-business ERP.
//!
//! The [`calculation`] module computes an employee's monthly net salary from
//! base salary, an absence-adjusted bonus, INSS, progressive IRPS and manual
//! deductions, recording an audit step for every figure. The [`store`] and
//! [`sales`] modules hold employees, attendance, payroll records, products
//! and session-scoped carts, and [`api`] exposes them over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod sales;
pub mod store;
