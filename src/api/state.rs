//! Application state for the payroll and sales API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::sales::CartSessions;
use crate::store::{AbsenceSource, AttendanceStore, EmployeeStore, PayrollStore, ProductCatalog};

/// Shared application state.
///
/// Cloning is cheap: every store sits behind an `Arc`, so clones observe the
/// same records.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    employees: Arc<EmployeeStore>,
    attendance: Arc<AttendanceStore>,
    absence_source: Arc<dyn AbsenceSource>,
    payroll: Arc<PayrollStore>,
    catalog: Arc<ProductCatalog>,
    carts: Arc<CartSessions>,
}

impl AppState {
    /// Creates application state with empty stores. Absences are counted
    /// from the attendance store.
    pub fn new(config: ConfigLoader) -> Self {
        let attendance = Arc::new(AttendanceStore::new());
        Self {
            config: Arc::new(config),
            employees: Arc::new(EmployeeStore::new()),
            absence_source: attendance.clone(),
            attendance,
            payroll: Arc::new(PayrollStore::new()),
            catalog: Arc::new(ProductCatalog::new()),
            carts: Arc::new(CartSessions::new()),
        }
    }

    /// Replaces the source used to count absences during payroll runs.
    pub fn with_absence_source(mut self, source: Arc<dyn AbsenceSource>) -> Self {
        self.absence_source = source;
        self
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Employee records.
    pub fn employees(&self) -> &EmployeeStore {
        &self.employees
    }

    /// Attendance records.
    pub fn attendance(&self) -> &AttendanceStore {
        &self.attendance
    }

    /// Absence counts used by payroll.
    pub fn absence_source(&self) -> &dyn AbsenceSource {
        self.absence_source.as_ref()
    }

    /// Payroll records.
    pub fn payroll(&self) -> &PayrollStore {
        &self.payroll
    }

    /// Product catalog.
    pub fn catalog(&self) -> &ProductCatalog {
        &self.catalog
    }

    /// Cart sessions.
    pub fn carts(&self) -> &CartSessions {
        &self.carts
    }
}
