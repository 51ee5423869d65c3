//! Employee store.

use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, validate_amount};

use super::{generate_id, read_lock, write_lock};

const STORE: &str = "employees";

/// Holds every employee ever created. Employees are deactivated, never removed.
#[derive(Debug, Default)]
pub struct EmployeeStore {
    employees: RwLock<HashMap<String, Employee>>,
}

impl EmployeeStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an active employee with a generated id.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Validation`] for a blank name or a salary that
    /// is negative or above [`max_amount`](crate::models::max_amount).
    pub fn create(&self, name: &str, base_salary: Option<Decimal>) -> EngineResult<Employee> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EngineError::validation("name", "must not be empty"));
        }
        if let Some(salary) = base_salary {
            validate_salary(salary)?;
        }

        let employee = Employee {
            id: generate_id("emp"),
            name: name.to_string(),
            base_salary,
            active: true,
        };
        write_lock(&self.employees, STORE)?.insert(employee.id.clone(), employee.clone());
        Ok(employee)
    }

    /// Fetches an employee by id.
    pub fn get(&self, employee_id: &str) -> EngineResult<Employee> {
        read_lock(&self.employees, STORE)?
            .get(employee_id)
            .cloned()
            .ok_or_else(|| EngineError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            })
    }

    /// Lists employees sorted by name, optionally only active or inactive ones.
    pub fn list(&self, active: Option<bool>) -> EngineResult<Vec<Employee>> {
        let mut employees: Vec<Employee> = read_lock(&self.employees, STORE)?
            .values()
            .filter(|e| active.is_none_or(|a| e.active == a))
            .cloned()
            .collect();
        employees.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(employees)
    }

    /// Records a new base salary.
    pub fn update_salary(&self, employee_id: &str, base_salary: Decimal) -> EngineResult<Employee> {
        validate_salary(base_salary)?;
        self.modify(employee_id, |e| e.base_salary = Some(base_salary))
    }

    /// Marks the employee inactive. Deactivating twice is harmless.
    pub fn deactivate(&self, employee_id: &str) -> EngineResult<Employee> {
        self.modify(employee_id, |e| e.active = false)
    }

    fn modify(&self, employee_id: &str, change: impl FnOnce(&mut Employee)) -> EngineResult<Employee> {
        let mut employees = write_lock(&self.employees, STORE)?;
        let employee = employees
            .get_mut(employee_id)
            .ok_or_else(|| EngineError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            })?;
        change(employee);
        Ok(employee.clone())
    }
}

fn validate_salary(salary: Decimal) -> EngineResult<()> {
    validate_amount("base_salary", salary)
}
