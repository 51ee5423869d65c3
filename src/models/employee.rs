//! Employee model.
//!
//! Employees are never deleted; they are deactivated and keep their payroll
//! history.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Represents an employee that can be put on the payroll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// The employee's display name.
    pub name: String,
    /// Monthly base salary; absent until HR records one.
    #[serde(default)]
    pub base_salary: Option<Decimal>,
    /// Whether the employee is currently employed.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Employee {
    /// Returns the base salary of an employee who can be paid.
    ///
    /// # Errors
    ///
    /// * [`EngineError::InvalidEmployee`] if the employee is inactive.
    /// * [`EngineError::MissingSalary`] if no base salary is recorded.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::Employee;
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee {
    ///     id: "emp_001".to_string(),
    ///     name: "Ana Macuácua".to_string(),
    ///     base_salary: Some(Decimal::new(20000, 0)),
    ///     active: true,
    /// };
    /// assert_eq!(employee.payable_salary().unwrap(), Decimal::new(20000, 0));
    /// ```
    pub fn payable_salary(&self) -> EngineResult<Decimal> {
        if !self.active {
            return Err(EngineError::InvalidEmployee {
                employee_id: self.id.clone(),
                message: "employee is inactive".to_string(),
            });
        }
        self.base_salary.ok_or_else(|| EngineError::MissingSalary {
            employee_id: self.id.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_employee(base_salary: Option<Decimal>, active: bool) -> Employee {
        Employee {
            id: "emp_001".to_string(),
            name: "Ana Macuácua".to_string(),
            base_salary,
            active,
        }
    }

    #[test]
    fn test_deserialize_defaults_active_and_salary() {
        let json = r#"{ "id": "emp_002", "name": "Rui Tembe" }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert!(employee.active);
        assert_eq!(employee.base_salary, None);
    }

    #[test]
    fn test_deserialize_salary_from_string() {
        let json = r#"{ "id": "emp_003", "name": "Lina", "base_salary": "18500.50", "active": false }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.base_salary, Some(Decimal::new(1850050, 2)));
        assert!(!employee.active);
    }

    #[test]
    fn test_payable_salary_for_active_employee() {
        let employee = create_test_employee(Some(Decimal::new(20000, 0)), true);
        assert_eq!(employee.payable_salary().unwrap(), Decimal::new(20000, 0));
    }

    #[test]
    fn test_payable_salary_missing() {
        let employee = create_test_employee(None, true);
        match employee.payable_salary() {
            Err(EngineError::MissingSalary { employee_id }) => assert_eq!(employee_id, "emp_001"),
            other => panic!("Expected MissingSalary, got {:?}", other),
        }
    }

    #[test]
    fn test_payable_salary_inactive() {
        let employee = create_test_employee(Some(Decimal::new(20000, 0)), false);
        assert!(matches!(
            employee.payable_salary(),
            Err(EngineError::InvalidEmployee { .. })
        ));
    }
}
