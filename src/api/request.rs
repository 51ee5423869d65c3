//! Request types for the payroll and sales API.
//!
//! Payroll submissions and amendments are deserialized straight into
//! [`PayrollSubmission`](crate::models::PayrollSubmission) and
//! [`PayrollAmendment`](crate::models::PayrollAmendment); the types here cover
//! the remaining endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{AttendanceRecord, AttendanceStatus};

/// Request body for `POST /employees`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEmployeeRequest {
    /// Display name.
    pub name: String,
    /// Monthly base salary; may be set later.
    #[serde(default)]
    pub base_salary: Option<Decimal>,
}

/// Request body for `PUT /employees/:id/salary`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateSalaryRequest {
    /// The new monthly base salary.
    pub base_salary: Decimal,
}

/// Query string for `GET /employees`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeeListQuery {
    /// Only active (`true`) or inactive (`false`) employees.
    #[serde(default)]
    pub active: Option<bool>,
}

/// Request body for `POST /attendance`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordAttendanceRequest {
    /// The employee concerned.
    pub employee_id: String,
    /// The day recorded.
    pub date: NaiveDate,
    /// What happened that day.
    pub status: AttendanceStatus,
}

impl From<RecordAttendanceRequest> for AttendanceRecord {
    fn from(req: RecordAttendanceRequest) -> Self {
        AttendanceRecord {
            employee_id: req.employee_id.trim().to_string(),
            date: req.date,
            status: req.status,
        }
    }
}

/// Query string for `GET /attendance/:employee_id/absences`.
#[derive(Debug, Clone, Deserialize)]
pub struct AbsenceQuery {
    /// Calendar year.
    pub year: i32,
    /// Calendar month, 1-12.
    pub month: u32,
}

/// Request body for `POST /products`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProductRequest {
    /// Display name.
    pub name: String,
    /// Price of one unit before VAT.
    pub unit_price: Decimal,
    /// VAT rate; the configured default when omitted.
    #[serde(default)]
    pub vat_rate: Option<Decimal>,
}

/// Request body for `POST /carts/:id/items`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddCartItemRequest {
    /// The product to add.
    pub product_id: String,
    /// Units to add.
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

/// Request body for `PUT /carts/:id/items/:product_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetQuantityRequest {
    /// New quantity; zero removes the line.
    pub quantity: u32,
}
