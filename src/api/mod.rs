//! HTTP API module for the payroll engine.
//!
//! This module provides the REST endpoints for employees, attendance,
//! payroll records, the product catalog and cart sessions.

mod cart;
mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    AbsenceQuery, AddCartItemRequest, CreateEmployeeRequest, CreateProductRequest,
    EmployeeListQuery, RecordAttendanceRequest, SetQuantityRequest, UpdateSalaryRequest,
};
pub use response::{AbsenceTotalResponse, ApiError, ApiErrorResponse, CartResponse};
pub use state::AppState;
