//! HTTP request handlers for the payroll API.
//!
//! This module builds the router and contains the employee, attendance and
//! payroll handlers. Product and cart handlers live in [`super::cart`].

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    routing::{get, post, put},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{PayrollInputs, calculate_net_salary};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceRecord, Employee, PayrollAmendment, PayrollBreakdown, PayrollRecord,
    PayrollSubmission, ValidatedSubmission,
};
use crate::store::{AbsenceSource, PayrollFilter};

use super::cart;
use super::request::{
    AbsenceQuery, CreateEmployeeRequest, EmployeeListQuery, RecordAttendanceRequest,
    UpdateSalaryRequest,
};
use super::response::{AbsenceTotalResponse, ApiError, ApiErrorResponse};
use super::state::AppState;

/// Result type returned by every handler.
pub(super) type ApiResult<T> = Result<(StatusCode, Json<T>), ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/employees", get(list_employees).post(create_employee))
        .route("/employees/:id", get(get_employee))
        .route("/employees/:id/salary", put(update_salary))
        .route("/employees/:id/deactivate", post(deactivate_employee))
        .route("/attendance", post(record_attendance))
        .route("/attendance/:employee_id", get(list_attendance))
        .route("/attendance/:employee_id/absences", get(absence_total))
        .route("/payroll", get(list_payroll).post(submit_payroll))
        .route("/payroll/preview", post(preview_payroll))
        .route("/payroll/:id", get(get_payroll).put(amend_payroll))
        .route("/payroll/:id/pay", post(pay_payroll))
        .route("/products", get(cart::list_products).post(cart::create_product))
        .route("/carts", post(cart::open_cart))
        .route("/carts/:id", get(cart::get_cart).delete(cart::discard_cart))
        .route("/carts/:id/items", post(cart::add_item))
        .route(
            "/carts/:id/items/:product_id",
            put(cart::set_quantity).delete(cart::remove_item),
        )
        .route("/carts/:id/checkout", post(cart::checkout))
        .route("/carts/:id/orders", get(cart::list_orders))
        .with_state(state)
}

/// Unwraps a JSON body, turning a rejection into a 400 response.
pub(super) fn json_body<T>(
    correlation_id: Uuid,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, ApiErrorResponse> {
    let rejection = match payload {
        Ok(Json(body)) => return Ok(body),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's description of the problem
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    Err(ApiErrorResponse::bad_request(error))
}

/// Unwraps a query string, turning a rejection into a 400 response.
pub(super) fn query_params<T>(
    correlation_id: Uuid,
    query: Result<Query<T>, QueryRejection>,
) -> Result<T, ApiErrorResponse> {
    query.map(|Query(q)| q).map_err(|rejection| {
        warn!(correlation_id = %correlation_id, error = %rejection, "Invalid query string");
        ApiErrorResponse::bad_request(ApiError::validation_error(rejection.body_text()))
    })
}

/// Unwraps a path parameter, turning a rejection into a 400 response.
pub(super) fn path_param<T>(
    correlation_id: Uuid,
    path: Result<Path<T>, PathRejection>,
) -> Result<T, ApiErrorResponse> {
    path.map(|Path(p)| p).map_err(|rejection| {
        warn!(correlation_id = %correlation_id, error = %rejection, "Invalid path parameter");
        ApiErrorResponse::bad_request(ApiError::validation_error(rejection.body_text()))
    })
}

/// Logs a failed operation and converts it into an error response.
pub(super) fn rejected(correlation_id: Uuid, operation: &str, err: EngineError) -> ApiErrorResponse {
    warn!(
        correlation_id = %correlation_id,
        operation = operation,
        error = %err,
        "Request rejected"
    );
    err.into()
}

async fn list_employees(
    State(state): State<AppState>,
    query: Result<Query<EmployeeListQuery>, QueryRejection>,
) -> ApiResult<Vec<Employee>> {
    let correlation_id = Uuid::new_v4();
    let query = query_params(correlation_id, query)?;
    let employees = state
        .employees()
        .list(query.active)
        .map_err(|e| rejected(correlation_id, "list_employees", e))?;
    Ok((StatusCode::OK, Json(employees)))
}

async fn create_employee(
    State(state): State<AppState>,
    payload: Result<Json<CreateEmployeeRequest>, JsonRejection>,
) -> ApiResult<Employee> {
    let correlation_id = Uuid::new_v4();
    let request = json_body(correlation_id, payload)?;

    let employee = state
        .employees()
        .create(&request.name, request.base_salary)
        .map_err(|e| rejected(correlation_id, "create_employee", e))?;

    info!(
        correlation_id = %correlation_id,
        employee_id = %employee.id,
        "Employee created"
    );
    Ok((StatusCode::CREATED, Json(employee)))
}

async fn get_employee(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> ApiResult<Employee> {
    let correlation_id = Uuid::new_v4();
    let employee = state
        .employees()
        .get(&employee_id)
        .map_err(|e| rejected(correlation_id, "get_employee", e))?;
    Ok((StatusCode::OK, Json(employee)))
}

async fn update_salary(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    payload: Result<Json<UpdateSalaryRequest>, JsonRejection>,
) -> ApiResult<Employee> {
    let correlation_id = Uuid::new_v4();
    let request = json_body(correlation_id, payload)?;

    let employee = state
        .employees()
        .update_salary(&employee_id, request.base_salary)
        .map_err(|e| rejected(correlation_id, "update_salary", e))?;

    info!(
        correlation_id = %correlation_id,
        employee_id = %employee.id,
        base_salary = %request.base_salary,
        "Salary updated"
    );
    Ok((StatusCode::OK, Json(employee)))
}

async fn deactivate_employee(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> ApiResult<Employee> {
    let correlation_id = Uuid::new_v4();
    let employee = state
        .employees()
        .deactivate(&employee_id)
        .map_err(|e| rejected(correlation_id, "deactivate_employee", e))?;

    info!(correlation_id = %correlation_id, employee_id = %employee.id, "Employee deactivated");
    Ok((StatusCode::OK, Json(employee)))
}

async fn record_attendance(
    State(state): State<AppState>,
    payload: Result<Json<RecordAttendanceRequest>, JsonRejection>,
) -> ApiResult<AttendanceRecord> {
    let correlation_id = Uuid::new_v4();
    let record: AttendanceRecord = json_body(correlation_id, payload)?.into();

    let result = state
        .employees()
        .get(&record.employee_id)
        .and_then(|_| state.attendance().record(record))
        .map_err(|e| rejected(correlation_id, "record_attendance", e))?;

    info!(
        correlation_id = %correlation_id,
        employee_id = %result.employee_id,
        date = %result.date,
        status = ?result.status,
        "Attendance recorded"
    );
    Ok((StatusCode::CREATED, Json(result)))
}

async fn list_attendance(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    query: Result<Query<AbsenceQuery>, QueryRejection>,
) -> ApiResult<Vec<AttendanceRecord>> {
    let correlation_id = Uuid::new_v4();
    let query = query_params(correlation_id, query)?;
    let records = state
        .attendance()
        .records_for(&employee_id, query.year, query.month)
        .map_err(|e| rejected(correlation_id, "list_attendance", e))?;
    Ok((StatusCode::OK, Json(records)))
}

async fn absence_total(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    query: Result<Query<AbsenceQuery>, QueryRejection>,
) -> ApiResult<AbsenceTotalResponse> {
    let correlation_id = Uuid::new_v4();
    let query = query_params(correlation_id, query)?;

    let total = state
        .absence_source()
        .absences_in_month(&employee_id, query.year, query.month)
        .map_err(|e| rejected(correlation_id, "absence_total", e.into()))?;
    Ok((StatusCode::OK, Json(AbsenceTotalResponse { total })))
}

async fn preview_payroll(
    State(state): State<AppState>,
    payload: Result<Json<PayrollSubmission>, JsonRejection>,
) -> ApiResult<PayrollBreakdown> {
    let correlation_id = Uuid::new_v4();
    let submission = json_body(correlation_id, payload)?;

    let start_time = Instant::now();
    let (validated, breakdown) = perform_payroll_calculation(&state, &submission)
        .map_err(|e| rejected(correlation_id, "preview_payroll", e))?;

    info!(
        correlation_id = %correlation_id,
        employee_id = %validated.employee_id,
        net_salary = %breakdown.net_salary,
        duration_us = start_time.elapsed().as_micros(),
        "Payroll previewed"
    );
    Ok((StatusCode::OK, Json(breakdown)))
}

async fn submit_payroll(
    State(state): State<AppState>,
    payload: Result<Json<PayrollSubmission>, JsonRejection>,
) -> ApiResult<PayrollRecord> {
    let correlation_id = Uuid::new_v4();
    let submission = json_body(correlation_id, payload)?;
    info!(correlation_id = %correlation_id, "Processing payroll submission");

    let start_time = Instant::now();
    let record = perform_payroll_calculation(&state, &submission)
        .and_then(|(validated, breakdown)| {
            state
                .payroll()
                .insert(PayrollRecord::new(&validated, &breakdown))
        })
        .map_err(|e| rejected(correlation_id, "submit_payroll", e))?;

    info!(
        correlation_id = %correlation_id,
        payroll_id = %record.id,
        employee_id = %record.employee_id,
        year = record.year,
        month = record.month,
        absences = record.absences,
        net_salary = %record.net_salary,
        duration_us = start_time.elapsed().as_micros(),
        "Payroll record created"
    );
    Ok((StatusCode::CREATED, Json(record)))
}

async fn list_payroll(
    State(state): State<AppState>,
    query: Result<Query<PayrollFilter>, QueryRejection>,
) -> ApiResult<Vec<PayrollRecord>> {
    let correlation_id = Uuid::new_v4();
    let filter = query_params(correlation_id, query)?;
    let records = state
        .payroll()
        .list(&filter)
        .map_err(|e| rejected(correlation_id, "list_payroll", e))?;
    Ok((StatusCode::OK, Json(records)))
}

async fn get_payroll(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<PayrollRecord> {
    let correlation_id = Uuid::new_v4();
    let payroll_id = path_param(correlation_id, path)?;
    let record = state
        .payroll()
        .get(payroll_id)
        .map_err(|e| rejected(correlation_id, "get_payroll", e))?;
    Ok((StatusCode::OK, Json(record)))
}

async fn amend_payroll(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<PayrollAmendment>, JsonRejection>,
) -> ApiResult<PayrollRecord> {
    let correlation_id = Uuid::new_v4();
    let payroll_id = path_param(correlation_id, path)?;
    let amendment = json_body(correlation_id, payload)?;

    let record = amend_record(&state, payroll_id, &amendment)
        .map_err(|e| rejected(correlation_id, "amend_payroll", e))?;

    info!(
        correlation_id = %correlation_id,
        payroll_id = %record.id,
        net_salary = %record.net_salary,
        "Payroll record amended"
    );
    Ok((StatusCode::OK, Json(record)))
}

async fn pay_payroll(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<PayrollRecord> {
    let correlation_id = Uuid::new_v4();
    let payroll_id = path_param(correlation_id, path)?;

    let record = state
        .payroll()
        .mark_paid(payroll_id)
        .map_err(|e| rejected(correlation_id, "pay_payroll", e))?;

    info!(
        correlation_id = %correlation_id,
        payroll_id = %record.id,
        employee_id = %record.employee_id,
        net_salary = %record.net_salary,
        "Payroll record paid"
    );
    Ok((StatusCode::OK, Json(record)))
}

/// Validates a submission and computes its breakdown.
///
/// The employee must exist, be active and have a salary. Absences come from
/// the state's [`AbsenceSource`]; a failed lookup aborts the calculation.
fn perform_payroll_calculation(
    state: &AppState,
    submission: &PayrollSubmission,
) -> EngineResult<(ValidatedSubmission, PayrollBreakdown)> {
    let config = state.config();
    let validated = submission.validate(config.default_working_days())?;

    let employee = state.employees().get(&validated.employee_id)?;
    let base_salary = employee.payable_salary()?;

    let absences = state.absence_source().absences_in_month(
        &validated.employee_id,
        validated.year,
        validated.month,
    )?;

    let inputs = PayrollInputs {
        base_salary,
        bonus: validated.bonuses,
        manual_deductions: validated.deductions,
        working_days: validated.working_days,
        absences,
    };
    let breakdown = calculate_net_salary(
        &inputs,
        config.irps_table(),
        config.negative_amount_policy(),
    )?;
    Ok((validated, breakdown))
}

/// Recomputes a pending record with amended inputs.
fn amend_record(
    state: &AppState,
    payroll_id: Uuid,
    amendment: &PayrollAmendment,
) -> EngineResult<PayrollRecord> {
    let current = state.payroll().get(payroll_id)?;
    if current.is_paid() {
        return Err(EngineError::PayrollAlreadyPaid { payroll_id });
    }

    let (_, breakdown) = perform_payroll_calculation(state, &amendment.apply_to(&current))?;
    state
        .payroll()
        .update(payroll_id, |record| record.recalculate(&breakdown))
}
