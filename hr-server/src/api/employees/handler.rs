//! Employee API Handlers

use axum::{Json, extract::State};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Employee, EmployeeCreate, EmployeeDetail, EmployeeListing, EmployeeUpdate};
use validator::Validate;

use crate::api::extract::{AppJson, AppPath};
use crate::state::AppState;

/// GET /api/employees
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<EmployeeListing>>> {
    let employees = state.hr.list_employees().await?;
    Ok(Json(employees))
}

/// GET /api/employees/{id} - employee plus the department of its job
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<EmployeeDetail>> {
    let employee = state
        .hr
        .find_employee(id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::EmployeeNotFound).with_detail("id", id))?;
    Ok(Json(employee))
}

/// POST /api/employees
///
/// The submitted code is stored as given; it need not match the suggestion.
pub async fn create(
    State(state): State<AppState>,
    AppJson(payload): AppJson<EmployeeCreate>,
) -> AppResult<Json<Employee>> {
    payload.validate()?;
    let employee = state.hr.create_employee(payload).await?;
    tracing::info!(
        employee_id = employee.employee_id,
        code = %employee.employee_code,
        "Employee created"
    );
    Ok(Json(employee))
}

/// PUT /api/employees/{id}
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<EmployeeUpdate>,
) -> AppResult<Json<Employee>> {
    payload.validate()?;
    let employee = state.hr.update_employee(id, payload).await?;
    Ok(Json(employee))
}

/// DELETE /api/employees/{id}
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<bool>> {
    state.hr.delete_employee(id).await?;
    tracing::info!(employee_id = id, "Employee deleted");
    Ok(Json(true))
}
