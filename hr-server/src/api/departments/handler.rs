//! Department API Handlers

use axum::{Json, extract::State};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Department, DepartmentCreate, DepartmentUpdate, JobOption, NextCode};
use validator::Validate;

use crate::api::extract::{AppJson, AppPath};
use crate::services::suggest;
use crate::state::AppState;

/// GET /api/departments
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Department>>> {
    let departments = state.hr.list_departments().await?;
    Ok(Json(departments))
}

/// GET /api/departments/next-code
pub async fn next_code(State(state): State<AppState>) -> AppResult<Json<NextCode>> {
    let code = suggest::suggest_department_code(state.hr.as_ref()).await?;
    Ok(Json(NextCode::new(code)))
}

/// GET /api/departments/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<Department>> {
    let department = state
        .hr
        .find_department(id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::DepartmentNotFound).with_detail("id", id))?;
    Ok(Json(department))
}

/// POST /api/departments
pub async fn create(
    State(state): State<AppState>,
    AppJson(payload): AppJson<DepartmentCreate>,
) -> AppResult<Json<Department>> {
    payload.validate()?;
    let department = state.hr.create_department(payload).await?;
    tracing::info!(
        department_id = department.department_id,
        code = %department.department_code,
        "Department created"
    );
    Ok(Json(department))
}

/// PUT /api/departments/{id}
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<DepartmentUpdate>,
) -> AppResult<Json<Department>> {
    payload.validate()?;
    let department = state.hr.update_department(id, payload).await?;
    Ok(Json(department))
}

/// DELETE /api/departments/{id}
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<bool>> {
    state.hr.delete_department(id).await?;
    tracing::info!(department_id = id, "Department deleted");
    Ok(Json(true))
}

/// GET /api/departments/{id}/jobs - job titles for a department dropdown
pub async fn list_jobs(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<Vec<JobOption>>> {
    let jobs = state.hr.jobs_in_department(id).await?;
    Ok(Json(jobs))
}

/// GET /api/departments/{id}/next-job-code
pub async fn next_job_code(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<NextCode>> {
    let code = suggest::suggest_job_code(state.hr.as_ref(), id).await?;
    Ok(Json(NextCode::new(code)))
}
