//! Job Title API Handlers

use axum::{Json, extract::State};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{JobListing, JobTitle, JobTitleCreate, JobTitleUpdate, NextCode};
use validator::Validate;

use crate::api::extract::{AppJson, AppPath};
use crate::services::suggest;
use crate::state::AppState;

/// GET /api/jobs
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<JobListing>>> {
    let jobs = state.hr.list_jobs().await?;
    Ok(Json(jobs))
}

/// GET /api/jobs/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<JobTitle>> {
    let job = state
        .hr
        .find_job(id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::JobNotFound).with_detail("id", id))?;
    Ok(Json(job))
}

/// POST /api/jobs
pub async fn create(
    State(state): State<AppState>,
    AppJson(payload): AppJson<JobTitleCreate>,
) -> AppResult<Json<JobTitle>> {
    payload.validate()?;
    let job = state.hr.create_job(payload).await?;
    tracing::info!(job_id = job.job_id, code = %job.job_code, "Job title created");
    Ok(Json(job))
}

/// PUT /api/jobs/{id}
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<JobTitleUpdate>,
) -> AppResult<Json<JobTitle>> {
    payload.validate()?;
    let job = state.hr.update_job(id, payload).await?;
    Ok(Json(job))
}

/// DELETE /api/jobs/{id}
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<bool>> {
    state.hr.delete_job(id).await?;
    tracing::info!(job_id = id, "Job title deleted");
    Ok(Json(true))
}

/// GET /api/jobs/{id}/next-employee-code
pub async fn next_employee_code(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<NextCode>> {
    let code = suggest::suggest_employee_code(state.hr.as_ref(), id).await?;
    Ok(Json(NextCode::new(code)))
}
