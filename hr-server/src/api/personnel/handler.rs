//! Personnel intake handler

use axum::{Json, extract::State};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{PersonnelCreate, PersonnelRecord};
use validator::Validate;

use crate::api::extract::AppJson;
use crate::db::RepoError;
use crate::state::AppState;

/// POST /api/personnel
pub async fn create(
    State(state): State<AppState>,
    AppJson(payload): AppJson<PersonnelCreate>,
) -> AppResult<Json<PersonnelRecord>> {
    payload.validate()?;
    let record = state
        .personnel
        .insert_personnel(payload)
        .await
        .map_err(|e| match e {
            RepoError::Database(msg) => {
                tracing::error!(error = %msg, "Personnel insert failed");
                AppError::new(ErrorCode::PersonnelInsertFailed)
            }
            other => other.into(),
        })?;
    tracing::info!(id = record.id, "Personnel record added");
    Ok(Json(record))
}
