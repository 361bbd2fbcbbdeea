//! Employee Directory API Handlers

use axum::{Json, extract::State};
use serde_json::Value;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    BatchCount, DirectoryBatchDelete, DirectoryBatchUpdate, DirectoryEntry, DirectoryEntryInput,
    DirectoryFilter, DirectorySearch,
};
use validator::Validate;

use crate::api::extract::{AppJson, AppPath, AppQuery};
use crate::state::AppState;

/// GET /api/directory?query= - keyword search, all entries without a query
pub async fn search(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<DirectorySearch>,
) -> AppResult<Json<Vec<DirectoryEntry>>> {
    let entries = state.directory.search(params.query.as_deref()).await?;
    Ok(Json(entries))
}

/// GET /api/directory/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<DirectoryEntry>> {
    let entry = state
        .directory
        .find_entry(id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::DirectoryEntryNotFound).with_detail("id", id))?;
    Ok(Json(entry))
}

/// PUT /api/directory/{id}
pub async fn replace(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<DirectoryEntryInput>,
) -> AppResult<Json<DirectoryEntry>> {
    payload.validate()?;
    let entry = state.directory.replace_entry(id, payload).await?;
    Ok(Json(entry))
}

/// POST /api/directory/batch - body must be a JSON array of entries
pub async fn add_many(
    State(state): State<AppState>,
    AppJson(body): AppJson<Value>,
) -> AppResult<Json<BatchCount>> {
    if !body.is_array() {
        return Err(AppError::new(ErrorCode::DirectoryBatchNotArray));
    }
    let entries: Vec<DirectoryEntryInput> = serde_json::from_value(body)
        .map_err(|e| AppError::with_message(ErrorCode::InvalidFormat, e.to_string()))?;
    for (index, entry) in entries.iter().enumerate() {
        entry
            .validate()
            .map_err(|e| AppError::from(e).with_detail("index", index))?;
    }
    let count = state.directory.insert_many(entries).await?;
    tracing::info!(count, "Directory entries added");
    Ok(Json(BatchCount { count }))
}

/// PATCH /api/directory/batch - set fields on every matching entry
pub async fn update_many(
    State(state): State<AppState>,
    AppJson(payload): AppJson<DirectoryBatchUpdate>,
) -> AppResult<Json<BatchCount>> {
    require_filter(&payload.filter)?;
    if payload.update.is_empty() {
        return Err(AppError::validation("Update must set at least one field"));
    }
    let count = state
        .directory
        .update_many(&payload.filter, &payload.update)
        .await?;
    tracing::info!(count, "Directory entries updated");
    Ok(Json(BatchCount { count }))
}

/// DELETE /api/directory/batch
pub async fn delete_many(
    State(state): State<AppState>,
    AppJson(payload): AppJson<DirectoryBatchDelete>,
) -> AppResult<Json<BatchCount>> {
    require_filter(&payload.filter)?;
    let count = state.directory.delete_many(&payload.filter).await?;
    tracing::info!(count, "Directory entries deleted");
    Ok(Json(BatchCount { count }))
}

/// An empty filter would match the whole directory.
fn require_filter(filter: &DirectoryFilter) -> AppResult<()> {
    if filter.is_empty() {
        return Err(AppError::new(ErrorCode::DirectoryFilterEmpty));
    }
    Ok(())
}
