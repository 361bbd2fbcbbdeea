//! Repository errors mapped onto API error codes

use shared::error::{AppError, ErrorCode};

use crate::db::{Entity, RepoError, UniqueField};

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(entity, id) => {
                let code = match entity {
                    Entity::Department => ErrorCode::DepartmentNotFound,
                    Entity::Job => ErrorCode::JobNotFound,
                    Entity::Employee => ErrorCode::EmployeeNotFound,
                    Entity::DirectoryEntry => ErrorCode::DirectoryEntryNotFound,
                };
                AppError::new(code).with_detail("id", id)
            }
            RepoError::Duplicate(field) => {
                tracing::info!(field = ?field, "Unique constraint rejected write");
                let Some(field) = field else {
                    return AppError::new(ErrorCode::AlreadyExists);
                };
                let code = match field {
                    UniqueField::DepartmentCode | UniqueField::DepartmentName => {
                        ErrorCode::DepartmentExists
                    }
                    UniqueField::JobCode => ErrorCode::JobCodeExists,
                    UniqueField::EmployeeCode => ErrorCode::EmployeeCodeExists,
                    UniqueField::EmployeeEmail => ErrorCode::EmployeeEmailExists,
                };
                AppError::new(code).with_detail("field", field.column())
            }
            RepoError::InUse(entity, id) => {
                tracing::info!(%entity, id, "Delete blocked by dependent rows");
                match entity {
                    Entity::Department => AppError::new(ErrorCode::DepartmentHasJobs),
                    Entity::Job => AppError::new(ErrorCode::JobHasEmployees),
                    other => AppError::conflict(format!("{other} {id} is still referenced")),
                }
                .with_detail("id", id)
            }
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                AppError::new(ErrorCode::DatabaseError)
            }
        }
    }
}
