//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // 404 Not Found
            Self::DepartmentNotFound
            | Self::JobNotFound
            | Self::EmployeeNotFound
            | Self::DirectoryEntryNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists
            | Self::DepartmentExists
            | Self::DepartmentHasJobs
            | Self::JobCodeExists
            | Self::JobHasEmployees
            | Self::EmployeeCodeExists
            | Self::EmployeeEmailExists => StatusCode::CONFLICT,

            // 500 Internal Server Error
            Self::DatabaseError | Self::PersonnelInsertFailed => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            // 400 Bad Request (default for validation errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}
