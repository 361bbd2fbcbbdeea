//! Unified error codes for the staff registry
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Department errors
//! - 2xxx: Job title errors
//! - 3xxx: Employee errors
//! - 4xxx: Directory errors
//! - 5xxx: Personnel intake errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Payload failed field validation
    ValidationFailed = 2,
    /// Unique constraint hit on an unidentified column
    AlreadyExists = 4,
    /// Request could not be extracted (path, query, content type)
    InvalidRequest = 5,
    /// Body is not valid JSON or does not match the expected shape
    InvalidFormat = 6,

    // ==================== 1xxx: Department ====================
    /// Department not found
    DepartmentNotFound = 1001,
    /// Department code or name already exists
    DepartmentExists = 1002,
    /// Department still has job titles
    DepartmentHasJobs = 1003,

    // ==================== 2xxx: Job title ====================
    /// Job title not found
    JobNotFound = 2001,
    /// Job code already exists in the department
    JobCodeExists = 2002,
    /// Job title still has employees
    JobHasEmployees = 2003,

    // ==================== 3xxx: Employee ====================
    /// Employee not found
    EmployeeNotFound = 3001,
    /// Employee code already exists
    EmployeeCodeExists = 3002,
    /// Employee email already exists
    EmployeeEmailExists = 3003,

    // ==================== 4xxx: Directory ====================
    /// Directory entry not found
    DirectoryEntryNotFound = 4001,
    /// Batch payload is not a JSON array
    DirectoryBatchNotArray = 4002,
    /// Batch filter is empty
    DirectoryFilterEmpty = 4003,

    // ==================== 5xxx: Personnel ====================
    /// Personnel record could not be stored
    PersonnelInsertFailed = 5001,

    // ==================== 9xxx: System ====================
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid JSON format!",

            // Department
            ErrorCode::DepartmentNotFound => "Department not found",
            ErrorCode::DepartmentExists => "This department code or name may already exist.",
            ErrorCode::DepartmentHasJobs => {
                "Cannot delete department because it has job titles assigned to it."
            }

            // Job title
            ErrorCode::JobNotFound => "Job not found",
            ErrorCode::JobCodeExists => "This job code may already exist in this department.",
            ErrorCode::JobHasEmployees => {
                "Cannot delete job title because it has employees assigned to it."
            }

            // Employee
            ErrorCode::EmployeeNotFound => "Employee not found",
            ErrorCode::EmployeeCodeExists => {
                "This Employee Code already exists. Please choose another one."
            }
            ErrorCode::EmployeeEmailExists => "This email already exists.",

            // Directory
            ErrorCode::DirectoryEntryNotFound => "Employee not found",
            ErrorCode::DirectoryBatchNotArray => "Input must be a JSON array!",
            ErrorCode::DirectoryFilterEmpty => "Filter must name at least one field",

            // Personnel
            ErrorCode::PersonnelInsertFailed => "Failed to add employee",

            // System
            ErrorCode::DatabaseError => "Database error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            2 => Ok(ErrorCode::ValidationFailed),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),

            // Department
            1001 => Ok(ErrorCode::DepartmentNotFound),
            1002 => Ok(ErrorCode::DepartmentExists),
            1003 => Ok(ErrorCode::DepartmentHasJobs),

            // Job title
            2001 => Ok(ErrorCode::JobNotFound),
            2002 => Ok(ErrorCode::JobCodeExists),
            2003 => Ok(ErrorCode::JobHasEmployees),

            // Employee
            3001 => Ok(ErrorCode::EmployeeNotFound),
            3002 => Ok(ErrorCode::EmployeeCodeExists),
            3003 => Ok(ErrorCode::EmployeeEmailExists),

            // Directory
            4001 => Ok(ErrorCode::DirectoryEntryNotFound),
            4002 => Ok(ErrorCode::DirectoryBatchNotArray),
            4003 => Ok(ErrorCode::DirectoryFilterEmpty),

            // Personnel
            5001 => Ok(ErrorCode::PersonnelInsertFailed),

            // System
            9002 => Ok(ErrorCode::DatabaseError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_values() {
        assert_eq!(ErrorCode::InvalidFormat.code(), 6);
        assert_eq!(ErrorCode::DepartmentExists.code(), 1002);
        assert_eq!(ErrorCode::JobHasEmployees.code(), 2003);
        assert_eq!(ErrorCode::EmployeeCodeExists.code(), 3002);
        assert_eq!(ErrorCode::DirectoryBatchNotArray.code(), 4002);
        assert_eq!(ErrorCode::DatabaseError.code(), 9002);
    }

    #[test]
    fn test_try_from_valid() {
        assert_eq!(ErrorCode::try_from(2), Ok(ErrorCode::ValidationFailed));
        assert_eq!(ErrorCode::try_from(1003), Ok(ErrorCode::DepartmentHasJobs));
        assert_eq!(ErrorCode::try_from(3003), Ok(ErrorCode::EmployeeEmailExists));
        assert_eq!(ErrorCode::try_from(9002), Ok(ErrorCode::DatabaseError));
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(0), Err(InvalidErrorCode(0)));
        assert_eq!(ErrorCode::try_from(999), Err(InvalidErrorCode(999)));
        assert_eq!(ErrorCode::try_from(9003), Err(InvalidErrorCode(9003)));
        assert_eq!(ErrorCode::try_from(10000), Err(InvalidErrorCode(10000)));
    }

    #[test]
    fn test_serialize_as_number() {
        let json = serde_json::to_string(&ErrorCode::JobCodeExists).unwrap();
        assert_eq!(json, "2002");

        let parsed: ErrorCode = serde_json::from_str("3001").unwrap();
        assert_eq!(parsed, ErrorCode::EmployeeNotFound);

        let result: Result<ErrorCode, _> = serde_json::from_str("4999");
        assert!(result.is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ErrorCode::AlreadyExists), "4");
        assert_eq!(format!("{}", ErrorCode::EmployeeCodeExists), "3002");
    }

    #[test]
    fn test_conflict_messages() {
        assert_eq!(
            ErrorCode::EmployeeCodeExists.message(),
            "This Employee Code already exists. Please choose another one."
        );
        assert_eq!(
            ErrorCode::EmployeeEmailExists.message(),
            "This email already exists."
        );
        assert_eq!(ErrorCode::JobNotFound.message(), "Job not found");
    }
}
