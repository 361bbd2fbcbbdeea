//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 1xxx: Department errors
/// - 2xxx: Job title errors
/// - 3xxx: Employee errors
/// - 4xxx: Directory errors
/// - 5xxx: Personnel intake errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Department errors (1xxx)
    Department,
    /// Job title errors (2xxx)
    Job,
    /// Employee errors (3xxx)
    Employee,
    /// Directory errors (4xxx)
    Directory,
    /// Personnel intake errors (5xxx)
    Personnel,
    /// System errors (9xxx, and anything unassigned)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Department,
            2000..3000 => Self::Job,
            3000..4000 => Self::Employee,
            4000..5000 => Self::Directory,
            5000..6000 => Self::Personnel,
            _ => Self::System,
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(0), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(999), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(1001), ErrorCategory::Department);
        assert_eq!(ErrorCategory::from_code(2003), ErrorCategory::Job);
        assert_eq!(ErrorCategory::from_code(3002), ErrorCategory::Employee);
        assert_eq!(ErrorCategory::from_code(4001), ErrorCategory::Directory);
        assert_eq!(ErrorCategory::from_code(5001), ErrorCategory::Personnel);
        assert_eq!(ErrorCategory::from_code(7000), ErrorCategory::System);
        assert_eq!(ErrorCategory::from_code(9001), ErrorCategory::System);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::InvalidFormat.category(), ErrorCategory::General);
        assert_eq!(
            ErrorCode::DepartmentHasJobs.category(),
            ErrorCategory::Department
        );
        assert_eq!(ErrorCode::JobCodeExists.category(), ErrorCategory::Job);
        assert_eq!(
            ErrorCode::EmployeeEmailExists.category(),
            ErrorCategory::Employee
        );
        assert_eq!(ErrorCode::DatabaseError.category(), ErrorCategory::System);
    }

    #[test]
    fn test_category_serialize() {
        let json = serde_json::to_string(&ErrorCategory::Directory).unwrap();
        assert_eq!(json, "\"directory\"");

        let category: ErrorCategory = serde_json::from_str("\"system\"").unwrap();
        assert_eq!(category, ErrorCategory::System);
    }
}
