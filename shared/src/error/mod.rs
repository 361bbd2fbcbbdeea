//! Unified error system for the staff registry
//!
//! This module provides:
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//! - [`ApiResponse`]: Error envelope returned to clients
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Department errors
//! - 2xxx: Job title errors
//! - 3xxx: Employee errors
//! - 4xxx: Directory errors
//! - 5xxx: Personnel intake errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, ApiResponse};
//!
//! let err = AppError::new(ErrorCode::EmployeeCodeExists)
//!     .with_detail("field", "employee_code");
//!
//! let response = ApiResponse::error(&err);
//! assert_eq!(response.code, 3002);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
