//! Error types and API response structures

use super::codes::ErrorCode;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// This is the primary error type across the workspace, providing:
/// - Standardized error codes via [`ErrorCode`]
/// - Human-readable messages
/// - Optional structured details (offending field, resource name)
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (field-level errors, context, etc.)
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create a conflict error
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::AlreadyExists, msg)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let field_errors = errors.field_errors();
        let mut fields: Vec<&str> = field_errors.keys().map(|k| k.as_ref()).collect();
        fields.sort_unstable();
        let message = format!("Invalid fields: {}", fields.join(", "));
        Self::validation(message).with_detail("fields", fields)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonSyntaxError(e) => Self::new(ErrorCode::InvalidFormat)
                .with_detail("reason", e.body_text()),
            JsonRejection::JsonDataError(e) => {
                Self::with_message(ErrorCode::InvalidFormat, e.body_text())
            }
            other => Self::with_message(ErrorCode::InvalidRequest, other.body_text()),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::with_message(ErrorCode::InvalidRequest, rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::with_message(ErrorCode::InvalidRequest, rejection.body_text())
    }
}

/// Error envelope returned by every failing endpoint
///
/// - `code`: numeric [`ErrorCode`]
/// - `message`: human-readable message
/// - `details`: offending field, id or index, when known
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl ApiResponse {
    /// Create an error response from an AppError
    pub fn error(err: &AppError) -> Self {
        Self {
            code: err.code.code(),
            message: err.message.clone(),
            details: err.details.clone(),
        }
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = self.http_status();
        let body = ApiResponse::error(&self);

        // Log system errors
        if matches!(self.code.category(), super::category::ErrorCategory::System) {
            tracing::error!(
                code = %self.code,
                message = %self.message,
                "System error occurred"
            );
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::JobNotFound);
        assert_eq!(err.code, ErrorCode::JobNotFound);
        assert_eq!(err.message, "Job not found");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_app_error_with_detail() {
        let err = AppError::new(ErrorCode::EmployeeCodeExists).with_detail("field", "employee_code");

        assert_eq!(err.code, ErrorCode::EmployeeCodeExists);
        let details = err.details.unwrap();
        assert_eq!(details.get("field").unwrap(), "employee_code");
    }

    #[test]
    fn test_app_error_http_status() {
        assert_eq!(
            AppError::new(ErrorCode::EmployeeNotFound).http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::new(ErrorCode::EmployeeEmailExists).http_status(),
            StatusCode::CONFLICT
        );
    }

    #[derive(Validate)]
    struct SignupForm {
        #[validate(length(min = 1))]
        name: String,
        #[validate(email)]
        email: String,
    }

    #[test]
    fn test_from_validation_errors_lists_fields() {
        let form = SignupForm {
            name: String::new(),
            email: "not-an-email".into(),
        };
        let err: AppError = form.validate().unwrap_err().into();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.message, "Invalid fields: email, name");
    }

    #[test]
    fn test_api_response_error() {
        let err = AppError::new(ErrorCode::JobCodeExists).with_detail("field", "job_code");
        let response = ApiResponse::error(&err);

        assert_eq!(response.code, 2002);
        assert_eq!(
            response.message,
            "This job code may already exist in this department."
        );
        assert!(response.details.is_some());
    }

    #[test]
    fn test_api_response_serialize() {
        let response = ApiResponse::error(&AppError::new(ErrorCode::DirectoryFilterEmpty));
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"code\":4003"));
        assert!(!json.contains("details"));
    }

    async fn reject<T>(request: http::Request<axum::body::Body>) -> AppError
    where
        T: serde::de::DeserializeOwned,
    {
        use axum::extract::FromRequest;
        match axum::Json::<T>::from_request(request, &()).await {
            Ok(_) => panic!("body should have been rejected"),
            Err(rejection) => rejection.into(),
        }
    }

    fn json_request(body: &'static str) -> http::Request<axum::body::Body> {
        http::Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(axum::body::Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_json_syntax_rejection_is_invalid_format() {
        let err = reject::<Value>(json_request("[{oops")).await;
        assert_eq!(err.code, ErrorCode::InvalidFormat);
        assert_eq!(err.message, "Invalid JSON format!");
        assert!(err.details.unwrap().contains_key("reason"));
        assert_eq!(err.code.http_status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_json_shape_rejection_is_invalid_format() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Named {
            name: String,
        }
        let err = reject::<Named>(json_request(r#"{"name": 5}"#)).await;
        assert_eq!(err.code, ErrorCode::InvalidFormat);
    }

    #[tokio::test]
    async fn test_missing_content_type_is_invalid_request() {
        let request = http::Request::builder()
            .method("POST")
            .uri("/")
            .body(axum::body::Body::from("{}"))
            .unwrap();
        let err = reject::<Value>(request).await;
        assert_eq!(err.code, ErrorCode::InvalidRequest);
    }
}
