//! Job Title Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Job title entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct JobTitle {
    pub job_id: i64,
    /// Two-digit numeric code, unique within the department
    pub job_code: String,
    pub job_title: String,
    pub department_id: i64,
}

/// Job title joined with its department (listing view)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct JobListing {
    pub job_id: i64,
    pub job_code: String,
    pub job_title: String,
    pub department_id: i64,
    pub department_name: String,
    pub department_code: String,
}

/// Minimal job entry for department-scoped pickers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct JobOption {
    pub job_id: i64,
    pub job_title: String,
}

/// Create job title payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct JobTitleCreate {
    #[validate(length(min = 1, max = 20))]
    pub job_code: String,
    #[validate(length(min = 1, max = 100))]
    pub job_title: String,
    pub department_id: i64,
}

/// Update job title payload (full replace of editable fields)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct JobTitleUpdate {
    #[validate(length(min = 1, max = 20))]
    pub job_code: String,
    #[validate(length(min = 1, max = 100))]
    pub job_title: String,
    pub department_id: i64,
}
