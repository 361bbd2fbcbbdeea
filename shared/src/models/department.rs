//! Department Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Department entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Department {
    pub department_id: i64,
    /// Two-digit numeric code, unique
    pub department_code: String,
    /// Unique display name
    pub department_name: String,
}

/// Create department payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DepartmentCreate {
    #[validate(length(min = 1, max = 20))]
    pub department_code: String,
    #[validate(length(min = 1, max = 100))]
    pub department_name: String,
}

/// Update department payload (full replace of editable fields)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DepartmentUpdate {
    #[validate(length(min = 1, max = 20))]
    pub department_code: String,
    #[validate(length(min = 1, max = 100))]
    pub department_name: String,
}
