//! Employee Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Employee entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Employee {
    pub employee_id: i64,
    /// `<department_code><job_code><serial>`, globally unique
    pub employee_code: String,
    pub first_name: String,
    pub last_name: String,
    /// Unique
    pub email: String,
    pub job_id: i64,
}

/// Employee joined with job and department (listing view)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct EmployeeListing {
    pub employee_id: i64,
    pub employee_code: String,
    /// `first_name + " " + last_name`
    pub employee_name: String,
    pub job_code: String,
    pub department_code: String,
}

/// Employee with the department of its job, for edit forms
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeDetail {
    #[serde(flatten)]
    pub employee: Employee,
    /// `None` when the job no longer resolves to a department
    pub department_id: Option<i64>,
}

/// Department and job code pair an employee code starts with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CodePrefix {
    pub department_code: String,
    pub job_code: String,
}

impl CodePrefix {
    pub fn as_prefix(&self) -> String {
        crate::sequence::employee_code_prefix(&self.department_code, &self.job_code)
    }
}

/// Create employee payload
///
/// `employee_code` is whatever the submitter confirmed; the suggested
/// value is only a prefill.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EmployeeCreate {
    #[validate(length(min = 1, max = 20))]
    pub employee_code: String,
    #[validate(length(min = 1, max = 50))]
    pub first_name: String,
    #[validate(length(min = 1, max = 50))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    pub job_id: i64,
}

/// Update employee payload; the employee code is read-only after creation
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EmployeeUpdate {
    #[validate(length(min = 1, max = 50))]
    pub first_name: String,
    #[validate(length(min = 1, max = 50))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    pub job_id: i64,
}
