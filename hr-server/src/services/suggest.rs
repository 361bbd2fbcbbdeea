//! Code suggestions
//!
//! Each suggestion reads a snapshot of existing codes from the store and
//! runs it through [`shared::sequence`]. Nothing is reserved: the value is
//! a prefill for the create form, and the unique constraints on insert
//! settle any race between two callers.

use shared::error::{AppError, AppResult, ErrorCode};
use shared::sequence::{next_department_code, next_employee_code, next_job_code};

use crate::db::HrStore;

/// Next department code across all departments.
pub async fn suggest_department_code(store: &dyn HrStore) -> AppResult<String> {
    let codes = store.department_codes().await?;
    let next = next_department_code(&codes);
    tracing::debug!(existing = codes.len(), next_code = %next, "Suggested department code");
    Ok(next)
}

/// Next job code within one department.
///
/// An unknown department has no jobs, so this yields `"01"` rather than an error.
pub async fn suggest_job_code(store: &dyn HrStore, department_id: i64) -> AppResult<String> {
    let codes = store.job_codes(department_id).await?;
    let next = next_job_code(&codes);
    tracing::debug!(department_id, existing = codes.len(), next_code = %next, "Suggested job code");
    Ok(next)
}

/// Next employee code for a job: department code + job code + serial.
pub async fn suggest_employee_code(store: &dyn HrStore, job_id: i64) -> AppResult<String> {
    let prefix = store
        .code_prefix_for_job(job_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::JobNotFound).with_detail("id", job_id))?
        .as_prefix();
    let codes = store.employee_codes_with_prefix(&prefix).await?;
    let next = next_employee_code(&prefix, &codes);
    tracing::debug!(job_id, prefix = %prefix, next_code = %next, "Suggested employee code");
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::MemoryStore;
    use shared::models::{DepartmentCreate, EmployeeCreate, JobTitleCreate};

    async fn seed_department(store: &MemoryStore, code: &str) -> i64 {
        store
            .create_department(DepartmentCreate {
                department_code: code.into(),
                department_name: format!("Department {code}"),
            })
            .await
            .unwrap()
            .department_id
    }

    async fn seed_job(store: &MemoryStore, department_id: i64, code: &str) -> i64 {
        store
            .create_job(JobTitleCreate {
                job_code: code.into(),
                job_title: format!("Job {code}"),
                department_id,
            })
            .await
            .unwrap()
            .job_id
    }

    async fn seed_employee(store: &MemoryStore, job_id: i64, code: &str) {
        store
            .create_employee(EmployeeCreate {
                employee_code: code.into(),
                first_name: "Test".into(),
                last_name: code.into(),
                email: format!("{code}@example.com"),
                job_id,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_department_code_from_store() {
        let store = MemoryStore::new();
        assert_eq!(suggest_department_code(&store).await.unwrap(), "01");
        for code in ["01", "02", "04"] {
            seed_department(&store, code).await;
        }
        assert_eq!(suggest_department_code(&store).await.unwrap(), "05");
    }

    #[tokio::test]
    async fn test_job_code_scoped_to_department() {
        let store = MemoryStore::new();
        let finance = seed_department(&store, "01").await;
        let sales = seed_department(&store, "02").await;
        for code in ["01", "02", "03"] {
            seed_job(&store, finance, code).await;
        }
        assert_eq!(suggest_job_code(&store, finance).await.unwrap(), "04");
        assert_eq!(suggest_job_code(&store, sales).await.unwrap(), "01");
    }

    #[tokio::test]
    async fn test_employee_code_continues_prefix() {
        let store = MemoryStore::new();
        let dept = seed_department(&store, "01").await;
        let job = seed_job(&store, dept, "05").await;
        let other = seed_job(&store, dept, "06").await;
        seed_employee(&store, job, "0105001").await;
        seed_employee(&store, job, "0105002").await;
        seed_employee(&store, other, "0106009").await;

        assert_eq!(suggest_employee_code(&store, job).await.unwrap(), "0105003");
        assert_eq!(suggest_employee_code(&store, other).await.unwrap(), "0106010");
    }

    #[tokio::test]
    async fn test_employee_code_unknown_job() {
        let store = MemoryStore::new();
        let err = suggest_employee_code(&store, 42).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::JobNotFound);
        assert_eq!(err.message, "Job not found");
    }

    #[tokio::test]
    async fn test_suggestion_race_is_settled_by_insert() {
        let store = MemoryStore::new();
        let dept = seed_department(&store, "01").await;
        let job = seed_job(&store, dept, "05").await;

        let first = suggest_employee_code(&store, job).await.unwrap();
        let second = suggest_employee_code(&store, job).await.unwrap();
        assert_eq!(first, second);

        seed_employee(&store, job, &first).await;
        let err = store
            .create_employee(EmployeeCreate {
                employee_code: second,
                first_name: "Late".into(),
                last_name: "Comer".into(),
                email: "late@example.com".into(),
                job_id: job,
            })
            .await
            .unwrap_err();
        let err: AppError = err.into();
        assert_eq!(err.code, ErrorCode::EmployeeCodeExists);
    }
}
