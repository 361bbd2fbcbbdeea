//! Storage access layer
//!
//! Handlers never talk to a driver directly: they receive the store traits
//! below through [`crate::state::AppState`]. Two implementations exist:
//! - [`mysql::MySqlStore`]: sqlx over a MySQL pool
//! - [`memory::MemoryStore`]: in-process maps with the same constraint rules

pub mod memory;
pub mod mysql;

use async_trait::async_trait;
use shared::models::{
    CodePrefix, Department, DepartmentCreate, DepartmentUpdate, DirectoryEntry,
    DirectoryEntryInput, DirectoryFilter, DirectoryPatch, Employee, EmployeeCreate,
    EmployeeDetail, EmployeeListing, EmployeeUpdate, JobListing, JobOption, JobTitle,
    JobTitleCreate, JobTitleUpdate, PersonnelCreate, PersonnelRecord,
};
use thiserror::Error;

/// Column guarded by a unique constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    DepartmentCode,
    DepartmentName,
    /// `(department_id, job_code)`
    JobCode,
    EmployeeCode,
    EmployeeEmail,
}

impl UniqueField {
    pub fn column(&self) -> &'static str {
        match self {
            Self::DepartmentCode => "department_code",
            Self::DepartmentName => "department_name",
            Self::JobCode => "job_code",
            Self::EmployeeCode => "employee_code",
            Self::EmployeeEmail => "email",
        }
    }
}

impl std::fmt::Display for UniqueField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.column())
    }
}

/// Row kinds that can be missing or still referenced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Department,
    Job,
    Employee,
    DirectoryEntry,
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Department => "Department",
            Self::Job => "Job",
            Self::Employee => "Employee",
            Self::DirectoryEntry => "Directory entry",
        })
    }
}

/// Repository error types
///
/// Writes report a tagged outcome: `Ok` on success, [`RepoError::Duplicate`]
/// when a unique constraint rejected the value, anything else otherwise.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("{0} {1} not found")]
    NotFound(Entity, i64),

    /// Unique constraint rejected the write. `None` when the colliding
    /// column could not be identified (the other row vanished meanwhile).
    #[error("Duplicate value for {}", .0.map_or("unique key", |f| f.column()))]
    Duplicate(Option<UniqueField>),

    /// Row is still referenced by dependent rows
    #[error("{0} {1} is still referenced")]
    InUse(Entity, i64),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Departments, job titles and employees
#[async_trait]
pub trait HrStore: Send + Sync {
    // ── Departments ──
    async fn list_departments(&self) -> RepoResult<Vec<Department>>;
    async fn find_department(&self, id: i64) -> RepoResult<Option<Department>>;
    async fn create_department(&self, data: DepartmentCreate) -> RepoResult<Department>;
    async fn update_department(&self, id: i64, data: DepartmentUpdate) -> RepoResult<Department>;
    /// Fails with [`RepoError::InUse`] while job titles reference the department
    async fn delete_department(&self, id: i64) -> RepoResult<()>;
    /// Every stored department code
    async fn department_codes(&self) -> RepoResult<Vec<String>>;

    // ── Job titles ──
    async fn list_jobs(&self) -> RepoResult<Vec<JobListing>>;
    async fn jobs_in_department(&self, department_id: i64) -> RepoResult<Vec<JobOption>>;
    async fn find_job(&self, id: i64) -> RepoResult<Option<JobTitle>>;
    async fn create_job(&self, data: JobTitleCreate) -> RepoResult<JobTitle>;
    async fn update_job(&self, id: i64, data: JobTitleUpdate) -> RepoResult<JobTitle>;
    /// Fails with [`RepoError::InUse`] while employees reference the job
    async fn delete_job(&self, id: i64) -> RepoResult<()>;
    /// Job codes belonging to one department
    async fn job_codes(&self, department_id: i64) -> RepoResult<Vec<String>>;
    /// Department and job code of a job, `None` if the job does not exist
    async fn code_prefix_for_job(&self, job_id: i64) -> RepoResult<Option<CodePrefix>>;

    // ── Employees ──
    async fn list_employees(&self) -> RepoResult<Vec<EmployeeListing>>;
    async fn find_employee(&self, id: i64) -> RepoResult<Option<EmployeeDetail>>;
    async fn create_employee(&self, data: EmployeeCreate) -> RepoResult<Employee>;
    async fn update_employee(&self, id: i64, data: EmployeeUpdate) -> RepoResult<Employee>;
    async fn delete_employee(&self, id: i64) -> RepoResult<()>;
    /// Employee codes starting with `prefix` (may over-fetch; callers re-filter)
    async fn employee_codes_with_prefix(&self, prefix: &str) -> RepoResult<Vec<String>>;
}

/// Flat employee directory
#[async_trait]
pub trait DirectoryStore: Send + Sync {
    /// All entries, or those matching `query` case-insensitively
    async fn search(&self, query: Option<&str>) -> RepoResult<Vec<DirectoryEntry>>;
    async fn find_entry(&self, id: i64) -> RepoResult<Option<DirectoryEntry>>;
    /// Returns the number of inserted entries
    async fn insert_many(&self, entries: Vec<DirectoryEntryInput>) -> RepoResult<u64>;
    /// Returns the number of entries actually modified
    async fn update_many(&self, filter: &DirectoryFilter, patch: &DirectoryPatch) -> RepoResult<u64>;
    /// Returns the number of deleted entries
    async fn delete_many(&self, filter: &DirectoryFilter) -> RepoResult<u64>;
    async fn replace_entry(&self, id: i64, data: DirectoryEntryInput) -> RepoResult<DirectoryEntry>;
}

/// Insert-only personnel intake
#[async_trait]
pub trait PersonnelStore: Send + Sync {
    async fn insert_personnel(&self, data: PersonnelCreate) -> RepoResult<PersonnelRecord>;
}

/// Escape `%`, `_` and `\` for a MySQL `LIKE` pattern.
pub(crate) fn escape_like(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
