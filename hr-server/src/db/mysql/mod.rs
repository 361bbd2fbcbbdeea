//! MySQL storage via sqlx
//!
//! Tables: `Departments`, `Job_Titles`, `Employees`, `directory_employees`
//! and `personnel`. Each table has a module of free functions over the
//! pool; [`MySqlStore`] wires them into the store traits.

mod departments;
mod directory;
mod employees;
mod jobs;
mod personnel;

use async_trait::async_trait;
use shared::models::{
    CodePrefix, Department, DepartmentCreate, DepartmentUpdate, DirectoryEntry,
    DirectoryEntryInput, DirectoryFilter, DirectoryPatch, Employee, EmployeeCreate,
    EmployeeDetail, EmployeeListing, EmployeeUpdate, JobListing, JobOption, JobTitle,
    JobTitleCreate, JobTitleUpdate, PersonnelCreate, PersonnelRecord,
};
use sqlx::MySqlPool;
use sqlx::mysql::MySqlPoolOptions;

use super::{DirectoryStore, HrStore, PersonnelStore, RepoResult};
use crate::config::DatabaseConfig;

/// MySQL-backed store
#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    /// Open the connection pool
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        tracing::info!(
            host = %config.host,
            port = config.port,
            database = %config.database,
            max_connections = config.max_connections,
            "Connecting to MySQL"
        );
        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(config.connect_options())
            .await?;
        Ok(Self { pool })
    }
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

pub(crate) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_foreign_key_violation())
}

#[async_trait]
impl HrStore for MySqlStore {
    async fn list_departments(&self) -> RepoResult<Vec<Department>> {
        departments::find_all(&self.pool).await
    }

    async fn find_department(&self, id: i64) -> RepoResult<Option<Department>> {
        departments::find_by_id(&self.pool, id).await
    }

    async fn create_department(&self, data: DepartmentCreate) -> RepoResult<Department> {
        departments::create(&self.pool, data).await
    }

    async fn update_department(&self, id: i64, data: DepartmentUpdate) -> RepoResult<Department> {
        departments::update(&self.pool, id, data).await
    }

    async fn delete_department(&self, id: i64) -> RepoResult<()> {
        departments::delete(&self.pool, id).await
    }

    async fn department_codes(&self) -> RepoResult<Vec<String>> {
        departments::codes(&self.pool).await
    }

    async fn list_jobs(&self) -> RepoResult<Vec<JobListing>> {
        jobs::find_all(&self.pool).await
    }

    async fn jobs_in_department(&self, department_id: i64) -> RepoResult<Vec<JobOption>> {
        jobs::find_by_department(&self.pool, department_id).await
    }

    async fn find_job(&self, id: i64) -> RepoResult<Option<JobTitle>> {
        jobs::find_by_id(&self.pool, id).await
    }

    async fn create_job(&self, data: JobTitleCreate) -> RepoResult<JobTitle> {
        jobs::create(&self.pool, data).await
    }

    async fn update_job(&self, id: i64, data: JobTitleUpdate) -> RepoResult<JobTitle> {
        jobs::update(&self.pool, id, data).await
    }

    async fn delete_job(&self, id: i64) -> RepoResult<()> {
        jobs::delete(&self.pool, id).await
    }

    async fn job_codes(&self, department_id: i64) -> RepoResult<Vec<String>> {
        jobs::codes(&self.pool, department_id).await
    }

    async fn code_prefix_for_job(&self, job_id: i64) -> RepoResult<Option<CodePrefix>> {
        jobs::code_prefix(&self.pool, job_id).await
    }

    async fn list_employees(&self) -> RepoResult<Vec<EmployeeListing>> {
        employees::find_all(&self.pool).await
    }

    async fn find_employee(&self, id: i64) -> RepoResult<Option<EmployeeDetail>> {
        employees::find_detail(&self.pool, id).await
    }

    async fn create_employee(&self, data: EmployeeCreate) -> RepoResult<Employee> {
        employees::create(&self.pool, data).await
    }

    async fn update_employee(&self, id: i64, data: EmployeeUpdate) -> RepoResult<Employee> {
        employees::update(&self.pool, id, data).await
    }

    async fn delete_employee(&self, id: i64) -> RepoResult<()> {
        employees::delete(&self.pool, id).await
    }

    async fn employee_codes_with_prefix(&self, prefix: &str) -> RepoResult<Vec<String>> {
        employees::codes_with_prefix(&self.pool, prefix).await
    }
}

#[async_trait]
impl DirectoryStore for MySqlStore {
    async fn search(&self, query: Option<&str>) -> RepoResult<Vec<DirectoryEntry>> {
        directory::search(&self.pool, query).await
    }

    async fn find_entry(&self, id: i64) -> RepoResult<Option<DirectoryEntry>> {
        directory::find_by_id(&self.pool, id).await
    }

    async fn insert_many(&self, entries: Vec<DirectoryEntryInput>) -> RepoResult<u64> {
        directory::insert_many(&self.pool, entries).await
    }

    async fn update_many(&self, filter: &DirectoryFilter, patch: &DirectoryPatch) -> RepoResult<u64> {
        directory::update_many(&self.pool, filter, patch).await
    }

    async fn delete_many(&self, filter: &DirectoryFilter) -> RepoResult<u64> {
        directory::delete_many(&self.pool, filter).await
    }

    async fn replace_entry(&self, id: i64, data: DirectoryEntryInput) -> RepoResult<DirectoryEntry> {
        directory::replace(&self.pool, id, data).await
    }
}

#[async_trait]
impl PersonnelStore for MySqlStore {
    async fn insert_personnel(&self, data: PersonnelCreate) -> RepoResult<PersonnelRecord> {
        personnel::create(&self.pool, data).await
    }
}
