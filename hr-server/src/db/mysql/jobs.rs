//! Job Title Repository (MySQL)

use shared::models::{CodePrefix, JobListing, JobOption, JobTitle, JobTitleCreate, JobTitleUpdate};
use sqlx::MySqlPool;

use super::{is_foreign_key_violation, is_unique_violation};
use crate::db::{Entity, RepoError, RepoResult, UniqueField};

const COLUMNS: &str = "job_id, job_code, job_title, department_id";

pub async fn find_all(pool: &MySqlPool) -> RepoResult<Vec<JobListing>> {
    let jobs = sqlx::query_as::<_, JobListing>(
        r#"
        SELECT jt.job_id, jt.job_code, jt.job_title, jt.department_id,
               d.department_name, d.department_code
        FROM Job_Titles jt
        JOIN Departments d ON jt.department_id = d.department_id
        ORDER BY d.department_code, jt.job_code
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(jobs)
}

pub async fn find_by_department(pool: &MySqlPool, department_id: i64) -> RepoResult<Vec<JobOption>> {
    let jobs = sqlx::query_as::<_, JobOption>(
        "SELECT job_id, job_title FROM Job_Titles WHERE department_id = ? ORDER BY job_title",
    )
    .bind(department_id)
    .fetch_all(pool)
    .await?;
    Ok(jobs)
}

pub async fn find_by_id(pool: &MySqlPool, id: i64) -> RepoResult<Option<JobTitle>> {
    let job = sqlx::query_as::<_, JobTitle>(&format!(
        "SELECT {COLUMNS} FROM Job_Titles WHERE job_id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(job)
}

pub async fn codes(pool: &MySqlPool, department_id: i64) -> RepoResult<Vec<String>> {
    let codes =
        sqlx::query_scalar::<_, String>("SELECT job_code FROM Job_Titles WHERE department_id = ?")
            .bind(department_id)
            .fetch_all(pool)
            .await?;
    Ok(codes)
}

pub async fn code_prefix(pool: &MySqlPool, job_id: i64) -> RepoResult<Option<CodePrefix>> {
    let prefix = sqlx::query_as::<_, CodePrefix>(
        r#"
        SELECT d.department_code, jt.job_code
        FROM Job_Titles jt
        JOIN Departments d ON jt.department_id = d.department_id
        WHERE jt.job_id = ?
        "#,
    )
    .bind(job_id)
    .fetch_optional(pool)
    .await?;
    Ok(prefix)
}

pub async fn create(pool: &MySqlPool, data: JobTitleCreate) -> RepoResult<JobTitle> {
    ensure_department(pool, data.department_id).await?;
    let result =
        sqlx::query("INSERT INTO Job_Titles (job_code, job_title, department_id) VALUES (?, ?, ?)")
            .bind(&data.job_code)
            .bind(&data.job_title)
            .bind(data.department_id)
            .execute(pool)
            .await;
    match result {
        Ok(done) => find_by_id(pool, done.last_insert_id() as i64)
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create job title".into())),
        Err(e) => Err(classify(pool, e, &data.job_code, data.department_id, None).await),
    }
}

pub async fn update(pool: &MySqlPool, id: i64, data: JobTitleUpdate) -> RepoResult<JobTitle> {
    if find_by_id(pool, id).await?.is_none() {
        return Err(RepoError::NotFound(Entity::Job, id));
    }
    ensure_department(pool, data.department_id).await?;
    let result = sqlx::query(
        "UPDATE Job_Titles SET job_code = ?, job_title = ?, department_id = ? WHERE job_id = ?",
    )
    .bind(&data.job_code)
    .bind(&data.job_title)
    .bind(data.department_id)
    .bind(id)
    .execute(pool)
    .await;
    if let Err(e) = result {
        return Err(classify(pool, e, &data.job_code, data.department_id, Some(id)).await);
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(Entity::Job, id))
}

pub async fn delete(pool: &MySqlPool, id: i64) -> RepoResult<()> {
    let employees = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM Employees WHERE job_id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;
    if employees > 0 {
        return Err(RepoError::InUse(Entity::Job, id));
    }
    let result = sqlx::query("DELETE FROM Job_Titles WHERE job_id = ?")
        .bind(id)
        .execute(pool)
        .await;
    match result {
        Ok(done) if done.rows_affected() == 0 => Err(RepoError::NotFound(Entity::Job, id)),
        Ok(_) => Ok(()),
        Err(e) if is_foreign_key_violation(&e) => {
            Err(RepoError::InUse(Entity::Job, id))
        }
        Err(e) => Err(e.into()),
    }
}

async fn ensure_department(pool: &MySqlPool, department_id: i64) -> RepoResult<()> {
    let exists = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM Departments WHERE department_id = ?",
    )
    .bind(department_id)
    .fetch_one(pool)
    .await?;
    if exists == 0 {
        return Err(RepoError::NotFound(Entity::Department, department_id));
    }
    Ok(())
}

async fn classify(
    pool: &MySqlPool,
    err: sqlx::Error,
    job_code: &str,
    department_id: i64,
    exclude_id: Option<i64>,
) -> RepoError {
    if is_foreign_key_violation(&err) {
        return RepoError::NotFound(Entity::Department, department_id);
    }
    if !is_unique_violation(&err) {
        return err.into();
    }
    let taken = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM Job_Titles WHERE department_id = ? AND job_code = ? AND job_id <> ?",
    )
    .bind(department_id)
    .bind(job_code)
    .bind(exclude_id.unwrap_or(0))
    .fetch_one(pool)
    .await;
    match taken {
        Ok(n) => RepoError::Duplicate((n > 0).then_some(UniqueField::JobCode)),
        Err(e) => e.into(),
    }
}
