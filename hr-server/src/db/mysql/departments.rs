//! Department Repository (MySQL)

use shared::models::{Department, DepartmentCreate, DepartmentUpdate};
use sqlx::MySqlPool;

use super::{is_foreign_key_violation, is_unique_violation};
use crate::db::{Entity, RepoError, RepoResult, UniqueField};

const COLUMNS: &str = "department_id, department_code, department_name";

pub async fn find_all(pool: &MySqlPool) -> RepoResult<Vec<Department>> {
    let departments = sqlx::query_as::<_, Department>(&format!(
        "SELECT {COLUMNS} FROM Departments ORDER BY department_code"
    ))
    .fetch_all(pool)
    .await?;
    Ok(departments)
}

pub async fn find_by_id(pool: &MySqlPool, id: i64) -> RepoResult<Option<Department>> {
    let department = sqlx::query_as::<_, Department>(&format!(
        "SELECT {COLUMNS} FROM Departments WHERE department_id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(department)
}

pub async fn codes(pool: &MySqlPool) -> RepoResult<Vec<String>> {
    let codes = sqlx::query_scalar::<_, String>("SELECT department_code FROM Departments")
        .fetch_all(pool)
        .await?;
    Ok(codes)
}

pub async fn create(pool: &MySqlPool, data: DepartmentCreate) -> RepoResult<Department> {
    let result = sqlx::query("INSERT INTO Departments (department_code, department_name) VALUES (?, ?)")
        .bind(&data.department_code)
        .bind(&data.department_name)
        .execute(pool)
        .await;
    match result {
        Ok(done) => find_by_id(pool, done.last_insert_id() as i64)
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create department".into())),
        Err(e) if is_unique_violation(&e) => Err(RepoError::Duplicate(
            conflicting_field(pool, &data.department_code, &data.department_name, None).await?,
        )),
        Err(e) => Err(e.into()),
    }
}

pub async fn update(pool: &MySqlPool, id: i64, data: DepartmentUpdate) -> RepoResult<Department> {
    let result = sqlx::query(
        "UPDATE Departments SET department_code = ?, department_name = ? WHERE department_id = ?",
    )
    .bind(&data.department_code)
    .bind(&data.department_name)
    .bind(id)
    .execute(pool)
    .await;
    if let Err(e) = result {
        if is_unique_violation(&e) {
            return Err(RepoError::Duplicate(
                conflicting_field(pool, &data.department_code, &data.department_name, Some(id))
                    .await?,
            ));
        }
        return Err(e.into());
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(Entity::Department, id))
}

pub async fn delete(pool: &MySqlPool, id: i64) -> RepoResult<()> {
    let jobs = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM Job_Titles WHERE department_id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;
    if jobs > 0 {
        return Err(RepoError::InUse(Entity::Department, id));
    }
    let result = sqlx::query("DELETE FROM Departments WHERE department_id = ?")
        .bind(id)
        .execute(pool)
        .await;
    match result {
        Ok(done) if done.rows_affected() == 0 => {
            Err(RepoError::NotFound(Entity::Department, id))
        }
        Ok(_) => Ok(()),
        // A job was inserted between the count and the delete
        Err(e) if is_foreign_key_violation(&e) => Err(RepoError::InUse(Entity::Department, id)),
        Err(e) => Err(e.into()),
    }
}

/// Find which unique column collides with the submitted values.
async fn conflicting_field(
    pool: &MySqlPool,
    code: &str,
    name: &str,
    exclude_id: Option<i64>,
) -> RepoResult<Option<UniqueField>> {
    let exclude = exclude_id.unwrap_or(0);
    let code_taken = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM Departments WHERE department_code = ? AND department_id <> ?",
    )
    .bind(code)
    .bind(exclude)
    .fetch_one(pool)
    .await?;
    if code_taken > 0 {
        return Ok(Some(UniqueField::DepartmentCode));
    }
    let name_taken = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM Departments WHERE department_name = ? AND department_id <> ?",
    )
    .bind(name)
    .bind(exclude)
    .fetch_one(pool)
    .await?;
    Ok((name_taken > 0).then_some(UniqueField::DepartmentName))
}
