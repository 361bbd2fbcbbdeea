//! Employee Repository (MySQL)

use shared::models::{Employee, EmployeeCreate, EmployeeDetail, EmployeeListing, EmployeeUpdate};
use sqlx::MySqlPool;

use super::{is_foreign_key_violation, is_unique_violation};
use crate::db::{Entity, RepoError, RepoResult, UniqueField, escape_like};

const COLUMNS: &str = "employee_id, employee_code, first_name, last_name, email, job_id";

pub async fn find_all(pool: &MySqlPool) -> RepoResult<Vec<EmployeeListing>> {
    let employees = sqlx::query_as::<_, EmployeeListing>(
        r#"
        SELECT e.employee_id, e.employee_code,
               CONCAT(e.first_name, ' ', e.last_name) AS employee_name,
               jt.job_code, d.department_code
        FROM Employees e
        JOIN Job_Titles jt ON e.job_id = jt.job_id
        JOIN Departments d ON jt.department_id = d.department_id
        ORDER BY e.employee_code
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(employees)
}

#[derive(sqlx::FromRow)]
struct DetailRow {
    #[sqlx(flatten)]
    employee: Employee,
    department_id: Option<i64>,
}

pub async fn find_detail(pool: &MySqlPool, id: i64) -> RepoResult<Option<EmployeeDetail>> {
    let row = sqlx::query_as::<_, DetailRow>(
        r#"
        SELECT e.employee_id, e.employee_code, e.first_name, e.last_name, e.email, e.job_id,
               jt.department_id
        FROM Employees e
        LEFT JOIN Job_Titles jt ON e.job_id = jt.job_id
        WHERE e.employee_id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(|r| EmployeeDetail {
        employee: r.employee,
        department_id: r.department_id,
    }))
}

pub async fn find_by_id(pool: &MySqlPool, id: i64) -> RepoResult<Option<Employee>> {
    let employee = sqlx::query_as::<_, Employee>(&format!(
        "SELECT {COLUMNS} FROM Employees WHERE employee_id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(employee)
}

pub async fn codes_with_prefix(pool: &MySqlPool, prefix: &str) -> RepoResult<Vec<String>> {
    let codes = sqlx::query_scalar::<_, String>(
        "SELECT employee_code FROM Employees WHERE employee_code LIKE ?",
    )
    .bind(format!("{}%", escape_like(prefix)))
    .fetch_all(pool)
    .await?;
    Ok(codes)
}

pub async fn create(pool: &MySqlPool, data: EmployeeCreate) -> RepoResult<Employee> {
    ensure_job(pool, data.job_id).await?;
    let result = sqlx::query(
        r#"
        INSERT INTO Employees (employee_code, first_name, last_name, email, job_id)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&data.employee_code)
    .bind(&data.first_name)
    .bind(&data.last_name)
    .bind(&data.email)
    .bind(data.job_id)
    .execute(pool)
    .await;
    match result {
        Ok(done) => find_by_id(pool, done.last_insert_id() as i64)
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create employee".into())),
        Err(e) => Err(classify(pool, e, Some(&data.employee_code), &data.email, data.job_id, None).await),
    }
}

/// The employee code is never rewritten here.
pub async fn update(pool: &MySqlPool, id: i64, data: EmployeeUpdate) -> RepoResult<Employee> {
    if find_by_id(pool, id).await?.is_none() {
        return Err(RepoError::NotFound(Entity::Employee, id));
    }
    ensure_job(pool, data.job_id).await?;
    let result = sqlx::query(
        r#"
        UPDATE Employees SET first_name = ?, last_name = ?, email = ?, job_id = ?
        WHERE employee_id = ?
        "#,
    )
    .bind(&data.first_name)
    .bind(&data.last_name)
    .bind(&data.email)
    .bind(data.job_id)
    .bind(id)
    .execute(pool)
    .await;
    if let Err(e) = result {
        return Err(classify(pool, e, None, &data.email, data.job_id, Some(id)).await);
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(Entity::Employee, id))
}

pub async fn delete(pool: &MySqlPool, id: i64) -> RepoResult<()> {
    let done = sqlx::query("DELETE FROM Employees WHERE employee_id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if done.rows_affected() == 0 {
        return Err(RepoError::NotFound(Entity::Employee, id));
    }
    Ok(())
}

async fn ensure_job(pool: &MySqlPool, job_id: i64) -> RepoResult<()> {
    let exists = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM Job_Titles WHERE job_id = ?")
        .bind(job_id)
        .fetch_one(pool)
        .await?;
    if exists == 0 {
        return Err(RepoError::NotFound(Entity::Job, job_id));
    }
    Ok(())
}

/// Map a failed write to a tagged error, probing unique columns in order.
async fn classify(
    pool: &MySqlPool,
    err: sqlx::Error,
    employee_code: Option<&str>,
    email: &str,
    job_id: i64,
    exclude_id: Option<i64>,
) -> RepoError {
    if is_foreign_key_violation(&err) {
        return RepoError::NotFound(Entity::Job, job_id);
    }
    if !is_unique_violation(&err) {
        return err.into();
    }
    let exclude = exclude_id.unwrap_or(0);
    if let Some(code) = employee_code {
        match taken(pool, "employee_code", code, exclude).await {
            Ok(true) => return RepoError::Duplicate(Some(UniqueField::EmployeeCode)),
            Ok(false) => {}
            Err(e) => return e,
        }
    }
    match taken(pool, "email", email, exclude).await {
        Ok(true) => RepoError::Duplicate(Some(UniqueField::EmployeeEmail)),
        Ok(false) => RepoError::Duplicate(None),
        Err(e) => e,
    }
}

async fn taken(pool: &MySqlPool, column: &'static str, value: &str, exclude: i64) -> RepoResult<bool> {
    let count = sqlx::query_scalar::<_, i64>(&format!(
        "SELECT COUNT(*) FROM Employees WHERE {column} = ? AND employee_id <> ?"
    ))
    .bind(value)
    .bind(exclude)
    .fetch_one(pool)
    .await?;
    Ok(count > 0)
}
