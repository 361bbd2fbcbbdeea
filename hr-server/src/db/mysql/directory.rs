//! Directory Repository (MySQL)
//!
//! Batch filters and patches are typed, so every statement is assembled
//! with [`QueryBuilder`] and bound parameters only.

use shared::models::{DirectoryEntry, DirectoryEntryInput, DirectoryFilter, DirectoryPatch};
use shared::util::{snowflake_batch, snowflake_id};
use sqlx::mysql::MySqlQueryResult;
use sqlx::{MySql, MySqlConnection, MySqlPool, QueryBuilder};

use super::is_unique_violation;
use crate::db::{Entity, RepoError, RepoResult, escape_like};

const COLUMNS: &str = "id, employee_id, name, department, position, age, status";

pub async fn search(pool: &MySqlPool, query: Option<&str>) -> RepoResult<Vec<DirectoryEntry>> {
    let mut qb = QueryBuilder::<MySql>::new(format!("SELECT {COLUMNS} FROM directory_employees"));
    if let Some(q) = query.filter(|q| !q.is_empty()) {
        let pattern = format!("%{}%", escape_like(&q.to_lowercase()));
        qb.push(" WHERE ");
        let mut any = qb.separated(" OR ");
        for column in ["employee_id", "name", "department", "position", "status"] {
            any.push(format!("LOWER({column}) LIKE "));
            any.push_bind_unseparated(pattern.clone());
        }
    }
    qb.push(" ORDER BY employee_id, id");
    let entries = qb.build_query_as::<DirectoryEntry>().fetch_all(pool).await?;
    Ok(entries)
}

pub async fn find_by_id(pool: &MySqlPool, id: i64) -> RepoResult<Option<DirectoryEntry>> {
    let entry = sqlx::query_as::<_, DirectoryEntry>(&format!(
        "SELECT {COLUMNS} FROM directory_employees WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(entry)
}

/// Insert all entries in one transaction.
///
/// Ids are distinct within the batch. An id already taken by a stored row
/// is redrawn up to [`ID_REDRAWS`] times.
pub async fn insert_many(pool: &MySqlPool, entries: Vec<DirectoryEntryInput>) -> RepoResult<u64> {
    if entries.is_empty() {
        return Ok(0);
    }
    let ids = snowflake_batch(entries.len());
    let mut tx = pool.begin().await?;
    let mut inserted = 0;
    for (mut id, entry) in ids.into_iter().zip(&entries) {
        let mut redraws = 0;
        let done = loop {
            match insert_entry(&mut *tx, id, entry).await {
                Err(e) if is_unique_violation(&e) && redraws < ID_REDRAWS => {
                    tracing::debug!(id, "Directory id taken, redrawing");
                    redraws += 1;
                    id = snowflake_id();
                }
                result => break result?,
            }
        };
        inserted += done.rows_affected();
    }
    tx.commit().await?;
    Ok(inserted)
}

const ID_REDRAWS: u32 = 3;

async fn insert_entry(
    conn: &mut MySqlConnection,
    id: i64,
    entry: &DirectoryEntryInput,
) -> Result<MySqlQueryResult, sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO directory_employees (id, employee_id, name, department, position, age, status)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(&entry.employee_id)
    .bind(&entry.name)
    .bind(&entry.department)
    .bind(&entry.position)
    .bind(entry.age)
    .bind(&entry.status)
    .execute(conn)
    .await
}

/// Rows whose values already equal the patch are not counted.
pub async fn update_many(
    pool: &MySqlPool,
    filter: &DirectoryFilter,
    patch: &DirectoryPatch,
) -> RepoResult<u64> {
    if patch.is_empty() {
        return Err(RepoError::Validation("Update must set at least one field".into()));
    }
    let values = patch_values(patch);
    let mut qb = QueryBuilder::<MySql>::new("UPDATE directory_employees SET ");
    for (i, (column, value)) in values.iter().enumerate() {
        if i > 0 {
            qb.push(", ");
        }
        qb.push(format!("{column} = "));
        push_value(&mut qb, value.clone());
    }
    push_filter(&mut qb, filter);

    // Only touch rows where at least one patched column differs
    qb.push(" AND NOT (");
    for (i, (column, value)) in values.into_iter().enumerate() {
        if i > 0 {
            qb.push(" AND ");
        }
        qb.push(format!("{column} <=> "));
        push_value(&mut qb, value);
    }
    qb.push(")");

    let done = qb.build().execute(pool).await?;
    Ok(done.rows_affected())
}

pub async fn delete_many(pool: &MySqlPool, filter: &DirectoryFilter) -> RepoResult<u64> {
    let mut qb = QueryBuilder::<MySql>::new("DELETE FROM directory_employees");
    push_filter(&mut qb, filter);
    let done = qb.build().execute(pool).await?;
    Ok(done.rows_affected())
}

pub async fn replace(pool: &MySqlPool, id: i64, data: DirectoryEntryInput) -> RepoResult<DirectoryEntry> {
    sqlx::query(
        r#"
        UPDATE directory_employees
        SET employee_id = ?, name = ?, department = ?, position = ?, age = ?, status = ?
        WHERE id = ?
        "#,
    )
    .bind(&data.employee_id)
    .bind(&data.name)
    .bind(&data.department)
    .bind(&data.position)
    .bind(data.age)
    .bind(&data.status)
    .bind(id)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(Entity::DirectoryEntry, id))
}

#[derive(Clone)]
enum QueryValue {
    Text(String),
    Int(i32),
}

fn push_value(qb: &mut QueryBuilder<'_, MySql>, value: QueryValue) {
    match value {
        QueryValue::Text(s) => qb.push_bind(s),
        QueryValue::Int(n) => qb.push_bind(n),
    };
}

fn field_values(
    employee_id: &Option<String>,
    name: &Option<String>,
    department: &Option<String>,
    position: &Option<String>,
    age: Option<i32>,
    status: &Option<String>,
) -> Vec<(&'static str, QueryValue)> {
    let mut out = Vec::new();
    let text = [
        ("employee_id", employee_id),
        ("name", name),
        ("department", department),
        ("position", position),
    ];
    for (column, value) in text {
        if let Some(v) = value {
            out.push((column, QueryValue::Text(v.clone())));
        }
    }
    if let Some(age) = age {
        out.push(("age", QueryValue::Int(age)));
    }
    if let Some(v) = status {
        out.push(("status", QueryValue::Text(v.clone())));
    }
    out
}

fn patch_values(patch: &DirectoryPatch) -> Vec<(&'static str, QueryValue)> {
    field_values(
        &patch.employee_id,
        &patch.name,
        &patch.department,
        &patch.position,
        patch.age,
        &patch.status,
    )
}

/// Append `WHERE` with one equality per set filter field. An empty filter
/// yields `WHERE 1 = 1`; callers decide whether that is allowed.
fn push_filter(qb: &mut QueryBuilder<'_, MySql>, filter: &DirectoryFilter) {
    qb.push(" WHERE 1 = 1");
    let conditions = field_values(
        &filter.employee_id,
        &filter.name,
        &filter.department,
        &filter.position,
        filter.age,
        &filter.status,
    );
    for (column, value) in conditions {
        qb.push(format!(" AND {column} = "));
        push_value(qb, value);
    }
}
