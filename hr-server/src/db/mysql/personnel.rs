//! Personnel Repository (MySQL)

use shared::models::{PersonnelCreate, PersonnelRecord};
use sqlx::MySqlPool;

use crate::db::RepoResult;

pub async fn create(pool: &MySqlPool, data: PersonnelCreate) -> RepoResult<PersonnelRecord> {
    let done = sqlx::query(
        r#"
        INSERT INTO personnel (first_name, last_name, birthday, salary, hire_date, department)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&data.first_name)
    .bind(&data.last_name)
    .bind(data.birthday)
    .bind(data.salary)
    .bind(data.hire_date)
    .bind(&data.department)
    .execute(pool)
    .await?;
    Ok(PersonnelRecord::from_create(done.last_insert_id() as i64, data))
}
