//! Directory Model
//!
//! Flat employee directory with keyword search and filter-driven batch
//! updates. Entries are independent of the department/job registry.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Directory entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DirectoryEntry {
    pub id: i64,
    pub employee_id: String,
    pub name: String,
    pub department: String,
    pub position: String,
    pub age: i32,
    pub status: String,
}

impl DirectoryEntry {
    pub fn from_input(id: i64, input: DirectoryEntryInput) -> Self {
        Self {
            id,
            employee_id: input.employee_id,
            name: input.name,
            department: input.department,
            position: input.position,
            age: input.age,
            status: input.status,
        }
    }

    /// Case-insensitive substring match over the searchable text fields.
    pub fn matches_query(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        [
            &self.employee_id,
            &self.name,
            &self.department,
            &self.position,
            &self.status,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Editable directory fields (batch add and single replace)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DirectoryEntryInput {
    #[validate(length(min = 1, max = 50))]
    pub employee_id: String,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub department: String,
    pub position: String,
    #[validate(range(min = 0, max = 200))]
    pub age: i32,
    pub status: String,
}

/// Equality filter over directory fields; unset fields match anything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DirectoryFilter {
    pub employee_id: Option<String>,
    pub name: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub age: Option<i32>,
    pub status: Option<String>,
}

impl DirectoryFilter {
    pub fn is_empty(&self) -> bool {
        self.employee_id.is_none()
            && self.name.is_none()
            && self.department.is_none()
            && self.position.is_none()
            && self.age.is_none()
            && self.status.is_none()
    }

    pub fn matches(&self, entry: &DirectoryEntry) -> bool {
        fn eq<T: PartialEq>(want: &Option<T>, have: &T) -> bool {
            want.as_ref().is_none_or(|w| w == have)
        }
        eq(&self.employee_id, &entry.employee_id)
            && eq(&self.name, &entry.name)
            && eq(&self.department, &entry.department)
            && eq(&self.position, &entry.position)
            && eq(&self.age, &entry.age)
            && eq(&self.status, &entry.status)
    }
}

/// Fields to set on every entry matched by a batch update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DirectoryPatch {
    pub employee_id: Option<String>,
    pub name: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub age: Option<i32>,
    pub status: Option<String>,
}

impl DirectoryPatch {
    pub fn is_empty(&self) -> bool {
        self.employee_id.is_none()
            && self.name.is_none()
            && self.department.is_none()
            && self.position.is_none()
            && self.age.is_none()
            && self.status.is_none()
    }

    /// Apply the patch; returns whether any field actually changed.
    pub fn apply(&self, entry: &mut DirectoryEntry) -> bool {
        fn set<T: PartialEq + Clone>(value: &Option<T>, slot: &mut T) -> bool {
            match value {
                Some(v) if v != slot => {
                    *slot = v.clone();
                    true
                }
                _ => false,
            }
        }
        let mut changed = set(&self.employee_id, &mut entry.employee_id);
        changed |= set(&self.name, &mut entry.name);
        changed |= set(&self.department, &mut entry.department);
        changed |= set(&self.position, &mut entry.position);
        changed |= set(&self.age, &mut entry.age);
        changed |= set(&self.status, &mut entry.status);
        changed
    }
}

/// Keyword search query string
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DirectorySearch {
    pub query: Option<String>,
}

/// Batch update request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryBatchUpdate {
    pub filter: DirectoryFilter,
    pub update: DirectoryPatch,
}

/// Batch delete request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryBatchDelete {
    pub filter: DirectoryFilter,
}

/// Number of entries inserted, modified or deleted by a batch operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchCount {
    pub count: u64,
}
