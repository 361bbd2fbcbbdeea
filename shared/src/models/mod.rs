//! Data models
//!
//! Shared between the HTTP layer and the storage layer.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All surrogate keys are `i64`.

pub mod department;
pub mod directory;
pub mod employee;
pub mod job_title;
pub mod personnel;

// Re-exports
pub use department::*;
pub use directory::*;
pub use employee::*;
pub use job_title::*;
pub use personnel::*;

use serde::{Deserialize, Serialize};

/// Suggested next code for an add form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextCode {
    pub next_code: String,
}

impl NextCode {
    pub fn new(next_code: impl Into<String>) -> Self {
        Self {
            next_code: next_code.into(),
        }
    }
}
