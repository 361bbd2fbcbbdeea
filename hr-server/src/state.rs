//! Application state shared by all handlers

use std::sync::Arc;

use crate::config::{Config, StorageKind};
use crate::db::memory::MemoryStore;
use crate::db::mysql::MySqlStore;
use crate::db::{DirectoryStore, HrStore, PersonnelStore};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Departments, job titles and employees
    pub hr: Arc<dyn HrStore>,
    /// Flat employee directory
    pub directory: Arc<dyn DirectoryStore>,
    /// Personnel intake
    pub personnel: Arc<dyn PersonnelStore>,
}

impl AppState {
    /// Build state for the configured storage backend
    pub async fn from_config(config: &Config) -> Result<Self, BoxError> {
        match config.storage {
            StorageKind::MySql => {
                let store = Arc::new(MySqlStore::connect(&config.database).await?);
                Ok(Self::with_store(store))
            }
            StorageKind::Memory => {
                tracing::warn!("Using in-memory storage, data is lost on restart");
                Ok(Self::in_memory())
            }
        }
    }

    /// Fresh in-memory state
    pub fn in_memory() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()))
    }

    fn with_store<S>(store: Arc<S>) -> Self
    where
        S: HrStore + DirectoryStore + PersonnelStore + 'static,
    {
        Self {
            hr: store.clone(),
            directory: store.clone(),
            personnel: store,
        }
    }
}
