//! hr-server - staff registry HTTP service
//!
//! - HR registry: departments, job titles, employees with code suggestions
//! - Employee directory: keyword search and batch edits
//! - Personnel intake

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod services;
pub mod state;

pub use config::Config;
pub use state::AppState;
