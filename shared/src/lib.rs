//! Shared types for the staff registry
//!
//! Domain models, the unified error system and the hierarchical code
//! generator used by `hr-server`.

pub mod error;
pub mod models;
pub mod sequence;
pub mod util;
