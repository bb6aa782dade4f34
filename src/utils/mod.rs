//! Utility modules
//!
//! Error types and result types shared by the whole crate.

pub mod error;

// Re-export commonly used items
pub use error::{CalsError, CalsResult, ConfigError, StructureError, WriteError};
