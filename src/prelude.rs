//! Convenience re-exports for common quarry usage

// Coordinator
pub use crate::core::Quarry;
pub use crate::errors::QuarryError;

// Configuration
pub use config::{AppConfig, DatabaseConfig};

// Core working set
pub use query_core::prelude::*;
