//! Error types for the Quarry crate
//!
//! This module contains all error types that can be returned by coordinator
//! operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuarryError {
    #[error("Database connection error: {0}")]
    DatabaseConnection(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Query(#[from] query_core::QueryError),
}
