//! Convenience re-exports for common query-core usage

// Core traits
pub use crate::traits::{Entity, Page, ResourceStore};

// Error types
pub use crate::errors::QueryError;

// Specification building
pub use crate::options::{Filter, FilterOperator, FilterValue, JoinScope, ResourceOptions, SortOrder};

// Request decoding
pub use crate::decode::RequestQuery;

// Schema definition
pub use crate::schema::{EntityDef, Relation, SchemaRegistry};

// Repositories
pub use crate::repository::Repository;

// Validation
pub use crate::validation::{ValidatedIdentifier, ValidationError};

// Common external dependencies that are frequently used
pub use async_trait::async_trait;
pub use indexmap::IndexMap;
pub use sqlx::{FromRow, PgPool};
pub use uuid::Uuid;
