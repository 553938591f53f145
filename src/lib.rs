//! # Quarry
//!
//! A declarative resource-query layer for PostgreSQL. HTTP-style request
//! parameters (pagination, sorting, relation eager-loading, filter
//! predicates) decode into a typed specification that compiles into
//! parameterized SQL over an explicit schema graph and executes through
//! sqlx.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use quarry::prelude::*;
//!
//! #[derive(Debug, Clone, sqlx::FromRow)]
//! pub struct Post {
//!     pub id: i64,
//!     pub title: String,
//!     pub status: String,
//!     pub author_id: i64,
//! }
//!
//! impl Entity for Post {
//!     fn table_name() -> &'static str {
//!         "posts"
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::new(
//!         "localhost".to_string(), 5432, "app".to_string(),
//!         "postgres".to_string(), "password".to_string(),
//!         1, 5, 30, 600, 3600,
//!     );
//!
//!     let mut registry = SchemaRegistry::new();
//!     registry.register(
//!         EntityDef::new("posts")
//!             .relation(Relation::belongs_to("author", "users", "author_id")),
//!     )?;
//!     registry.register(EntityDef::new("users").columns(["id", "name"]))?;
//!
//!     let quarry = Quarry::new(config, registry).await?;
//!     let posts = quarry.repository::<Post>();
//!
//!     let options = ResourceOptions::new()
//!         .relation("author")
//!         .filter(Filter::eq("status", "published"))
//!         .order_by("author.name", SortOrder::Asc)
//!         .take(10);
//!
//!     let page = posts.get_many_and_count(&options).await?;
//!     println!("{} of {} posts", page.rows.len(), page.total_count);
//!
//!     Ok(())
//! }
//! ```

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod core;
pub mod errors;
pub mod prelude;

// Re-export the main public types for convenience
pub use crate::core::Quarry;
pub use crate::errors::QuarryError;

// Re-export centralized config
pub use config::{AppConfig, ConfigError, DatabaseConfig};

// Re-export the core crate and its working set
pub use query_core;
pub use query_core::{
    compile, Entity, EntityDef, Filter, FilterOperator, FilterValue, JoinScope, Page, QueryError,
    Relation, Repository, RequestQuery, ResourceOptions, ResourceStore, SchemaRegistry,
    SelectQuery, SortOrder,
};

// Re-export external dependencies used in public API
pub use async_trait;
pub use sqlx;
