//! Query Core - resource-query interpreter for Quarry
//!
//! This crate turns declarative "resource options" (pagination, sorting,
//! relation eager-loading, filter predicates and join scopes) into
//! parameterized PostgreSQL queries over an explicit schema graph, and
//! executes them through typed repositories.

pub mod compile;
pub mod decode;
pub mod errors;
pub mod options;
pub mod prelude;
pub mod repository;
pub mod schema;
pub mod traits;
pub mod validation;

pub use compile::{compile, SelectQuery};
pub use decode::RequestQuery;
pub use errors::QueryError;
pub use options::{Filter, FilterOperator, FilterValue, JoinScope, ResourceOptions, SortOrder};
pub use repository::Repository;
pub use schema::{EntityDef, Relation, SchemaRegistry};
pub use traits::{Entity, Page, ResourceStore};
pub use validation::{ValidatedIdentifier, ValidationError};

use sqlx::PgPool;

pub type DbPool = PgPool;
