//! Error types for the query core
//!
//! Malformed specifications fail fast with [`QueryError::InvalidFilterSpec`]
//! before any SQL is rendered; executor failures are wrapped unchanged.

use thiserror::Error;

use crate::validation::ValidationError;

#[derive(Error, Debug)]
pub enum QueryError {
    /// The resource options are structurally invalid: unknown operator name,
    /// wrong `in`/`bt` arity, a non-text LIKE value, a scope that matches no
    /// requested relation, or a filter/order path outside the planned joins.
    #[error("invalid filter specification: {reason}")]
    InvalidFilterSpec { reason: String },

    /// The root table (or a join target that must be traversed) is not
    /// registered in the schema registry.
    #[error("unknown entity table '{table}'")]
    UnknownEntity { table: String },

    /// A relation segment does not exist on the entity it is traversed from.
    #[error("unknown relation '{relation}' on table '{table}'")]
    UnknownRelation { table: String, relation: String },

    /// An identifier failed SQL-safety validation.
    #[error("invalid identifier: {0}")]
    Validation(#[from] ValidationError),

    /// The executor rejected the compiled query. The sqlx error is attached
    /// unchanged; nothing is reinterpreted at this layer.
    #[error("query execution failed for {context}: {source}")]
    QueryExecutionFailed {
        context: String,
        #[source]
        source: sqlx::Error,
    },
}

impl QueryError {
    pub fn invalid_filter(reason: impl Into<String>) -> Self {
        Self::InvalidFilterSpec {
            reason: reason.into(),
        }
    }

    pub fn unknown_entity(table: impl Into<String>) -> Self {
        Self::UnknownEntity {
            table: table.into(),
        }
    }

    pub fn unknown_relation(table: impl Into<String>, relation: impl Into<String>) -> Self {
        Self::UnknownRelation {
            table: table.into(),
            relation: relation.into(),
        }
    }

    pub fn execution(context: impl Into<String>, source: sqlx::Error) -> Self {
        Self::QueryExecutionFailed {
            context: context.into(),
            source,
        }
    }
}
