//! The core-exposed retrieval interface

use async_trait::async_trait;
use serde::Serialize;

use crate::errors::QueryError;
use crate::options::{FilterValue, ResourceOptions};

/// A page of rows plus the total match count with pagination ignored.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub rows: Vec<T>,
    pub total_count: i64,
}

/// Resource retrieval against one entity. Every call is a stateless,
/// one-shot compile-and-execute; absence is `Ok(None)`, never an error.
#[async_trait]
pub trait ResourceStore {
    type Model;

    /// First row matching the options, if any.
    async fn get_one(
        &self,
        options: &ResourceOptions,
    ) -> Result<Option<Self::Model>, QueryError>;

    /// Like [`get_one`](Self::get_one) with an additional AND constraint on
    /// the primary key.
    async fn get_one_by_id(
        &self,
        id: FilterValue,
        options: &ResourceOptions,
    ) -> Result<Option<Self::Model>, QueryError>;

    /// The full ordered, limited and offset row sequence.
    async fn get_many(&self, options: &ResourceOptions) -> Result<Vec<Self::Model>, QueryError>;

    /// Rows with pagination applied plus the total count without it. Issues
    /// two queries against the executor.
    async fn get_many_and_count(
        &self,
        options: &ResourceOptions,
    ) -> Result<Page<Self::Model>, QueryError>;
}
