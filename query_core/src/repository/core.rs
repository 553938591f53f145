//! Repository construction

use std::marker::PhantomData;
use std::sync::Arc;

use crate::compile::{compile, SelectQuery};
use crate::errors::QueryError;
use crate::options::ResourceOptions;
use crate::schema::SchemaRegistry;
use crate::traits::Entity;
use crate::DbPool;

/// Typed query gateway for one entity: a pool handle plus the shared schema
/// registry. Cheap to clone and hand out per request.
#[derive(Clone)]
pub struct Repository<T: Entity> {
    pub(crate) pool: DbPool,
    pub(crate) registry: Arc<SchemaRegistry>,
    pub(crate) _phantom: PhantomData<T>,
}

impl<T: Entity> std::fmt::Debug for Repository<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("table", &T::table_name())
            .field("entities", &self.registry.len())
            .finish()
    }
}

impl<T: Entity> Repository<T> {
    pub fn new(pool: DbPool, registry: Arc<SchemaRegistry>) -> Self {
        Self {
            pool,
            registry,
            _phantom: PhantomData,
        }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// Compile a specification against this entity's table without
    /// executing it. Useful for inspecting the SQL a request would run.
    pub fn compile(&self, options: &ResourceOptions) -> Result<SelectQuery, QueryError> {
        compile(&self.registry, T::table_name(), options)
    }
}
