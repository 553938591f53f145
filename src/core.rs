//! Core Quarry functionality
//!
//! The coordinator owns the connection pool and the schema registry and
//! hands out typed repositories.

use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;

use config::DatabaseConfig;
use query_core::{Entity, Repository, SchemaRegistry};

use crate::errors::QuarryError;
use crate::{debug_log, trace_log};

/// Coordinates the database connection and the schema graph shared by every
/// repository.
pub struct Quarry {
    pool: PgPool,
    registry: Arc<SchemaRegistry>,
}

impl Quarry {
    /// Connect a pool from the database configuration and take ownership of
    /// the schema registry.
    pub async fn new(config: DatabaseConfig, registry: SchemaRegistry) -> Result<Self, QuarryError> {
        config.validate()?;
        let connection_string = config.connection_string();

        let mut pool_options = sqlx::postgres::PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds));

        if config.max_lifetime_seconds > 0 {
            pool_options =
                pool_options.max_lifetime(Duration::from_secs(config.max_lifetime_seconds));
        }

        let pool = pool_options.connect(&connection_string).await?;
        debug_log!("[QUARRY] connected to {}:{}", config.host, config.port);

        Ok(Self::from_pool(pool, registry))
    }

    /// Wrap an existing pool, e.g. one shared with other subsystems.
    pub fn from_pool(pool: PgPool, registry: SchemaRegistry) -> Self {
        Self {
            pool,
            registry: Arc::new(registry),
        }
    }

    /// Get database pool reference
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Get the shared schema registry
    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// Hand out a typed repository for an entity. Repositories are cheap:
    /// a pool handle plus the shared registry.
    pub fn repository<T: Entity>(&self) -> Repository<T> {
        trace_log!("[QUARRY] repository for {}", T::table_name());
        Repository::new(self.pool.clone(), Arc::clone(&self.registry))
    }

    /// Check database connection health
    pub async fn health_check(&self) -> Result<(), QuarryError> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}
