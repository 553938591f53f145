//! Query execution
//!
//! Renders compiled queries and runs them through sqlx. This is the single
//! suspension point of the pipeline; everything before it is pure CPU work.

use async_trait::async_trait;

use crate::errors::QueryError;
use crate::options::{FilterValue, ResourceOptions};
use crate::repository::core::Repository;
use crate::traits::{Entity, Page, ResourceStore};

type PgQueryAs<'q, O> = sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments>;

/// Bind one rendered parameter with its native sqlx type.
fn bind_value<'a, O>(query: PgQueryAs<'a, O>, value: &'a FilterValue) -> Result<PgQueryAs<'a, O>, QueryError> {
    Ok(match value {
        FilterValue::Bool(v) => query.bind(*v),
        FilterValue::Int(v) => query.bind(*v),
        FilterValue::Float(v) => query.bind(*v),
        FilterValue::DateTime(v) => query.bind(*v),
        FilterValue::Uuid(v) => query.bind(*v),
        FilterValue::Text(v) => query.bind(v.clone()),
        // Rendering flattens lists into scalar placeholders; a list here
        // means the clause was constructed outside the compiler
        FilterValue::List(_) => {
            return Err(QueryError::invalid_filter(
                "list value cannot be bound as a scalar parameter",
            ))
        }
    })
}

fn bind_all<'q, O>(
    mut query: PgQueryAs<'q, O>,
    params: &'q [FilterValue],
) -> Result<PgQueryAs<'q, O>, QueryError> {
    for value in params {
        query = bind_value(query, value)?;
    }
    Ok(query)
}

#[async_trait]
impl<T> ResourceStore for Repository<T>
where
    T: Entity + for<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> + Unpin,
{
    type Model = T;

    async fn get_one(&self, options: &ResourceOptions) -> Result<Option<T>, QueryError> {
        let query = self.compile(options)?;
        let (sql, params) = query.to_select_sql();

        tracing::debug!("[GET_ONE] table: {}", T::table_name());
        tracing::debug!("[GET_ONE] sql: {} ({} params)", sql, params.len());

        bind_all(sqlx::query_as::<_, T>(&sql), &params)?
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| QueryError::execution(format!("{} get_one", T::table_name()), e))
    }

    async fn get_one_by_id(
        &self,
        id: FilterValue,
        options: &ResourceOptions,
    ) -> Result<Option<T>, QueryError> {
        let mut query = self.compile(options)?;
        query.constrain_primary_key(id);
        let (sql, params) = query.to_select_sql();

        tracing::debug!("[GET_ONE_BY_ID] table: {}", T::table_name());
        tracing::debug!("[GET_ONE_BY_ID] sql: {} ({} params)", sql, params.len());

        bind_all(sqlx::query_as::<_, T>(&sql), &params)?
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| QueryError::execution(format!("{} get_one_by_id", T::table_name()), e))
    }

    async fn get_many(&self, options: &ResourceOptions) -> Result<Vec<T>, QueryError> {
        let query = self.compile(options)?;
        let (sql, params) = query.to_select_sql();

        tracing::debug!("[GET_MANY] table: {}", T::table_name());
        tracing::debug!("[GET_MANY] sql: {} ({} params)", sql, params.len());

        bind_all(sqlx::query_as::<_, T>(&sql), &params)?
            .fetch_all(&self.pool)
            .await
            .map_err(|e| QueryError::execution(format!("{} get_many", T::table_name()), e))
    }

    async fn get_many_and_count(
        &self,
        options: &ResourceOptions,
    ) -> Result<Page<T>, QueryError> {
        let query = self.compile(options)?;

        let (sql, params) = query.to_select_sql();
        tracing::debug!("[GET_MANY_AND_COUNT] table: {}", T::table_name());
        tracing::debug!("[GET_MANY_AND_COUNT] sql: {} ({} params)", sql, params.len());

        let rows = bind_all(sqlx::query_as::<_, T>(&sql), &params)?
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                QueryError::execution(format!("{} get_many_and_count rows", T::table_name()), e)
            })?;

        // The count runs without LIMIT/OFFSET so the total reflects every
        // matching row, not the returned page
        let (count_sql, count_params) = query.to_count_sql();
        tracing::debug!("[GET_MANY_AND_COUNT] count sql: {}", count_sql);

        let (total_count,) = bind_all(sqlx::query_as::<_, (i64,)>(&count_sql), &count_params)?
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                QueryError::execution(format!("{} get_many_and_count count", T::table_name()), e)
            })?;

        Ok(Page { rows, total_count })
    }
}
