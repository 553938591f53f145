//! Resource-options interpreter
//!
//! Compiles a [`ResourceOptions`] against a [`SchemaRegistry`] into a
//! [`SelectQuery`]: joins are planned from `relations` (plus `scopes`),
//! filters and order terms resolve through the alias rules, and the result
//! renders to parameterized SQL. Compilation is pure CPU work; nothing here
//! touches the database.

pub mod alias;
pub mod clause;
pub mod joins;
pub mod select;


pub use clause::{Clause, ColumnRef, Comparison, LogicalOp};
pub use joins::{Join, JoinPlanner};
pub use select::SelectQuery;

use crate::compile::alias::{alias_for_path, split_column_path};
use crate::errors::QueryError;
use crate::options::{Filter, FilterOperator, FilterValue, ResourceOptions};
use crate::schema::SchemaRegistry;
use crate::validation::ValidatedIdentifier;

/// Compile one specification into a query against `root_table`.
pub fn compile(
    registry: &SchemaRegistry,
    root_table: &str,
    options: &ResourceOptions,
) -> Result<SelectQuery, QueryError> {
    let root = registry
        .entity(root_table)
        .ok_or_else(|| QueryError::unknown_entity(root_table))?;

    let mut planner = JoinPlanner::new(registry, root_table);
    for path in &options.relations {
        planner.plan_path(path)?;
    }
    for scope in &options.scopes {
        planner.attach_scope(scope)?;
    }

    let where_clause = build_where(
        &options.filters,
        &options.filters_by_or,
        root_table,
        &planner,
    )?;

    let mut order_by = Vec::with_capacity(options.order.len());
    for (path, order) in &options.order {
        order_by.push((resolve_column(path, root_table, &planner)?, *order));
    }

    Ok(SelectQuery {
        root_table: root_table.to_string(),
        root_alias: root_table.to_string(),
        primary_key: root.primary_key.clone(),
        joins: planner.into_joins(),
        where_clause,
        order_by,
        limit: options.take.filter(|take| *take > 0).map(|take| take as i64),
        offset: options.skip.filter(|skip| *skip > 0).map(|skip| skip as i64),
    })
}

/// Resolve a field path to its `alias.column` reference. Reuses the alias
/// derivation of the join planner but never registers joins: a path whose
/// relation chain was not requested in `relations` is a specification error.
fn resolve_column(
    path: &str,
    root_alias: &str,
    planner: &JoinPlanner<'_>,
) -> Result<ColumnRef, QueryError> {
    let (chain, column) = split_column_path(path);
    ValidatedIdentifier::new(column)?;

    match chain {
        None => Ok(ColumnRef::new(root_alias, column)),
        Some(chain) => {
            let alias = alias_for_path(root_alias, chain);
            if !planner.contains_alias(&alias) {
                return Err(QueryError::invalid_filter(format!(
                    "field path '{}' traverses relation '{}', which is not requested in relations",
                    path, chain
                )));
            }
            Ok(ColumnRef::new(alias, column))
        }
    }
}

fn build_where(
    filters: &[Filter],
    filters_by_or: &[Filter],
    root_alias: &str,
    planner: &JoinPlanner<'_>,
) -> Result<Option<Clause>, QueryError> {
    let and_clauses = filters
        .iter()
        .map(|filter| build_clause(filter, root_alias, planner))
        .collect::<Result<Vec<_>, _>>()?;
    let or_clauses = filters_by_or
        .iter()
        .map(|filter| build_clause(filter, root_alias, planner))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(match (and_clauses.is_empty(), or_clauses.is_empty()) {
        (true, true) => None,
        (false, true) => Some(Clause::and(and_clauses)),
        (true, false) => Some(Clause::and(or_clauses)),
        (false, false) => Some(Clause::or(vec![
            Clause::and(and_clauses),
            Clause::and(or_clauses),
        ])),
    })
}

/// Translate one predicate into a clause node. Negation flips the
/// comparison (`eq` to `<>`, `gt` to `<`) or switches to the NOT-variant
/// keyword for LIKE, IN and BETWEEN.
fn build_clause(
    filter: &Filter,
    root_alias: &str,
    planner: &JoinPlanner<'_>,
) -> Result<Clause, QueryError> {
    let column = resolve_column(&filter.column, root_alias, planner)?;

    let clause = match filter.operator {
        FilterOperator::Eq => comparison(
            column,
            if filter.not {
                Comparison::Ne
            } else {
                Comparison::Eq
            },
            filter.value.clone(),
        ),
        FilterOperator::Ct => like(column, filter, |text| format!("%{}%", text))?,
        FilterOperator::Sw => like(column, filter, |text| format!("{}%", text))?,
        FilterOperator::Ew => like(column, filter, |text| format!("%{}", text))?,
        FilterOperator::Gt => comparison(
            column,
            if filter.not {
                Comparison::Lt
            } else {
                Comparison::Gt
            },
            filter.value.clone(),
        ),
        FilterOperator::Gte => comparison(
            column,
            if filter.not {
                Comparison::Lt
            } else {
                Comparison::Gte
            },
            filter.value.clone(),
        ),
        FilterOperator::Lte => comparison(
            column,
            if filter.not {
                Comparison::Gt
            } else {
                Comparison::Lte
            },
            filter.value.clone(),
        ),
        FilterOperator::Lt => comparison(
            column,
            if filter.not {
                Comparison::Gt
            } else {
                Comparison::Lt
            },
            filter.value.clone(),
        ),
        FilterOperator::In => {
            let values = list_values(filter)?;
            if values.is_empty() {
                return Err(QueryError::invalid_filter(format!(
                    "'in' filter on '{}' requires at least one value",
                    filter.column
                )));
            }
            Clause::In {
                column,
                values,
                negated: filter.not,
            }
        }
        FilterOperator::Bt => match <[FilterValue; 2]>::try_from(list_values(filter)?) {
            Ok([low, high]) => Clause::Between {
                column,
                low,
                high,
                negated: filter.not,
            },
            Err(values) => {
                return Err(QueryError::invalid_filter(format!(
                    "'bt' filter on '{}' requires exactly two bounds, got {}",
                    filter.column,
                    values.len()
                )))
            }
        },
    };

    Ok(clause)
}

fn comparison(column: ColumnRef, op: Comparison, value: FilterValue) -> Clause {
    Clause::Comparison { column, op, value }
}

/// LIKE-family operators require a text value; the pattern transform wraps
/// it with `%` on the relevant side(s).
fn like(
    column: ColumnRef,
    filter: &Filter,
    pattern: impl Fn(&str) -> String,
) -> Result<Clause, QueryError> {
    let text = filter.value.as_text().ok_or_else(|| {
        QueryError::invalid_filter(format!(
            "'{}' filter on '{}' requires a text value, got {}",
            filter.operator.as_str(),
            filter.column,
            filter.value.type_name()
        ))
    })?;

    Ok(Clause::Comparison {
        column,
        op: if filter.not {
            Comparison::NotLike
        } else {
            Comparison::Like
        },
        value: FilterValue::Text(pattern(text)),
    })
}

/// `in`/`bt` value lists: either an explicit scalar list or a text value
/// split on commas with per-item type inference.
fn list_values(filter: &Filter) -> Result<Vec<FilterValue>, QueryError> {
    match &filter.value {
        FilterValue::List(values) => {
            for value in values {
                if matches!(value, FilterValue::List(_)) {
                    return Err(QueryError::invalid_filter(format!(
                        "'{}' filter on '{}' cannot contain nested lists",
                        filter.operator.as_str(),
                        filter.column
                    )));
                }
            }
            Ok(values.clone())
        }
        FilterValue::Text(raw) => Ok(raw
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(FilterValue::infer)
            .collect()),
        other => Err(QueryError::invalid_filter(format!(
            "'{}' filter on '{}' requires a list value, got {}",
            filter.operator.as_str(),
            filter.column,
            other.type_name()
        ))),
    }
}
