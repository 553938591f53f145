//! Compiled SELECT queries
//!
//! [`SelectQuery`] is the interpreter's output: projection, joins, WHERE
//! tree, ORDER BY terms and pagination, renderable either as a row query or
//! as the matching unpaginated count query. Rendering is deterministic:
//! compiling the same options twice yields byte-identical SQL and the same
//! parameter vector.

use std::fmt::Write as _;

use crate::compile::clause::{Clause, ColumnRef, Comparison, OrderTerm};
use crate::compile::joins::Join;
use crate::options::FilterValue;

#[derive(Debug, Clone, PartialEq)]
pub struct SelectQuery {
    pub root_table: String,
    /// The root alias is the table name itself, never a caller-supplied name
    pub root_alias: String,
    pub primary_key: String,
    pub joins: Vec<Join>,
    pub where_clause: Option<Clause>,
    pub order_by: Vec<OrderTerm>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl SelectQuery {
    /// AND an equality constraint on the root primary key onto the WHERE
    /// tree. Used by point reads; everything else the options applied stays
    /// in place.
    pub fn constrain_primary_key(&mut self, id: FilterValue) {
        let pk_clause = Clause::Comparison {
            column: ColumnRef::new(self.root_alias.clone(), self.primary_key.clone()),
            op: Comparison::Eq,
            value: id,
        };

        self.where_clause = Some(match self.where_clause.take() {
            Some(existing) => Clause::and(vec![pk_clause, existing]),
            None => pk_clause,
        });
    }

    /// Render the row query: projection, joins, WHERE, ORDER BY and
    /// LIMIT/OFFSET. Parameter positions are assigned in text order (join
    /// scope parameters first, then the WHERE tree).
    pub fn to_select_sql(&self) -> (String, Vec<FilterValue>) {
        let mut sql = String::with_capacity(128);
        let mut params = Vec::new();

        sql.push_str("SELECT ");
        sql.push_str(&self.root_alias);
        sql.push_str(".*");
        for join in &self.joins {
            for column in &join.select_columns {
                let _ = write!(
                    sql,
                    ", {alias}.{column} AS {alias}__{column}",
                    alias = join.alias,
                    column = column
                );
            }
        }

        let _ = write!(sql, " FROM {}", self.root_table);
        self.render_joins(&mut sql, &mut params);
        self.render_where(&mut sql, &mut params);

        if !self.order_by.is_empty() {
            sql.push_str(" ORDER BY ");
            for (position, (column, order)) in self.order_by.iter().enumerate() {
                if position > 0 {
                    sql.push_str(", ");
                }
                let _ = write!(sql, "{} {}", column.to_sql(), order.to_sql());
            }
        }

        if let Some(limit) = self.limit {
            let _ = write!(sql, " LIMIT {}", limit);
        }
        if let Some(offset) = self.offset {
            let _ = write!(sql, " OFFSET {}", offset);
        }

        (sql, params)
    }

    /// Render the count query for the same specification: identical joins
    /// and WHERE, no ORDER BY and no pagination. Counting distinct root
    /// primary keys keeps to-many joins from inflating the total.
    pub fn to_count_sql(&self) -> (String, Vec<FilterValue>) {
        let mut sql = String::with_capacity(128);
        let mut params = Vec::new();

        let _ = write!(
            sql,
            "SELECT COUNT(DISTINCT {}.{}) FROM {}",
            self.root_alias, self.primary_key, self.root_table
        );
        self.render_joins(&mut sql, &mut params);
        self.render_where(&mut sql, &mut params);

        (sql, params)
    }

    fn render_joins(&self, sql: &mut String, params: &mut Vec<FilterValue>) {
        for join in &self.joins {
            let _ = write!(
                sql,
                " LEFT JOIN {} AS {} ON {}.{} = {}.{}",
                join.table,
                join.alias,
                join.parent_alias,
                join.owner_column,
                join.alias,
                join.target_column
            );

            if let Some(condition) = &join.scope_condition {
                sql.push_str(" AND (");
                sql.push_str(&render_scope_condition(condition, &join.scope_params, params));
                sql.push(')');
            }
        }
    }

    fn render_where(&self, sql: &mut String, params: &mut Vec<FilterValue>) {
        if let Some(clause) = &self.where_clause {
            if !clause.is_empty() {
                sql.push_str(" WHERE ");
                clause.render(sql, params);
            }
        }
    }
}

/// Substitute `:name` placeholders with positional parameters. Values are
/// pushed in the scope's insertion order; replacement runs longest name
/// first so a parameter whose name prefixes another cannot corrupt it.
fn render_scope_condition(
    condition: &str,
    scope_params: &indexmap::IndexMap<String, FilterValue>,
    params: &mut Vec<FilterValue>,
) -> String {
    let mut positions = Vec::with_capacity(scope_params.len());
    for (name, value) in scope_params {
        params.push(value.clone());
        positions.push((name.as_str(), params.len()));
    }

    positions.sort_by_key(|(name, _)| std::cmp::Reverse(name.len()));

    let mut rendered = condition.to_string();
    for (name, index) in positions {
        rendered = rendered.replace(&format!(":{}", name), &format!("${}", index));
    }
    rendered
}
