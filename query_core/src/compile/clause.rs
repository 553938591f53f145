//! Typed WHERE-clause tree
//!
//! Predicates compile into an AST of comparison, between, in and group
//! nodes. Rendering walks the tree, pushes each value onto the parameter
//! vector and writes the matching `$n` placeholder, so parameter positions
//! are assigned by the binder and never collide.

use std::fmt::Write as _;

use crate::options::{FilterValue, SortOrder};

/// A fully resolved `alias.column` reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRef {
    pub alias: String,
    pub column: String,
}

impl ColumnRef {
    pub fn new(alias: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            column: column.into(),
        }
    }

    pub fn to_sql(&self) -> String {
        format!("{}.{}", self.alias, self.column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    Like,
    NotLike,
}

impl Comparison {
    pub fn to_sql(&self) -> &'static str {
        match self {
            Comparison::Eq => "=",
            Comparison::Ne => "<>",
            Comparison::Gt => ">",
            Comparison::Gte => ">=",
            Comparison::Lt => "<",
            Comparison::Lte => "<=",
            Comparison::Like => "LIKE",
            Comparison::NotLike => "NOT LIKE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
}

impl LogicalOp {
    fn separator(&self) -> &'static str {
        match self {
            LogicalOp::And => " AND ",
            LogicalOp::Or => " OR ",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    Comparison {
        column: ColumnRef,
        op: Comparison,
        value: FilterValue,
    },
    Between {
        column: ColumnRef,
        low: FilterValue,
        high: FilterValue,
        negated: bool,
    },
    In {
        column: ColumnRef,
        values: Vec<FilterValue>,
        negated: bool,
    },
    Group {
        op: LogicalOp,
        clauses: Vec<Clause>,
    },
}

impl Clause {
    pub fn and(clauses: Vec<Clause>) -> Self {
        Self::Group {
            op: LogicalOp::And,
            clauses,
        }
    }

    pub fn or(clauses: Vec<Clause>) -> Self {
        Self::Group {
            op: LogicalOp::Or,
            clauses,
        }
    }

    /// A group with no renderable leaves contributes nothing
    pub fn is_empty(&self) -> bool {
        match self {
            Clause::Group { clauses, .. } => clauses.iter().all(Clause::is_empty),
            _ => false,
        }
    }

    /// Render this clause into `sql`, pushing bound values onto `params`.
    /// The placeholder index is always `params.len()` after the push.
    pub fn render(&self, sql: &mut String, params: &mut Vec<FilterValue>) {
        match self {
            Clause::Comparison { column, op, value } => {
                params.push(value.clone());
                let _ = write!(sql, "{} {} ${}", column.to_sql(), op.to_sql(), params.len());
            }
            Clause::Between {
                column,
                low,
                high,
                negated,
            } => {
                params.push(low.clone());
                let low_index = params.len();
                params.push(high.clone());
                let high_index = params.len();
                let keyword = if *negated { "NOT BETWEEN" } else { "BETWEEN" };
                let _ = write!(
                    sql,
                    "{} {} ${} AND ${}",
                    column.to_sql(),
                    keyword,
                    low_index,
                    high_index
                );
            }
            Clause::In {
                column,
                values,
                negated,
            } => {
                let keyword = if *negated { "NOT IN" } else { "IN" };
                let _ = write!(sql, "{} {} (", column.to_sql(), keyword);
                for (position, value) in values.iter().enumerate() {
                    params.push(value.clone());
                    if position > 0 {
                        sql.push_str(", ");
                    }
                    let _ = write!(sql, "${}", params.len());
                }
                sql.push(')');
            }
            Clause::Group { op, clauses } => {
                let mut rendered = Vec::with_capacity(clauses.len());
                for clause in clauses {
                    if clause.is_empty() {
                        continue;
                    }
                    let mut part = String::new();
                    clause.render(&mut part, params);
                    rendered.push(part);
                }
                if rendered.is_empty() {
                    return;
                }
                sql.push('(');
                sql.push_str(&rendered.join(op.separator()));
                sql.push(')');
            }
        }
    }
}

/// One ORDER BY term
pub type OrderTerm = (ColumnRef, SortOrder);
