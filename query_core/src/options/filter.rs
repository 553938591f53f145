//! Filter predicates
//!
//! A predicate is `column (field-path), operator, negation flag, value`.
//! Operator names follow the short wire vocabulary (`eq`, `ct`, `sw`, `ew`,
//! `gt`, `gte`, `lte`, `lt`, `in`, `bt`).

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::QueryError;
use crate::options::value::FilterValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOperator {
    /// Equals
    Eq,
    /// String contains
    Ct,
    /// Starts with
    Sw,
    /// Ends with
    Ew,
    /// Greater than
    Gt,
    /// Greater than or equal to
    Gte,
    /// Lesser than or equal to
    Lte,
    /// Lesser than
    Lt,
    /// Member of a comma-separated list
    In,
    /// Between two comma-separated bounds
    Bt,
}

impl FilterOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Ct => "ct",
            Self::Sw => "sw",
            Self::Ew => "ew",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Lte => "lte",
            Self::Lt => "lt",
            Self::In => "in",
            Self::Bt => "bt",
        }
    }
}

impl FromStr for FilterOperator {
    type Err = QueryError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "eq" => Ok(Self::Eq),
            "ct" => Ok(Self::Ct),
            "sw" => Ok(Self::Sw),
            "ew" => Ok(Self::Ew),
            "gt" => Ok(Self::Gt),
            "gte" => Ok(Self::Gte),
            "lte" => Ok(Self::Lte),
            "lt" => Ok(Self::Lt),
            "in" => Ok(Self::In),
            "bt" => Ok(Self::Bt),
            other => Err(QueryError::invalid_filter(format!(
                "unknown filter operator '{}'",
                other
            ))),
        }
    }
}

/// Single filter predicate over a field path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub column: String,
    pub operator: FilterOperator,
    #[serde(default)]
    pub not: bool,
    pub value: FilterValue,
}

impl Filter {
    pub fn new(
        column: impl Into<String>,
        operator: FilterOperator,
        value: impl Into<FilterValue>,
    ) -> Self {
        Self {
            column: column.into(),
            operator,
            not: false,
            value: value.into(),
        }
    }

    /// Flip the predicate's negation flag
    pub fn negated(mut self) -> Self {
        self.not = true;
        self
    }

    pub fn eq(column: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::new(column, FilterOperator::Eq, value)
    }

    pub fn contains(column: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(column, FilterOperator::Ct, text.into())
    }

    pub fn starts_with(column: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(column, FilterOperator::Sw, text.into())
    }

    pub fn ends_with(column: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(column, FilterOperator::Ew, text.into())
    }

    pub fn gt(column: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::new(column, FilterOperator::Gt, value)
    }

    pub fn gte(column: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::new(column, FilterOperator::Gte, value)
    }

    pub fn lte(column: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::new(column, FilterOperator::Lte, value)
    }

    pub fn lt(column: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::new(column, FilterOperator::Lt, value)
    }

    pub fn in_values(column: impl Into<String>, values: Vec<FilterValue>) -> Self {
        Self::new(column, FilterOperator::In, FilterValue::List(values))
    }

    pub fn between(
        column: impl Into<String>,
        low: impl Into<FilterValue>,
        high: impl Into<FilterValue>,
    ) -> Self {
        Self::new(
            column,
            FilterOperator::Bt,
            FilterValue::List(vec![low.into(), high.into()]),
        )
    }
}
