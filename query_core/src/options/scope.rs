//! Join scopes
//!
//! A scope attaches an extra SQL condition to the LEFT JOIN of one relation
//! path instead of a bare join. The condition is a fragment template with an
//! `{alias}` placeholder for the join alias and `:name` placeholders for
//! bound parameters.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::options::value::FilterValue;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinScope {
    /// Relation field-path this scope applies to (e.g. `"author.country"`)
    pub relation: String,
    /// Condition template, e.g. `"{alias}.deleted_at IS NULL AND {alias}.tier = :tier"`
    pub condition: String,
    /// Named parameters referenced from the condition, bound in insertion order
    #[serde(default)]
    pub parameters: IndexMap<String, FilterValue>,
}

impl JoinScope {
    pub fn new(relation: impl Into<String>, condition: impl Into<String>) -> Self {
        Self {
            relation: relation.into(),
            condition: condition.into(),
            parameters: IndexMap::new(),
        }
    }

    pub fn parameter(mut self, name: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }
}
