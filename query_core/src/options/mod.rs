//! Resource options
//!
//! The declarative request shape the interpreter consumes. Built either by
//! the request decoder or programmatically through the builder methods.
//! Immutable once handed to the interpreter; constructed fresh per request
//! and discarded after execution.

pub mod filter;
pub mod scope;
pub mod sort;
pub mod value;

pub use filter::{Filter, FilterOperator};
pub use scope::JoinScope;
pub use sort::SortOrder;
pub use value::FilterValue;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Pagination, sorting, relation eager-loading and filtering for one request.
///
/// `filters` is an AND group, `filters_by_or` an OR group; when both are
/// non-empty they combine as `(AND-group) OR (OR-group)`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResourceOptions {
    pub take: Option<u64>,
    pub skip: Option<u64>,
    /// Field-path to direction, iterated in insertion order
    pub order: IndexMap<String, SortOrder>,
    /// Dot-separated relation traversal paths to eager-load
    pub relations: Vec<String>,
    pub filters: Vec<Filter>,
    pub filters_by_or: Vec<Filter>,
    pub scopes: Vec<JoinScope>,
}

impl ResourceOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(mut self, take: u64) -> Self {
        self.take = Some(take);
        self
    }

    pub fn skip(mut self, skip: u64) -> Self {
        self.skip = Some(skip);
        self
    }

    pub fn order_by(mut self, path: impl Into<String>, order: SortOrder) -> Self {
        self.order.insert(path.into(), order);
        self
    }

    pub fn relation(mut self, path: impl Into<String>) -> Self {
        self.relations.push(path.into());
        self
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Add multiple filters (combined with AND)
    pub fn filters(mut self, filters: Vec<Filter>) -> Self {
        self.filters.extend(filters);
        self
    }

    pub fn or_filter(mut self, filter: Filter) -> Self {
        self.filters_by_or.push(filter);
        self
    }

    pub fn scope(mut self, scope: JoinScope) -> Self {
        self.scopes.push(scope);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_round_trip() {
        let options = ResourceOptions::new()
            .take(25)
            .skip(50)
            .order_by("name", SortOrder::Asc)
            .order_by("created_at", SortOrder::Desc)
            .relation("author")
            .filter(Filter::eq("status", "active"))
            .or_filter(Filter::eq("priority", "high"));

        assert_eq!(options.take, Some(25));
        assert_eq!(options.skip, Some(50));
        assert_eq!(
            options.order.keys().collect::<Vec<_>>(),
            vec!["name", "created_at"]
        );
        assert_eq!(options.relations, vec!["author"]);
        assert_eq!(options.filters.len(), 1);
        assert_eq!(options.filters_by_or.len(), 1);
    }

    #[test]
    fn test_wire_shape() {
        let json = r#"{
            "take": 10,
            "skip": 0,
            "order": { "author.name": "ASC", "id": "DESC" },
            "relations": ["author.country"],
            "filters": [{"column": "status", "operator": "eq", "not": false, "value": "active"}],
            "filtersByOr": [{"column": "priority", "operator": "eq", "value": "high"}]
        }"#;

        let options: ResourceOptions = serde_json::from_str(json).unwrap();

        assert_eq!(options.take, Some(10));
        assert_eq!(options.skip, Some(0));
        assert_eq!(
            options.order.iter().collect::<Vec<_>>(),
            vec![
                (&"author.name".to_string(), &SortOrder::Asc),
                (&"id".to_string(), &SortOrder::Desc),
            ]
        );
        assert_eq!(options.relations, vec!["author.country"]);
        assert_eq!(options.filters[0].column, "status");
        assert_eq!(options.filters_by_or[0].column, "priority");
        assert!(options.scopes.is_empty());
    }

    #[test]
    fn test_wire_shape_defaults() {
        let options: ResourceOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, ResourceOptions::new());
    }
}
