//! Request decoder
//!
//! Translates the raw HTTP-style parameter shape (`limit`, `page`,
//! `sortByAsc`, `sortByDesc`, `relations`, nested `filter` maps) into a
//! typed [`ResourceOptions`]. All validation that can happen before
//! compilation happens here: operator names, list arities and value typing.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::errors::QueryError;
use crate::options::{Filter, FilterOperator, FilterValue, ResourceOptions, SortOrder};

/// Raw request parameters, deserializable from query-string decoders that
/// produce nested maps (`filter[status][eq]=active`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RequestQuery {
    pub limit: Option<u64>,
    pub page: Option<u64>,
    /// Comma-separated field paths sorted ascending
    pub sort_by_asc: Option<String>,
    /// Comma-separated field paths sorted descending
    pub sort_by_desc: Option<String>,
    /// Comma-separated relation paths to eager-load
    pub relations: Option<String>,
    /// Column -> filter input, combined with AND
    pub filter: IndexMap<String, FilterInput>,
    /// Column -> filter input, combined with AND and OR-ed against `filter`
    pub or_filter: IndexMap<String, FilterInput>,
}

/// One column's filter input: either a bare value (implicit `eq`) or a map
/// of operator name to value.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FilterInput {
    Value(String),
    Operators(IndexMap<String, OperatorInput>),
}

/// An operator's value: plain, or wrapped in `{ "not": value }` to negate.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OperatorInput {
    Value(String),
    Negated(NegatedValue),
}

#[derive(Debug, Clone, Deserialize)]
pub struct NegatedValue {
    pub not: String,
}

impl RequestQuery {
    /// Build a request from an already-parsed JSON parameter object.
    pub fn from_json(value: serde_json::Value) -> Result<Self, QueryError> {
        serde_json::from_value(value).map_err(|error| {
            QueryError::invalid_filter(format!("malformed request parameters: {}", error))
        })
    }

    /// Decode into the resource options the interpreter consumes.
    pub fn decode(&self) -> Result<ResourceOptions, QueryError> {
        let mut options = ResourceOptions::new();

        options.take = self.limit;
        options.skip = match (self.page, self.limit) {
            (Some(page), Some(limit)) if page > 1 => Some((page - 1) * limit),
            (Some(_), Some(_)) => Some(0),
            _ => None,
        };

        // Ascending entries first, then descending; IndexMap keeps the
        // resulting ORDER BY sequence
        for field in comma_list(&self.sort_by_asc) {
            options.order.insert(field.to_string(), SortOrder::Asc);
        }
        for field in comma_list(&self.sort_by_desc) {
            options.order.insert(field.to_string(), SortOrder::Desc);
        }

        for path in comma_list(&self.relations) {
            options.relations.push(path.to_string());
        }

        options.filters = decode_filters(&self.filter)?;
        options.filters_by_or = decode_filters(&self.or_filter)?;

        Ok(options)
    }
}

fn comma_list(raw: &Option<String>) -> impl Iterator<Item = &str> {
    raw.as_deref()
        .unwrap_or("")
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
}

fn decode_filters(map: &IndexMap<String, FilterInput>) -> Result<Vec<Filter>, QueryError> {
    let mut filters = Vec::with_capacity(map.len());

    for (column, input) in map {
        match input {
            FilterInput::Value(raw) => {
                filters.push(Filter {
                    column: column.clone(),
                    operator: FilterOperator::Eq,
                    not: false,
                    value: typed_value(FilterOperator::Eq, column, raw)?,
                });
            }
            FilterInput::Operators(operators) => {
                for (name, operator_input) in operators {
                    let operator: FilterOperator = name.parse()?;
                    let (raw, not) = match operator_input {
                        OperatorInput::Value(raw) => (raw, false),
                        OperatorInput::Negated(negated) => (&negated.not, true),
                    };

                    filters.push(Filter {
                        column: column.clone(),
                        operator,
                        not,
                        value: typed_value(operator, column, raw)?,
                    });
                }
            }
        }
    }

    Ok(filters)
}

/// Type a raw value for its operator: LIKE-family stays text, list
/// operators split on commas with arity checks, everything else infers a
/// scalar.
fn typed_value(
    operator: FilterOperator,
    column: &str,
    raw: &str,
) -> Result<FilterValue, QueryError> {
    match operator {
        FilterOperator::Ct | FilterOperator::Sw | FilterOperator::Ew => {
            Ok(FilterValue::Text(raw.to_string()))
        }
        FilterOperator::In => {
            let items = split_list(raw);
            if items.is_empty() {
                return Err(QueryError::invalid_filter(format!(
                    "'in' filter on '{}' requires at least one value",
                    column
                )));
            }
            Ok(FilterValue::List(items))
        }
        FilterOperator::Bt => {
            let items = split_list(raw);
            if items.len() != 2 {
                return Err(QueryError::invalid_filter(format!(
                    "'bt' filter on '{}' requires exactly two bounds, got {}",
                    column,
                    items.len()
                )));
            }
            Ok(FilterValue::List(items))
        }
        _ => Ok(FilterValue::infer(raw)),
    }
}

fn split_list(raw: &str) -> Vec<FilterValue> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(FilterValue::infer)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sort_merging_preserves_insertion_order() {
        let request = RequestQuery {
            sort_by_asc: Some("name".to_string()),
            sort_by_desc: Some("age".to_string()),
            ..Default::default()
        };

        let options = request.decode().unwrap();
        assert_eq!(
            options.order.iter().collect::<Vec<_>>(),
            vec![
                (&"name".to_string(), &SortOrder::Asc),
                (&"age".to_string(), &SortOrder::Desc),
            ]
        );
    }

    #[test]
    fn test_duplicate_sort_key_keeps_position_updates_direction() {
        let request = RequestQuery {
            sort_by_asc: Some("name,age".to_string()),
            sort_by_desc: Some("name".to_string()),
            ..Default::default()
        };

        let options = request.decode().unwrap();
        assert_eq!(
            options.order.iter().collect::<Vec<_>>(),
            vec![
                (&"name".to_string(), &SortOrder::Desc),
                (&"age".to_string(), &SortOrder::Asc),
            ]
        );
    }

    #[test]
    fn test_page_and_limit_become_take_and_skip() {
        let request = RequestQuery {
            limit: Some(10),
            page: Some(3),
            ..Default::default()
        };

        let options = request.decode().unwrap();
        assert_eq!(options.take, Some(10));
        assert_eq!(options.skip, Some(20));
    }

    #[test]
    fn test_first_page_skips_nothing() {
        let request = RequestQuery {
            limit: Some(10),
            page: Some(1),
            ..Default::default()
        };

        let options = request.decode().unwrap();
        assert_eq!(options.skip, Some(0));
    }

    #[test]
    fn test_relations_comma_list() {
        let request = RequestQuery {
            relations: Some("author, author.country".to_string()),
            ..Default::default()
        };

        let options = request.decode().unwrap();
        assert_eq!(options.relations, vec!["author", "author.country"]);
    }

    #[test]
    fn test_bare_filter_value_is_equality() {
        let request = RequestQuery::from_json(json!({
            "filter": { "status": "active" }
        }))
        .unwrap();

        let options = request.decode().unwrap();
        assert_eq!(options.filters.len(), 1);
        assert_eq!(options.filters[0].operator, FilterOperator::Eq);
        assert!(!options.filters[0].not);
        assert_eq!(
            options.filters[0].value,
            FilterValue::Text("active".to_string())
        );
    }

    #[test]
    fn test_operator_map_with_negation() {
        let request = RequestQuery::from_json(json!({
            "filter": { "score": { "gte": { "not": "10" } } }
        }))
        .unwrap();

        let options = request.decode().unwrap();
        assert_eq!(options.filters[0].operator, FilterOperator::Gte);
        assert!(options.filters[0].not);
        assert_eq!(options.filters[0].value, FilterValue::Int(10));
    }

    #[test]
    fn test_every_operator_pair_decodes() {
        let request = RequestQuery::from_json(json!({
            "filter": { "score": { "gte": "10", "lte": "20" } }
        }))
        .unwrap();

        let options = request.decode().unwrap();
        assert_eq!(options.filters.len(), 2);
        assert_eq!(options.filters[0].operator, FilterOperator::Gte);
        assert_eq!(options.filters[1].operator, FilterOperator::Lte);
    }

    #[test]
    fn test_unknown_operator_fails() {
        let request = RequestQuery::from_json(json!({
            "filter": { "status": { "matches": "a.*" } }
        }))
        .unwrap();

        let error = request.decode().unwrap_err();
        assert!(matches!(error, QueryError::InvalidFilterSpec { .. }));
    }

    #[test]
    fn test_in_splits_to_typed_list() {
        let request = RequestQuery::from_json(json!({
            "filter": { "score": { "in": "1,2,3" } }
        }))
        .unwrap();

        let options = request.decode().unwrap();
        assert_eq!(
            options.filters[0].value,
            FilterValue::List(vec![
                FilterValue::Int(1),
                FilterValue::Int(2),
                FilterValue::Int(3)
            ])
        );
    }

    #[test]
    fn test_bt_arity_is_validated_at_decode() {
        let request = RequestQuery::from_json(json!({
            "filter": { "score": { "bt": "10" } }
        }))
        .unwrap();

        let error = request.decode().unwrap_err();
        assert!(matches!(error, QueryError::InvalidFilterSpec { .. }));
    }

    #[test]
    fn test_like_values_stay_text() {
        let request = RequestQuery::from_json(json!({
            "filter": { "title": { "ct": "42" } }
        }))
        .unwrap();

        let options = request.decode().unwrap();
        assert_eq!(options.filters[0].value, FilterValue::Text("42".to_string()));
    }

    #[test]
    fn test_or_filter_populates_or_group() {
        let request = RequestQuery::from_json(json!({
            "filter": { "status": "active" },
            "orFilter": { "priority": "high" }
        }))
        .unwrap();

        let options = request.decode().unwrap();
        assert_eq!(options.filters.len(), 1);
        assert_eq!(options.filters_by_or.len(), 1);
        assert_eq!(options.filters_by_or[0].column, "priority");
    }

    #[test]
    fn test_camel_case_wire_names() {
        let request = RequestQuery::from_json(json!({
            "limit": 5,
            "page": 2,
            "sortByAsc": "name",
            "sortByDesc": "created_at",
            "relations": "author"
        }))
        .unwrap();

        let options = request.decode().unwrap();
        assert_eq!(options.take, Some(5));
        assert_eq!(options.skip, Some(5));
        assert_eq!(options.order.len(), 2);
        assert_eq!(options.relations, vec!["author"]);
    }
}
