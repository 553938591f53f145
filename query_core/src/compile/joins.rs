//! Join planning
//!
//! Walks the requested relation paths against the schema registry and
//! registers one LEFT JOIN per distinct alias. Registration is idempotent:
//! paths sharing a prefix share the prefix's join row. Scopes attach their
//! extra condition to an already-planned join.

use indexmap::IndexMap;

use crate::compile::alias::alias_for_path;
use crate::errors::QueryError;
use crate::options::{FilterValue, JoinScope};
use crate::schema::SchemaRegistry;
use crate::validation::ValidatedIdentifier;

/// One LEFT JOIN of the compiled query
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    pub table: String,
    pub alias: String,
    pub parent_alias: String,
    pub owner_column: String,
    pub target_column: String,
    /// Columns selected into the eager-load projection (empty when the
    /// target entity declares none)
    pub select_columns: Vec<String>,
    /// Scope condition with `{alias}` already substituted; `:name`
    /// placeholders are resolved at render time
    pub scope_condition: Option<String>,
    pub scope_params: IndexMap<String, FilterValue>,
}

#[derive(Debug)]
pub struct JoinPlanner<'a> {
    registry: &'a SchemaRegistry,
    root_table: &'a str,
    joins: IndexMap<String, Join>,
}

impl<'a> JoinPlanner<'a> {
    pub fn new(registry: &'a SchemaRegistry, root_table: &'a str) -> Self {
        Self {
            registry,
            root_table,
            joins: IndexMap::new(),
        }
    }

    /// Register the full chain for one `relations` entry. Every prefix of
    /// the path gets its own join row; hops already planned by an earlier
    /// entry are reused.
    pub fn plan_path(&mut self, path: &str) -> Result<(), QueryError> {
        let mut owner_table = self.root_table.to_string();
        let mut owner_alias = self.root_table.to_string();

        for segment in path.split('.') {
            ValidatedIdentifier::new(segment)?;
            let alias = format!("{}__{}", owner_alias, segment);

            let target_table = match self.joins.get(&alias) {
                Some(join) => join.table.clone(),
                None => {
                    let owner = self
                        .registry
                        .entity(&owner_table)
                        .ok_or_else(|| QueryError::unknown_entity(&owner_table))?;
                    let relation = owner.relation_named(segment).ok_or_else(|| {
                        QueryError::unknown_relation(&owner_table, segment)
                    })?;

                    let select_columns = self
                        .registry
                        .entity(&relation.target_table)
                        .map(|entity| entity.columns.clone())
                        .unwrap_or_default();

                    self.joins.insert(
                        alias.clone(),
                        Join {
                            table: relation.target_table.clone(),
                            alias: alias.clone(),
                            parent_alias: owner_alias.clone(),
                            owner_column: relation.owner_column.clone(),
                            target_column: relation.target_column.clone(),
                            select_columns,
                            scope_condition: None,
                            scope_params: IndexMap::new(),
                        },
                    );
                    relation.target_table.clone()
                }
            };

            owner_table = target_table;
            owner_alias = alias;
        }

        Ok(())
    }

    /// Attach a scope's condition to the join its relation path derives to.
    /// A scope naming a path that no `relations` entry planned is a
    /// specification error.
    pub fn attach_scope(&mut self, scope: &JoinScope) -> Result<(), QueryError> {
        let alias = alias_for_path(self.root_table, &scope.relation);

        let join = self.joins.get_mut(&alias).ok_or_else(|| {
            QueryError::invalid_filter(format!(
                "join scope '{}' does not match any requested relation",
                scope.relation
            ))
        })?;

        for name in scope.parameters.keys() {
            if !scope.condition.contains(&format!(":{}", name)) {
                return Err(QueryError::invalid_filter(format!(
                    "join scope '{}' parameter ':{}' is not referenced by its condition",
                    scope.relation, name
                )));
            }
        }

        join.scope_condition = Some(scope.condition.replace("{alias}", &alias));
        join.scope_params = scope.parameters.clone();
        Ok(())
    }

    pub fn contains_alias(&self, alias: &str) -> bool {
        self.joins.contains_key(alias)
    }

    pub fn into_joins(self) -> Vec<Join> {
        self.joins.into_values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{EntityDef, Relation};

    fn registry() -> SchemaRegistry {
        SchemaRegistry::new()
            .with(
                EntityDef::new("posts")
                    .relation(Relation::belongs_to("author", "users", "author_id")),
            )
            .unwrap()
            .with(
                EntityDef::new("users")
                    .columns(["id", "name"])
                    .relation(Relation::belongs_to("country", "countries", "country_id")),
            )
            .unwrap()
    }

    #[test]
    fn test_every_prefix_gets_a_join() {
        let registry = registry();
        let mut planner = JoinPlanner::new(&registry, "posts");

        planner.plan_path("author.country").unwrap();
        let joins = planner.into_joins();

        assert_eq!(joins.len(), 2);
        assert_eq!(joins[0].alias, "posts__author");
        assert_eq!(joins[0].parent_alias, "posts");
        assert_eq!(joins[1].alias, "posts__author__country");
        assert_eq!(joins[1].parent_alias, "posts__author");
    }

    #[test]
    fn test_shared_prefixes_are_deduplicated() {
        let registry = registry();
        let mut planner = JoinPlanner::new(&registry, "posts");

        planner.plan_path("author").unwrap();
        planner.plan_path("author.country").unwrap();

        let joins = planner.into_joins();
        assert_eq!(joins.len(), 2, "author join must be registered once");
    }

    #[test]
    fn test_unknown_relation_fails() {
        let registry = registry();
        let mut planner = JoinPlanner::new(&registry, "posts");

        let error = planner.plan_path("reviewer").unwrap_err();
        assert!(matches!(error, QueryError::UnknownRelation { .. }));
    }

    #[test]
    fn test_unregistered_intermediate_entity_fails() {
        let registry = registry();
        let mut planner = JoinPlanner::new(&registry, "posts");

        // countries is joinable but not registered, so it cannot be
        // traversed further
        planner.plan_path("author.country").unwrap();
        let error = planner.plan_path("author.country.continent").unwrap_err();
        assert!(matches!(error, QueryError::UnknownEntity { .. }));
    }

    #[test]
    fn test_scope_attaches_to_planned_join() {
        let registry = registry();
        let mut planner = JoinPlanner::new(&registry, "posts");
        planner.plan_path("author").unwrap();

        let scope = JoinScope::new("author", "{alias}.active = :active").parameter("active", true);
        planner.attach_scope(&scope).unwrap();

        let joins = planner.into_joins();
        assert_eq!(
            joins[0].scope_condition.as_deref(),
            Some("posts__author.active = :active")
        );
        assert_eq!(joins[0].scope_params.len(), 1);
    }

    #[test]
    fn test_scope_without_matching_relation_fails() {
        let registry = registry();
        let mut planner = JoinPlanner::new(&registry, "posts");

        let scope = JoinScope::new("author", "{alias}.active = TRUE");
        let error = planner.attach_scope(&scope).unwrap_err();
        assert!(matches!(error, QueryError::InvalidFilterSpec { .. }));
    }

    #[test]
    fn test_scope_with_unreferenced_parameter_fails() {
        let registry = registry();
        let mut planner = JoinPlanner::new(&registry, "posts");
        planner.plan_path("author").unwrap();

        let scope = JoinScope::new("author", "{alias}.active = TRUE").parameter("tier", "gold");
        let error = planner.attach_scope(&scope).unwrap_err();
        assert!(matches!(error, QueryError::InvalidFilterSpec { .. }));
    }
}
