//! Schema registry
//!
//! An explicit, caller-constructed map of entity definitions. The
//! interpreter receives it at construction and resolves every relation
//! traversal against it; there is no ambient metadata lookup.

pub mod entity;

pub use entity::{EntityDef, Relation};

use std::collections::HashMap;

use crate::validation::{ValidatedIdentifier, ValidationError};

#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    entities: HashMap<String, EntityDef>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity definition, keyed by table name. Every identifier
    /// in the definition is validated here so compilation can splice them
    /// into SQL text without re-checking.
    pub fn register(&mut self, def: EntityDef) -> Result<(), ValidationError> {
        ValidatedIdentifier::new(&def.table)?;
        ValidatedIdentifier::new(&def.primary_key)?;
        for column in &def.columns {
            ValidatedIdentifier::new(column)?;
        }
        for relation in &def.relations {
            ValidatedIdentifier::new(&relation.name)?;
            ValidatedIdentifier::new(&relation.target_table)?;
            ValidatedIdentifier::new(&relation.owner_column)?;
            ValidatedIdentifier::new(&relation.target_column)?;
        }

        self.entities.insert(def.table.clone(), def);
        Ok(())
    }

    /// Chainable registration for literal schema setup
    pub fn with(mut self, def: EntityDef) -> Result<Self, ValidationError> {
        self.register(def)?;
        Ok(self)
    }

    pub fn entity(&self, table: &str) -> Option<&EntityDef> {
        self.entities.get(table)
    }

    pub fn relation(&self, table: &str, name: &str) -> Option<&Relation> {
        self.entities.get(table).and_then(|e| e.relation_named(name))
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_registry() -> SchemaRegistry {
        SchemaRegistry::new()
            .with(
                EntityDef::new("posts")
                    .columns(["id", "title", "status", "author_id"])
                    .relation(Relation::belongs_to("author", "users", "author_id")),
            )
            .unwrap()
            .with(
                EntityDef::new("users")
                    .columns(["id", "name", "country_id"])
                    .relation(Relation::belongs_to("country", "countries", "country_id")),
            )
            .unwrap()
    }

    #[test]
    fn test_entity_lookup() {
        let registry = sample_registry();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.entity("posts").unwrap().primary_key, "id");
        assert!(registry.entity("missing").is_none());
    }

    #[test]
    fn test_relation_lookup() {
        let registry = sample_registry();

        let relation = registry.relation("posts", "author").unwrap();
        assert_eq!(relation.target_table, "users");
        assert_eq!(relation.owner_column, "author_id");
        assert_eq!(relation.target_column, "id");

        assert!(registry.relation("posts", "comments").is_none());
        assert!(registry.relation("missing", "author").is_none());
    }

    #[test]
    fn test_register_rejects_invalid_identifiers() {
        let mut registry = SchemaRegistry::new();

        let bad_table = EntityDef::new("user table");
        assert!(registry.register(bad_table).is_err());

        let bad_relation = EntityDef::new("posts")
            .relation(Relation::belongs_to("author", "users", "author-id"));
        assert!(registry.register(bad_relation).is_err());

        assert!(registry.is_empty());
    }

    #[test]
    fn test_has_many_direction() {
        let relation = Relation::has_many("posts", "posts", "author_id");
        assert_eq!(relation.owner_column, "id");
        assert_eq!(relation.target_column, "author_id");
    }
}
