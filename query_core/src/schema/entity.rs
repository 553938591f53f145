//! Entity and relation definitions for the schema graph

/// One traversable edge of the schema graph: a named relation from an owner
/// entity to a target table, joined on `owner.owner_column = target.target_column`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    pub name: String,
    pub target_table: String,
    pub owner_column: String,
    pub target_column: String,
}

impl Relation {
    pub fn new(
        name: impl Into<String>,
        target_table: impl Into<String>,
        owner_column: impl Into<String>,
        target_column: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            target_table: target_table.into(),
            owner_column: owner_column.into(),
            target_column: target_column.into(),
        }
    }

    /// Many-to-one: the owner carries the foreign key, the target is joined
    /// on its `id` column (e.g. `posts.author_id = users.id`).
    pub fn belongs_to(
        name: impl Into<String>,
        target_table: impl Into<String>,
        owner_column: impl Into<String>,
    ) -> Self {
        Self::new(name, target_table, owner_column, "id")
    }

    /// One-to-many: the target carries the foreign key, the owner is joined
    /// on its `id` column (e.g. `users.id = posts.author_id`).
    pub fn has_many(
        name: impl Into<String>,
        target_table: impl Into<String>,
        target_column: impl Into<String>,
    ) -> Self {
        Self::new(name, target_table, "id", target_column)
    }
}

/// Table-level metadata: primary key, optionally the column list (drives the
/// eager-load projection when present) and the outgoing relations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityDef {
    pub table: String,
    pub primary_key: String,
    pub columns: Vec<String>,
    pub relations: Vec<Relation>,
}

impl EntityDef {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            primary_key: "id".to_string(),
            columns: Vec::new(),
            relations: Vec::new(),
        }
    }

    pub fn primary_key(mut self, column: impl Into<String>) -> Self {
        self.primary_key = column.into();
        self
    }

    /// Declare the selectable columns. Optional: entities without a declared
    /// column list still join, they just contribute nothing to the
    /// eager-load projection.
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn relation(mut self, relation: Relation) -> Self {
        self.relations.push(relation);
        self
    }

    pub fn relation_named(&self, name: &str) -> Option<&Relation> {
        self.relations.iter().find(|r| r.name == name)
    }
}
