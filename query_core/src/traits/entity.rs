//! Entity metadata trait

use std::fmt::Debug;

/// Ties a Rust row type to its root table. The relation graph lives in the
/// [`SchemaRegistry`](crate::schema::SchemaRegistry), not on the type; a
/// repository only needs to know where its rows come from and how they are
/// keyed.
pub trait Entity: Clone + Send + Sync + Debug {
    /// The table name in the database; also the root alias of every query
    /// compiled for this entity.
    fn table_name() -> &'static str;

    /// The primary key column, used by point reads and distinct counting.
    fn primary_key() -> &'static str {
        "id"
    }
}
