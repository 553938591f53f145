//! Field-path splitting and alias derivation
//!
//! An alias is a pure function of the root alias and the relation chain:
//! each hop appends `__segment`. Identical paths derive identical aliases;
//! distinct paths never collide within one compiled query.

/// Split a field path at its last dot: the leading relation chain and the
/// trailing column. Greedy: everything before the final `.` is the chain,
/// even if it contains dots itself.
pub fn split_column_path(path: &str) -> (Option<&str>, &str) {
    match path.rfind('.') {
        Some(index) => (Some(&path[..index]), &path[index + 1..]),
        None => (None, path),
    }
}

/// Derive the table alias for a relation chain under the given root alias.
pub fn alias_for_path(root: &str, chain: &str) -> String {
    let mut alias = String::with_capacity(root.len() + chain.len() + 2);
    alias.push_str(root);
    for segment in chain.split('.') {
        alias.push_str("__");
        alias.push_str(segment);
    }
    alias
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_bare_column() {
        assert_eq!(split_column_path("status"), (None, "status"));
    }

    #[test]
    fn test_split_single_hop() {
        assert_eq!(split_column_path("author.name"), (Some("author"), "name"));
    }

    #[test]
    fn test_split_is_greedy() {
        // Everything before the last dot is the join chain
        assert_eq!(
            split_column_path("author.country.name"),
            (Some("author.country"), "name")
        );
    }

    #[test]
    fn test_alias_derivation() {
        assert_eq!(alias_for_path("posts", "author"), "posts__author");
        assert_eq!(
            alias_for_path("posts", "author.country"),
            "posts__author__country"
        );
    }

    #[test]
    fn test_alias_is_deterministic() {
        assert_eq!(
            alias_for_path("posts", "author.country"),
            alias_for_path("posts", "author.country")
        );
    }
}
