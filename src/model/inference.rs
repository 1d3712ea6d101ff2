//! Foreign-key inference from column naming conventions
//!
//! A column named `<something>_id` is taken to reference a table. For `author_id` the guessed
//! table is `author`; for `primary_author_id` only the last underscore-delimited segment is
//! used, so the guess is `author` as well. Nothing here checks that the table exists; that
//! filtering happens when edges or statements are produced.

/// Suffix marking a column as a foreign key
pub const FOREIGN_KEY_SUFFIX: &str = "_id";

/// Result of inspecting a column name
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InferredRelationship {
    pub is_foreign_key: bool,
    /// Guessed target table; `None` for non-key columns or when the guess is empty
    pub target_table: Option<String>,
}

/// Infer foreign-key-ness and the target table from a column name.
pub fn infer_relationship(column_name: &str) -> InferredRelationship {
    let Some(stem) = column_name.strip_suffix(FOREIGN_KEY_SUFFIX) else {
        return InferredRelationship::default();
    };

    let guess = match stem.rsplit_once('_') {
        Some((_, last)) => last,
        None => stem,
    };

    InferredRelationship {
        is_foreign_key: true,
        target_table: (!guess.is_empty()).then(|| guess.to_string()),
    }
}
