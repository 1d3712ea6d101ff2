//! Column fragment classification
//!
//! Each fragment produced by the column splitter is either a table-level constraint, which is
//! discarded, or a column definition of the shape
//!
//! ```sql
//! name TYPE [anything else]
//! "quoted name" TYPE [anything else]
//! ```
//!
//! Only the name and the first type token are kept. The type is not normalized or validated.

use super::identifier_utils::{has_reserved_prefix, split_leading_identifier, strip_quotes};
use crate::util::starts_with_keyword_ci;

/// Keywords that open a table-level constraint rather than a column definition
pub const CONSTRAINT_KEYWORDS: &[&str] = &[
    "PRIMARY KEY",
    "FOREIGN KEY",
    "CONSTRAINT",
    "INDEX",
    "KEY",
    "UNIQUE",
    "CHECK",
    "EXCLUDE",
];

/// A column definition reduced to its name and raw type token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedColumn {
    pub name: String,
    /// First token after the name, e.g. `varchar(200)` or `INTEGER`
    pub data_type: String,
}

/// Outcome of classifying one fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnFragment {
    Column(ParsedColumn),
    /// Table-level constraint (PRIMARY KEY, FOREIGN KEY, ...)
    Constraint,
    /// Column whose name carries the reserved prefix
    Hidden(String),
    /// Fewer than two tokens
    Malformed,
}

/// Whether the fragment opens with a constraint keyword.
pub fn is_table_constraint(fragment: &str) -> bool {
    let trimmed = fragment.trim_start();
    CONSTRAINT_KEYWORDS
        .iter()
        .any(|kw| starts_with_keyword_ci(trimmed, kw))
}

/// Classify a single fragment.
pub fn classify_fragment(fragment: &str) -> ColumnFragment {
    if is_table_constraint(fragment) {
        return ColumnFragment::Constraint;
    }

    let Some((name, rest)) = split_leading_identifier(fragment) else {
        return ColumnFragment::Malformed;
    };
    let Some(data_type) = rest.split_whitespace().next() else {
        return ColumnFragment::Malformed;
    };

    let name = strip_quotes(name);
    if name.is_empty() {
        return ColumnFragment::Malformed;
    }
    if has_reserved_prefix(name) {
        return ColumnFragment::Hidden(name.to_string());
    }

    ColumnFragment::Column(ParsedColumn {
        name: name.to_string(),
        data_type: data_type.to_string(),
    })
}

/// Parse a column definition, returning `None` for constraints, hidden and malformed fragments.
pub fn parse_column_definition(fragment: &str) -> Option<ParsedColumn> {
    match classify_fragment(fragment) {
        ColumnFragment::Column(column) => Some(column),
        _ => None,
    }
}
