//! Identifier handling shared by the statement scanner and the column classifier.
//!
//! Two naming conventions drive filtering:
//!
//! - a leading underscore marks a table or column as private; it is never materialized
//! - a table whose name contains `ignore` (any casing) is skipped entirely
//!
//! # Examples
//!
//! ```ignore
//! assert!(is_ignored_table("_secret"));
//! assert!(is_ignored_table("Should be Ignored"));
//! assert_eq!(strip_quotes("\"post\""), "post");
//! ```

use crate::util::contains_ci;

/// Prefix that hides a table or column from the extracted model
pub const RESERVED_PREFIX: char = '_';

/// Case-insensitive substring that hides a table from the extracted model
pub const IGNORE_TOKEN: &str = "ignore";

/// Whether a name starts with the reserved prefix marker.
#[inline]
pub fn has_reserved_prefix(name: &str) -> bool {
    name.starts_with(RESERVED_PREFIX)
}

/// Whether a table name is excluded from extraction and section lookahead.
pub fn is_ignored_table(name: &str) -> bool {
    has_reserved_prefix(name) || contains_ci(name, IGNORE_TOKEN)
}

/// Strips surrounding double quotes from an identifier token.
pub fn strip_quotes(ident: &str) -> &str {
    ident.trim_matches('"')
}

/// Splits a column fragment into its leading identifier and the remaining text.
///
/// A leading double-quoted identifier may contain whitespace; an unquoted identifier ends
/// at the first whitespace character. Returns `None` for an empty fragment or an
/// unterminated quote.
pub fn split_leading_identifier(fragment: &str) -> Option<(&str, &str)> {
    let fragment = fragment.trim_start();
    if fragment.is_empty() {
        return None;
    }

    if let Some(rest) = fragment.strip_prefix('"') {
        let close = rest.find('"')?;
        return Some((&rest[..close], &rest[close + 1..]));
    }

    match fragment.find(char::is_whitespace) {
        Some(pos) => Some((&fragment[..pos], &fragment[pos..])),
        None => Some((fragment, "")),
    }
}
