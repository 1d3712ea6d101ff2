//! Include patterns for selecting tables from a relational model
//!
//! Patterns have one to three dot-separated parts:
//!
//! | Pattern            | Matches                                                     |
//! |--------------------|-------------------------------------------------------------|
//! | `db`               | every table in `db`                                         |
//! | `db.x`             | schema `x` (3-level models) or table `x` (2-level models)   |
//! | `db.schema.table`  | one table in one schema                                     |
//!
//! An empty part is a wildcard, so `db..users` matches `users` in any schema of `db`.

use std::fmt;
use std::str::FromStr;

use super::TableLocation;
use crate::error::SchemaMapError;

/// One parsed include pattern; `None` fields match anything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncludePattern {
    pub db: Option<String>,
    /// Second part of the pattern
    pub scope: Option<String>,
    /// Third part of the pattern
    pub table: Option<String>,
}

fn part(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

fn field_matches(pattern: &Option<String>, value: &str) -> bool {
    pattern.as_deref().map_or(true, |p| p == value)
}

impl IncludePattern {
    /// Whether a table location satisfies this pattern.
    pub fn matches(&self, location: &TableLocation) -> bool {
        if !field_matches(&self.db, &location.database) {
            return false;
        }

        match &location.schema {
            Some(schema) => {
                field_matches(&self.scope, schema) && field_matches(&self.table, &location.table)
            }
            // Without a schema layer the second part names the table itself
            None => match (&self.scope, &self.table) {
                (scope, None) => field_matches(scope, &location.table),
                (None, table) => field_matches(table, &location.table),
                (Some(_), Some(_)) => false,
            },
        }
    }
}

impl FromStr for IncludePattern {
    type Err = SchemaMapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('.').collect();
        let invalid = |message: &str| SchemaMapError::InvalidIncludePattern {
            pattern: s.to_string(),
            message: message.to_string(),
        };

        match parts.as_slice() {
            [db] if part(db).is_some() => Ok(Self {
                db: part(db),
                ..Self::default()
            }),
            [_] => Err(invalid("pattern is empty")),
            [db, scope] => Ok(Self {
                db: part(db),
                scope: part(scope),
                table: None,
            }),
            [db, scope, table] => Ok(Self {
                db: part(db),
                scope: part(scope),
                table: part(table),
            }),
            _ => Err(invalid("expected db, db.schema, or db.schema.table")),
        }
    }
}

impl fmt::Display for IncludePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let db = self.db.as_deref().unwrap_or("");
        match (&self.scope, &self.table) {
            (None, None) => write!(f, "{db}"),
            (scope, None) => write!(f, "{db}.{}", scope.as_deref().unwrap_or("")),
            (scope, Some(table)) => {
                write!(f, "{db}.{}.{table}", scope.as_deref().unwrap_or(""))
            }
        }
    }
}

/// Ordered list of include patterns
///
/// Patterns are tried in order and the first match short-circuits. An empty filter includes
/// every table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncludeFilter {
    patterns: Vec<IncludePattern>,
}

impl IncludeFilter {
    /// A filter that includes everything
    pub fn all() -> Self {
        Self::default()
    }

    pub fn new(patterns: Vec<IncludePattern>) -> Self {
        Self { patterns }
    }

    /// Parse raw pattern strings, failing on the first invalid one.
    pub fn parse<S: AsRef<str>>(raw: &[S]) -> Result<Self, SchemaMapError> {
        raw.iter()
            .map(|s| s.as_ref().parse())
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }

    pub fn patterns(&self) -> &[IncludePattern] {
        &self.patterns
    }

    /// The first pattern matching the location, if any.
    pub fn first_match(&self, location: &TableLocation) -> Option<&IncludePattern> {
        self.patterns.iter().find(|p| p.matches(location))
    }

    pub fn includes(&self, location: &TableLocation) -> bool {
        self.patterns.is_empty() || self.first_match(location).is_some()
    }
}
