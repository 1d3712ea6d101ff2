//! Diagram section comments
//!
//! A section is declared by a comment such as
//!
//! ```sql
//! -- Diagram Section: Content Management
//! CREATE TABLE post (...);
//! ```
//!
//! and applies to the next non-ignored `CREATE TABLE` after it.

use super::statement_scanner::{find_next_table, section_comment_lines};

/// Normalized form of the label that marks a section comment
const SECTION_LABEL: &str = "diagramsection";

/// A section label attached to a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionAssignment {
    pub table_name: String,
    /// Label as written, trimmed
    pub label: String,
    /// 0-based line of the section comment
    pub comment_line: usize,
}

/// Parse a comment line, returning the section label if it is a section marker.
pub fn parse_section_comment(line: &str) -> Option<String> {
    let content = line
        .trim()
        .trim_start_matches(|c: char| c == '-' || c == ' ')
        .trim();
    let (label, value) = content.split_once(':')?;

    let normalized: String = label
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();
    if normalized != SECTION_LABEL {
        return None;
    }

    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Find every section comment and attach it to the table that follows it.
///
/// A section comment with no qualifying table after it is dropped. When several comments
/// reach the same table, all of them are returned in line order; consumers keep the last.
pub fn annotate_sections(lines: &[&str]) -> Vec<SectionAssignment> {
    let mut assignments = Vec::new();

    for index in section_comment_lines(lines) {
        let Some(label) = parse_section_comment(lines[index]) else {
            continue;
        };

        match find_next_table(lines, index) {
            Some((_, table_name)) => {
                tracing::debug!(section = %label, table = table_name, "found diagram section");
                assignments.push(SectionAssignment {
                    table_name: table_name.to_string(),
                    label,
                    comment_line: index,
                });
            }
            None => {
                tracing::debug!(section = %label, line = index + 1, "section comment has no table after it");
            }
        }
    }

    assignments
}
