//! Line-oriented discovery of `CREATE TABLE` statements
//!
//! This is deliberately not a SQL grammar. A statement starts on any line whose trimmed text
//! begins with `CREATE TABLE` and a table name; its body is found by tracking parenthesis depth
//! across the following lines until the depth returns to zero. Everything else in the file is
//! passed over untouched.

use std::sync::LazyLock;

use regex::Regex;

use super::identifier_utils::is_ignored_table;
use crate::util::strip_line_comment;

/// `CREATE TABLE` followed by a double-quoted name (spaces allowed) or a bare word
static CREATE_TABLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)^CREATE\s+TABLE\s+(?:"([^"]+)"|(\w+))"#).unwrap());

/// Marker that starts a line comment
pub const LINE_COMMENT: &str = "--";

/// A recognized `CREATE TABLE` statement and the text between its outer parentheses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementSpan {
    /// Table name, case preserved, quotes removed
    pub table_name: String,
    /// 0-based index of the `CREATE TABLE` line
    pub start_line: usize,
    /// 0-based index of the line holding the closing parenthesis
    pub end_line: usize,
    /// Body text with the outer parentheses removed; body lines are joined with a space
    pub body: String,
}

/// Returns the table name if the line opens a `CREATE TABLE` statement.
///
/// The ignore rule is not applied here; callers decide what to do with hidden tables.
pub fn statement_table_name(line: &str) -> Option<&str> {
    let caps = CREATE_TABLE_RE.captures(line.trim())?;
    caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_str())
}

/// Whether a trimmed line consists only of a line comment.
#[inline]
pub fn is_comment_line(trimmed: &str) -> bool {
    trimmed.starts_with(LINE_COMMENT)
}

/// Indices of comment lines that could carry a section marker (a comment containing a colon).
pub fn section_comment_lines(lines: &[&str]) -> Vec<usize> {
    lines
        .iter()
        .enumerate()
        .filter(|(_, line)| {
            let trimmed = line.trim();
            is_comment_line(trimmed) && trimmed.contains(':')
        })
        .map(|(i, _)| i)
        .collect()
}

/// Finds the first non-ignored `CREATE TABLE` strictly after `after`.
///
/// Statements for ignored tables are stepped over so the search continues to the next one.
pub fn find_next_table<'a>(lines: &[&'a str], after: usize) -> Option<(usize, &'a str)> {
    lines
        .iter()
        .copied()
        .enumerate()
        .skip(after + 1)
        .filter_map(|(i, line)| statement_table_name(line).map(|name| (i, name)))
        .find(|(_, name)| !is_ignored_table(name))
}

/// Scans every line and returns the statements whose bodies are properly terminated.
///
/// Ignored tables and unterminated statements are skipped without aborting the scan.
pub fn scan_statements(lines: &[&str]) -> Vec<StatementSpan> {
    let mut statements = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        let Some(table_name) = statement_table_name(line) else {
            continue;
        };

        if is_ignored_table(table_name) {
            tracing::debug!(table = table_name, line = i + 1, "skipping ignored table");
            continue;
        }

        match extract_statement_body(lines, i) {
            Some((end_line, body)) => statements.push(StatementSpan {
                table_name: table_name.to_string(),
                start_line: i,
                end_line,
                body,
            }),
            None => {
                tracing::warn!(
                    table = table_name,
                    line = i + 1,
                    "unterminated CREATE TABLE statement, skipping"
                );
            }
        }
    }

    statements
}

/// Collects the text between the outermost parentheses of the statement starting at `start`.
///
/// Blank lines and pure comment lines are skipped, trailing `--` comments are ignored, and
/// parentheses inside quoted runs do not count. Returns the index of the closing line and the
/// body, or `None` if the input ends (or another statement begins) before the depth returns
/// to zero.
pub fn extract_statement_body(lines: &[&str], start: usize) -> Option<(usize, String)> {
    let mut depth: usize = 0;
    let mut found_opening = false;
    let mut body = String::new();

    for (i, raw) in lines.iter().enumerate().skip(start) {
        let trimmed = raw.trim();
        if trimmed.is_empty() || is_comment_line(trimmed) {
            continue;
        }

        if !found_opening && i > start && statement_table_name(trimmed).is_some() {
            // Next statement reached before this one opened a body
            return None;
        }

        if found_opening && !body.is_empty() {
            body.push(' ');
        }

        let code = strip_line_comment(trimmed);
        let mut quote: Option<char> = None;

        for c in code.chars() {
            if let Some(q) = quote {
                if c == q {
                    quote = None;
                }
                if found_opening {
                    body.push(c);
                }
                continue;
            }

            match c {
                '\'' | '"' => {
                    quote = Some(c);
                    if found_opening {
                        body.push(c);
                    }
                }
                '(' => {
                    if found_opening {
                        body.push(c);
                    }
                    found_opening = true;
                    depth += 1;
                }
                ')' if found_opening => {
                    depth -= 1;
                    if depth == 0 {
                        return Some((i, body.trim().to_string()));
                    }
                    body.push(c);
                }
                ';' if !found_opening => return None,
                _ => {
                    if found_opening {
                        body.push(c);
                    }
                }
            }
        }
    }

    None
}
