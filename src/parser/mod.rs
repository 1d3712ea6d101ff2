//! Convention-based extraction of `CREATE TABLE` statements and section comments

mod column_parser;
mod column_splitter;
mod identifier_utils;
mod section_parser;
mod source_reader;
mod statement_scanner;

pub use column_parser::{
    classify_fragment, is_table_constraint, parse_column_definition, ColumnFragment,
    ParsedColumn, CONSTRAINT_KEYWORDS,
};
pub use column_splitter::split_top_level_commas;
pub use identifier_utils::{has_reserved_prefix, is_ignored_table, IGNORE_TOKEN, RESERVED_PREFIX};
pub use section_parser::{annotate_sections, parse_section_comment, SectionAssignment};
pub use source_reader::{has_sql_extension, read_sql_source, resolve_sql_inputs};
pub use statement_scanner::{
    extract_statement_body, find_next_table, scan_statements, section_comment_lines,
    statement_table_name, StatementSpan,
};
