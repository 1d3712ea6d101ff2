//! Unit tests for CREATE TABLE extraction
//!
//! These tests go through file-based parsing so they exercise the same path as the CLI:
//! reading, statement scanning, column splitting, and classification.

use std::io::Write;

use schemamap::model::{parse_sql_file, SchemaModel};
use schemamap::parser::{
    annotate_sections, classify_fragment, scan_statements, split_top_level_commas,
    ColumnFragment,
};
use tempfile::NamedTempFile;

/// Helper to create a temp SQL file with content
fn create_sql_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(".sql").unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn parse(content: &str) -> SchemaModel {
    let file = create_sql_file(content);
    let result = parse_sql_file(file.path());
    assert!(result.is_ok(), "Failed to parse: {:?}", result.err());
    result.unwrap()
}

fn column_names(model: &SchemaModel, table: &str) -> Vec<String> {
    model
        .table(table)
        .unwrap_or_else(|| panic!("Table {table} should exist"))
        .columns
        .iter()
        .map(|c| c.name.clone())
        .collect()
}

// ============================================================================
// Statement Scanning Tests
// ============================================================================

#[test]
fn test_single_line_statement() {
    let model = parse("CREATE TABLE post (id SERIAL PRIMARY KEY, user_id integer NOT NULL, title varchar(200));");
    assert_eq!(column_names(&model, "post"), vec!["id", "user_id", "title"]);
}

#[test]
fn test_multi_line_statement_with_comments() {
    let sql = r#"
-- leading comment
CREATE TABLE author (
    -- the key
    id serial PRIMARY KEY,

    email varchar(255), -- unique per author
    bio text
);
"#;
    let model = parse(sql);
    assert_eq!(column_names(&model, "author"), vec!["id", "email", "bio"]);
}

#[test]
fn test_opening_paren_on_following_line() {
    let sql = "CREATE TABLE widget\n(\n  id int,\n  name text\n);";
    let model = parse(sql);
    assert_eq!(column_names(&model, "widget"), vec!["id", "name"]);
}

#[test]
fn test_case_insensitive_keyword_preserves_name_case() {
    let model = parse("create table Author (Id int);");
    assert!(model.contains_table("Author"));
    assert!(!model.contains_table("author"));
}

#[test]
fn test_multiple_tables_in_one_file() {
    let sql = "CREATE TABLE a (id int);\nCREATE TABLE b (id int);\nCREATE TABLE c (id int);";
    let model = parse(sql);
    let names: Vec<&String> = model.tables.keys().collect();
    assert_eq!(names, vec!["a", "b", "c"]);
}

#[test]
fn test_unterminated_statement_is_skipped() {
    let sql = "CREATE TABLE broken (\n  id int,\n\nCREATE TABLE fine (id int);";
    let model = parse(sql);
    assert!(model.contains_table("fine"));
    assert!(!model.contains_table("broken"));
}

#[test]
fn test_statement_without_body_is_skipped() {
    let model = parse("CREATE TABLE copy AS SELECT 1;\nCREATE TABLE real_one (id int);");
    assert!(!model.contains_table("copy"));
    assert!(model.contains_table("real_one"));
}

#[test]
fn test_parentheses_inside_string_literals() {
    let sql = "CREATE TABLE note (\n  id int,\n  mood text DEFAULT ':)',\n  body text\n);";
    let model = parse(sql);
    assert_eq!(column_names(&model, "note"), vec!["id", "mood", "body"]);
}

#[test]
fn test_scan_reports_line_span() {
    let lines = vec!["-- x", "CREATE TABLE t (", "  id int", ");", "CREATE TABLE u (id int);"];
    let spans = scan_statements(&lines);
    assert_eq!(spans.len(), 2);
    assert_eq!((spans[0].start_line, spans[0].end_line), (1, 3));
    assert_eq!(spans[0].body, "id int");
    assert_eq!((spans[1].start_line, spans[1].end_line), (4, 4));
}

// ============================================================================
// Ignore Rule Tests
// ============================================================================

#[test]
fn test_ignored_tables() {
    let sql = r#"
CREATE TABLE _internal (id int);
CREATE TABLE "Should be Ignored" (id int);
CREATE TABLE ignore_me (id int);
CREATE TABLE kept (id int);
"#;
    let model = parse(sql);
    assert_eq!(model.len(), 1);
    assert!(model.contains_table("kept"));
}

#[test]
fn test_ignored_table_is_never_an_edge_target() {
    let model = parse("CREATE TABLE ignored (id INT);\nCREATE TABLE post (id INT, ignored_id INT);");
    assert!(!model.contains_table("ignored"));
    assert!(model.relationships().is_empty());

    // The column keeps its guess even though the target was dropped
    let column = model.table("post").unwrap().column("ignored_id").unwrap();
    assert!(column.is_foreign_key);
    assert_eq!(column.foreign_table.as_deref(), Some("ignored"));
}

#[test]
fn test_hidden_columns() {
    let model = parse("CREATE TABLE t (id int, _secret text, \"_quoted\" text, name text);");
    assert_eq!(column_names(&model, "t"), vec!["id", "name"]);
}

// ============================================================================
// Column Splitting and Classification Tests
// ============================================================================

#[test]
fn test_split_respects_nested_parentheses() {
    let parts = split_top_level_commas("id int, price numeric(10,2), CHECK (price > 0, true)");
    assert_eq!(parts, vec!["id int", "price numeric(10,2)", "CHECK (price > 0, true)"]);
}

#[test]
fn test_split_drops_empty_fragments() {
    assert_eq!(split_top_level_commas("a int,, b int,"), vec!["a int", "b int"]);
}

#[test]
fn test_constraints_are_not_columns() {
    let sql = r#"
CREATE TABLE enrollment (
    student_id int,
    course_id int,
    PRIMARY KEY (student_id, course_id),
    CONSTRAINT fk_student FOREIGN KEY (student_id) REFERENCES student(id),
    FOREIGN KEY (course_id) REFERENCES course(id),
    UNIQUE (student_id),
    KEY idx_course (course_id),
    INDEX idx_student (student_id)
);
"#;
    let model = parse(sql);
    assert_eq!(column_names(&model, "enrollment"), vec!["student_id", "course_id"]);
}

#[test]
fn test_keyword_prefix_is_not_a_constraint() {
    assert!(matches!(classify_fragment("keyword text"), ColumnFragment::Column(_)));
    assert!(matches!(classify_fragment("unique_code text"), ColumnFragment::Column(_)));
    assert!(matches!(classify_fragment("KEY (a)"), ColumnFragment::Constraint));
}

#[test]
fn test_single_token_fragment_is_malformed() {
    assert_eq!(classify_fragment("orphan"), ColumnFragment::Malformed);
}

#[test]
fn test_type_is_first_token_only() {
    let model = parse("CREATE TABLE t (name varchar(20) NOT NULL DEFAULT 'x');");
    let column = &model.table("t").unwrap().columns[0];
    assert_eq!(column.data_type, "varchar(20)");
}

#[test]
fn test_quoted_column_with_spaces() {
    let model = parse("CREATE TABLE t (\"Display Name\" varchar(20));");
    let column = &model.table("t").unwrap().columns[0];
    assert_eq!(column.name, "Display Name");
    assert_eq!(column.data_type, "varchar(20)");
}

// ============================================================================
// Section Comment Tests
// ============================================================================

#[test]
fn test_section_applies_to_next_table() {
    let sql = r#"
-- Diagram Section: Content
CREATE TABLE post (id int);
CREATE TABLE tag (id int);
"#;
    let model = parse(sql);
    assert_eq!(model.section_of("post"), Some("Content"));
    assert_eq!(model.section_of("tag"), None);
}

#[test]
fn test_section_skips_ignored_tables() {
    let sql = r#"
-- Diagram Section: Content
CREATE TABLE _scratch (id int);
CREATE TABLE "Ignore This" (id int);
CREATE TABLE post (id int);
"#;
    let model = parse(sql);
    assert_eq!(model.section_of("post"), Some("Content"));
}

#[test]
fn test_last_section_comment_wins() {
    let sql = "-- Diagram Section: First\n-- Diagram Section: Second\nCREATE TABLE post (id int);";
    let model = parse(sql);
    assert_eq!(model.section_of("post"), Some("Second"));
}

#[test]
fn test_section_without_following_table() {
    let lines = vec!["CREATE TABLE post (id int);", "-- Diagram Section: Orphan"];
    assert!(annotate_sections(&lines).is_empty());
}

#[test]
fn test_section_label_variants() {
    let sql = "--   diagram   SECTION :  Billing  \nCREATE TABLE invoice (id int);";
    let model = parse(sql);
    assert_eq!(model.section_of("invoice"), Some("Billing"));
}

// ============================================================================
// Encoding Tests
// ============================================================================

#[test]
fn test_utf8_bom_is_stripped() {
    let model = parse("\u{FEFF}CREATE TABLE t (id int);");
    assert!(model.contains_table("t"));
}

#[test]
fn test_windows_1252_fallback() {
    let mut file = NamedTempFile::with_suffix(".sql").unwrap();
    // 0xE9 is 'é' in Windows-1252 and invalid as a lone UTF-8 byte
    file.write_all(b"CREATE TABLE caf\xE9 (id int, caf\xE9_id int);").unwrap();
    file.flush().unwrap();

    let model = parse_sql_file(file.path()).unwrap();
    let table = model.table("caf\u{e9}").expect("Decoded table name should keep the accent");
    assert_eq!(table.columns[1].foreign_table.as_deref(), Some("caf\u{e9}"));
}
