//! Unit tests for foreign-key resolution over in-memory relational models

use pretty_assertions::assert_eq;
use schemamap::fkeys::generate_foreign_keys;
use schemamap::relational::{parse_relational_model, IncludeFilter, RelationalModel};
use schemamap::ResolveError;

fn model(json: &str) -> RelationalModel {
    parse_relational_model(json).expect("Model should parse")
}

// ============================================================================
// Deduplication Tests
// ============================================================================

#[test]
fn test_belongs_to_and_column_collapse_to_one_statement() {
    let model = model(
        r#"{
        "blog_db": {
            "post": {
                "table_name": "post",
                "belongs_to": { "author": { "local_key": "user_id", "to_table": "user" } },
                "column_data": [
                    { "column_name": "user_id", "is_foreign_key": true, "foreign_table": "user" }
                ]
            }
        }
    }"#,
    );

    let report = generate_foreign_keys(&model, &IncludeFilter::all());
    assert_eq!(
        report.statements(),
        vec!["ALTER TABLE blog_db.post ADD CONSTRAINT fk_post_user_id FOREIGN KEY (user_id) REFERENCES blog_db.user(id);"]
    );
    assert_eq!(report.duplicates, 1);
}

#[test]
fn test_first_occurrence_wins_across_tables() {
    // Two database keys that resolve to the same schema-qualified source
    let model = model(
        r#"{
        "db_a": { "public": { "post": { "table_name": "post",
            "belongs_to": { "r": { "local_key": "user_id", "to_table": "user" } } } } },
        "db_b": { "public": { "post": { "table_name": "post",
            "belongs_to": { "r": { "local_key": "user_id", "to_table": "user" } } } } }
    }"#,
    );

    let report = generate_foreign_keys(&model, &IncludeFilter::all());
    assert_eq!(report.foreign_keys.len(), 1);
    assert_eq!(report.foreign_keys[0].source_database, "db_a");
    assert_eq!(report.duplicates, 1);
}

// ============================================================================
// Qualification Tests
// ============================================================================

#[test]
fn test_three_level_same_schema() {
    let model = model(
        r#"{
        "blog_db": {
            "public": {
                "post": {
                    "table_name": "post",
                    "belongs_to": { "author": { "local_key": "user_id", "to_table": "user" } }
                }
            }
        }
    }"#,
    );

    let report = generate_foreign_keys(&model, &IncludeFilter::all());
    assert_eq!(
        report.statements(),
        vec!["ALTER TABLE public.post ADD CONSTRAINT fk_post_user_id FOREIGN KEY (user_id) REFERENCES public.user(id);"]
    );
}

#[test]
fn test_column_foreign_db() {
    let model = model(
        r#"{
        "blog_db": {
            "post": {
                "table_name": "post",
                "column_data": [
                    { "column_name": "sku_id", "is_linked_key": true, "foreign_db": "shop_db", "foreign_table": "sku" },
                    { "column_name": "plain", "is_foreign_key": false, "foreign_table": "ignored" },
                    { "column_name": "no_target_id", "is_foreign_key": true, "foreign_table": null }
                ]
            }
        }
    }"#,
    );

    let report = generate_foreign_keys(&model, &IncludeFilter::all());
    assert_eq!(
        report.statements(),
        vec!["ALTER TABLE blog_db.post ADD CONSTRAINT fk_post_sku_id FOREIGN KEY (sku_id) REFERENCES shop_db.sku(id);"]
    );
    assert!(report.skipped.is_empty());
}

// ============================================================================
// Skip and Filter Tests
// ============================================================================

#[test]
fn test_missing_fields_are_skipped_not_fatal() {
    let model = model(
        r#"{
        "db": {
            "t": {
                "table_name": "t",
                "belongs_to": {
                    "no_key": { "to_table": "x" },
                    "no_target": { "local_key": "x_id" },
                    "ok": { "local_key": "y_id", "to_table": "y" }
                }
            }
        }
    }"#,
    );

    let report = generate_foreign_keys(&model, &IncludeFilter::all());
    assert_eq!(report.foreign_keys.len(), 1);
    let reasons: Vec<&ResolveError> = report.skipped.iter().map(|s| &s.reason).collect();
    assert_eq!(
        reasons,
        vec![&ResolveError::MissingLocalKey, &ResolveError::MissingTargetTable]
    );
}

#[test]
fn test_malformed_records_skip_only_themselves() {
    let model = model(
        r#"{
        "blog_db": {
            "post": {
                "table_name": "post",
                "belongs_to": {
                    "author": { "local_key": "author_id", "to_table": "user" },
                    "broken": "not-an-object"
                },
                "column_data": [
                    null,
                    { "column_name": "editor_id", "is_foreign_key": true, "foreign_table": "user" }
                ]
            }
        }
    }"#,
    );

    let report = generate_foreign_keys(&model, &IncludeFilter::all());
    assert_eq!(
        report.statements(),
        vec![
            "ALTER TABLE blog_db.post ADD CONSTRAINT fk_post_author_id FOREIGN KEY (author_id) REFERENCES blog_db.user(id);",
            "ALTER TABLE blog_db.post ADD CONSTRAINT fk_post_editor_id FOREIGN KEY (editor_id) REFERENCES blog_db.user(id);",
        ]
    );
    assert_eq!(report.tables_processed, 1);

    let skipped: Vec<String> = report.skipped.iter().map(|s| s.to_string()).collect();
    assert_eq!(
        skipped,
        vec![
            "Skipping relationship broken in blog_db.post: malformed record: expected an object, found a string",
            "Skipping column FK <unnamed> in blog_db.post: malformed record: expected an object, found null",
        ]
    );
}

#[test]
fn test_include_filter_limits_tables() {
    let model = model(
        r#"{
        "blog_db": {
            "post": { "table_name": "post", "belongs_to": { "a": { "local_key": "a_id", "to_table": "a" } } },
            "tag": { "table_name": "tag", "belongs_to": { "b": { "local_key": "b_id", "to_table": "b" } } }
        },
        "shop_db": {
            "sku": { "table_name": "sku", "belongs_to": { "c": { "local_key": "c_id", "to_table": "c" } } }
        }
    }"#,
    );

    let filter = IncludeFilter::parse(&["blog_db.tag", "shop_db"]).unwrap();
    let report = generate_foreign_keys(&model, &filter);
    let sources: Vec<&str> = report
        .foreign_keys
        .iter()
        .map(|fk| fk.source_ref.as_str())
        .collect();
    assert_eq!(sources, vec!["blog_db.tag", "shop_db.sku"]);
    assert_eq!(report.tables_processed, 2);
}

#[test]
fn test_grouping_by_database() {
    let model = model(
        r#"{
        "one": { "a": { "table_name": "a", "belongs_to": { "r": { "local_key": "b_id", "to_table": "b" } } } },
        "two": { "c": { "table_name": "c", "belongs_to": { "r": { "local_key": "d_id", "to_table": "d" } } } }
    }"#,
    );

    let report = generate_foreign_keys(&model, &IncludeFilter::all());
    let groups = report.grouped_by_database();
    let names: Vec<&str> = groups.keys().copied().collect();
    assert_eq!(names, vec!["one", "two"]);
    assert_eq!(groups["two"].len(), 1);
}
