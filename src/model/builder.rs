//! Build a schema model from SQL source text
//!
//! Each file is extracted on its own and the results are folded together in input order, so the
//! merge rule (later files win) lives in one place: [`SchemaModel::merge`].

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::parser::{
    annotate_sections, classify_fragment, read_sql_source, scan_statements,
    split_top_level_commas, ColumnFragment, StatementSpan,
};

use super::{Column, SchemaModel, Table};

/// Build a table from a scanned statement, dropping constraints and unusable fragments.
pub fn build_table(statement: &StatementSpan) -> Table {
    let mut table = Table::new(&statement.table_name);

    for fragment in split_top_level_commas(&statement.body) {
        match classify_fragment(&fragment) {
            ColumnFragment::Column(parsed) => {
                table.push_column(Column::new(parsed.name, parsed.data_type));
            }
            ColumnFragment::Constraint => {}
            ColumnFragment::Hidden(name) => {
                tracing::debug!(table = %table.name, column = %name, "skipping hidden column");
            }
            ColumnFragment::Malformed => {
                tracing::debug!(table = %table.name, fragment = %fragment, "skipping malformed column definition");
            }
        }
    }

    table
}

/// Extract tables and section assignments from the text of one SQL file.
pub fn extract(content: &str) -> SchemaModel {
    let lines: Vec<&str> = content.lines().collect();
    let mut model = SchemaModel::new();

    for statement in scan_statements(&lines) {
        let table = build_table(&statement);
        tracing::debug!(table = %table.name, columns = table.columns.len(), "parsed table");
        model.insert_table(table);
    }

    for assignment in annotate_sections(&lines) {
        model.assign_section(assignment.table_name, assignment.label);
    }

    model
}

/// Parse a single SQL file
pub fn parse_sql_file(path: &Path) -> Result<SchemaModel> {
    let content = read_sql_source(path)?;
    Ok(extract(&content))
}

/// Parse SQL files in order and fold them into one model
pub fn parse_sql_files(files: &[PathBuf]) -> Result<SchemaModel> {
    let mut model = SchemaModel::new();

    for file in files {
        tracing::info!("Parsing {}...", file.display());
        let extracted = parse_sql_file(file)?;
        tracing::info!("Found {} tables in {}", extracted.len(), file.display());
        model = model.merge(extracted);
    }

    Ok(model)
}
