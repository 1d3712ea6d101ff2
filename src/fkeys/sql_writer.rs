//! Foreign-key SQL file output

use std::fmt::Write as _;
use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, Local};

use super::ForeignKeyReport;
use crate::error::SchemaMapError;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Header comment block written at the top of the output file
#[derive(Debug, Clone)]
pub struct SqlFileHeader {
    pub generated_at: DateTime<Local>,
    /// Command line that produced the file
    pub command: String,
}

impl SqlFileHeader {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            generated_at: Local::now(),
            command: command.into(),
        }
    }
}

/// Render the full file contents for a report.
pub fn render_foreign_key_sql(report: &ForeignKeyReport, header: &SqlFileHeader) -> String {
    let mut out = String::new();
    out.push_str("-- Generated PostgreSQL Foreign Key Statements\n");
    out.push_str("-- Source: relational model\n");
    let _ = writeln!(
        out,
        "-- Generated on: {}",
        header.generated_at.format(TIMESTAMP_FORMAT)
    );
    let _ = writeln!(out, "-- Command: {}", header.command);
    out.push('\n');

    if report.is_empty() {
        out.push_str("-- No foreign key relationships found\n");
        return out;
    }

    for (database, statements) in report.grouped_by_database() {
        let _ = writeln!(out, "-- Database: {database}");
        for statement in statements {
            out.push_str(&statement);
            out.push('\n');
        }
        out.push('\n');
    }

    out
}

/// Write the report to `path`, creating parent directories as needed.
pub fn write_foreign_key_sql(
    path: &Path,
    report: &ForeignKeyReport,
    header: &SqlFileHeader,
) -> Result<()> {
    let write_error = |source| SchemaMapError::OutputWriteError {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }
    std::fs::write(path, render_foreign_key_sql(report, header)).map_err(write_error)?;

    Ok(())
}
