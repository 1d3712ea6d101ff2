//! Locating and reading SQL source files

use std::path::{Path, PathBuf};

use anyhow::Result;
use encoding_rs::WINDOWS_1252;

use crate::error::SchemaMapError;

/// Read a file as a string, trying UTF-8 first, then Windows-1252 as fallback
fn read_file_with_encoding_fallback(path: &Path) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;

    match String::from_utf8(bytes) {
        Ok(s) => Ok(s),
        Err(err) => {
            // SQL files saved on Windows are often Windows-1252
            let bytes = err.into_bytes();
            let (decoded, _, had_errors) = WINDOWS_1252.decode(&bytes);
            if had_errors {
                Err(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    "File contains invalid characters",
                ))
            } else {
                Ok(decoded.into_owned())
            }
        }
    }
}

/// Read a SQL source file fully, stripping a UTF-8 BOM if present
pub fn read_sql_source(path: &Path) -> Result<String> {
    let content =
        read_file_with_encoding_fallback(path).map_err(|e| SchemaMapError::SqlFileReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

    Ok(match content.strip_prefix('\u{FEFF}') {
        Some(stripped) => stripped.to_string(),
        None => content,
    })
}

/// Whether a path carries a `.sql` extension (any casing)
pub fn has_sql_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("sql"))
}

/// Expand SQL file arguments into concrete paths, validating each one.
///
/// Arguments containing glob metacharacters are expanded (matches sorted per pattern); plain
/// paths are taken as given. Every resulting path must exist and end in `.sql`.
pub fn resolve_sql_inputs(inputs: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::with_capacity(inputs.len());

    for input in inputs {
        if input.contains(['*', '?', '[']) {
            let paths = glob::glob(input).map_err(|e| SchemaMapError::InvalidSqlFilePattern {
                pattern: input.clone(),
                message: e.to_string(),
            })?;
            let mut matched: Vec<PathBuf> = paths.filter_map(|p| p.ok()).collect();
            if matched.is_empty() {
                return Err(SchemaMapError::SqlFileNotFound {
                    path: PathBuf::from(input),
                }
                .into());
            }
            matched.sort();
            files.extend(matched);
        } else {
            files.push(PathBuf::from(input));
        }
    }

    for file in &files {
        if !file.exists() {
            return Err(SchemaMapError::SqlFileNotFound { path: file.clone() }.into());
        }
        if !has_sql_extension(file) {
            return Err(SchemaMapError::InvalidSqlExtension { path: file.clone() }.into());
        }
    }

    Ok(files)
}
