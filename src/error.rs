//! Error types for schemamap

use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop a run at the collaborator boundary (file access, model loading, output)
#[derive(Error, Debug)]
pub enum SchemaMapError {
    #[error("SQL file not found: {path}")]
    SqlFileNotFound { path: PathBuf },

    #[error("File must have .sql extension: {path}")]
    InvalidSqlExtension { path: PathBuf },

    #[error("Invalid SQL file pattern '{pattern}': {message}")]
    InvalidSqlFilePattern { pattern: String, message: String },

    #[error("Failed to read SQL file: {path}")]
    SqlFileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No tables found in the provided SQL files")]
    NoTablesFound,

    #[error("Input file {path} does not exist")]
    ModelFileNotFound { path: PathBuf },

    #[error("Error reading {path}")]
    ModelReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path} as JSON")]
    ModelParseError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid relational model format: {message}")]
    InvalidModelFormat { message: String },

    #[error("Invalid include pattern '{pattern}': {message}")]
    InvalidIncludePattern { pattern: String, message: String },

    #[error("Failed to write output to {path}")]
    OutputWriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Why a single relationship could not be turned into a foreign-key statement
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("missing local key")]
    MissingLocalKey,

    #[error("missing target table")]
    MissingTargetTable,

    #[error("malformed record: {message}")]
    MalformedRecord { message: String },
}
