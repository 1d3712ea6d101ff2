//! Loading the relational model from disk

use std::path::Path;

use anyhow::Result;

use super::RelationalModel;
use crate::error::SchemaMapError;

/// Load a relational model JSON file.
///
/// A missing file, an unreadable file, malformed JSON and a non-object root are all reported
/// with the offending path.
pub fn load_relational_model(path: &Path) -> Result<RelationalModel> {
    if !path.exists() {
        return Err(SchemaMapError::ModelFileNotFound {
            path: path.to_path_buf(),
        }
        .into());
    }

    let content = std::fs::read_to_string(path).map_err(|e| SchemaMapError::ModelReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_relational_model(&content).map_err(|err| -> anyhow::Error {
        match err {
            ParseFailure::Json(source) => SchemaMapError::ModelParseError {
                path: path.to_path_buf(),
                source,
            }
            .into(),
            ParseFailure::Format(err) => err.into(),
        }
    })
}

/// Why model text could not be turned into a [`RelationalModel`]
#[derive(Debug)]
pub enum ParseFailure {
    Json(serde_json::Error),
    Format(SchemaMapError),
}

/// Parse relational model JSON text.
pub fn parse_relational_model(content: &str) -> Result<RelationalModel, ParseFailure> {
    let value: serde_json::Value = serde_json::from_str(content).map_err(ParseFailure::Json)?;
    RelationalModel::from_value(value).map_err(ParseFailure::Format)
}
