//! Persisted relational model
//!
//! The model is a nested JSON object keyed by database name. Below a database the entries are
//! either tables (2-level layout) or schemas holding tables (3-level layout):
//!
//! ```json
//! { "blog_db": { "users": { "table_name": "users", ... } } }
//! { "blog_db": { "public": { "users": { "table_name": "users", ... } } } }
//! ```
//!
//! An object carrying a `table_name` key is a table; any other object is a schema container.
//! Non-object values are ignored wherever they appear.

use std::fmt;

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::error::SchemaMapError;

/// Key whose presence marks an object as a table entry
pub const TABLE_MARKER_KEY: &str = "table_name";

/// An explicit foreign-key-like association stored under a table's `belongs_to`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BelongsTo {
    #[serde(default, deserialize_with = "lenient_string")]
    pub local_key: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub to_table: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub to_db: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub to_schema: Option<String>,
}

/// A column entry from a table's `column_data`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ColumnEntry {
    #[serde(default, deserialize_with = "lenient_string")]
    pub column_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub data_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_foreign_key: Option<bool>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_linked_key: Option<bool>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub foreign_db: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub foreign_table: Option<String>,
}

impl ColumnEntry {
    /// Whether the column declares a foreign table through either key flag.
    pub fn declares_foreign_key(&self) -> bool {
        let flagged = self.is_foreign_key.unwrap_or(false) || self.is_linked_key.unwrap_or(false);
        flagged && self.foreign_table.as_deref().is_some_and(|t| !t.is_empty())
    }
}

// Values of the wrong JSON type read as absent instead of failing the whole entry
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?.as_bool())
}

/// The parts of a table entry used for foreign-key generation
///
/// `belongs_to` and `column_data` records stay raw JSON and are decoded one at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TableEntry {
    #[serde(default, deserialize_with = "lenient_string")]
    pub table_name: Option<String>,
    #[serde(default)]
    pub belongs_to: IndexMap<String, Value>,
    #[serde(default)]
    pub column_data: Vec<Value>,
}

impl TableEntry {
    /// `belongs_to` records in stored order, each decoded on its own.
    pub fn belongs_to_records(&self) -> impl Iterator<Item = (&str, Result<BelongsTo, String>)> + '_ {
        self.belongs_to
            .iter()
            .map(|(name, value)| (name.as_str(), decode_record(value)))
    }

    /// `column_data` entries in stored order, each decoded on its own.
    ///
    /// A failed entry carries its `column_name` when one can still be read.
    pub fn columns(&self) -> impl Iterator<Item = Result<ColumnEntry, (Option<String>, String)>> + '_ {
        self.column_data.iter().map(|value| {
            decode_record(value).map_err(|message| {
                let name = value
                    .get("column_name")
                    .and_then(Value::as_str)
                    .map(str::to_string);
                (name, message)
            })
        })
    }
}

fn decode_record<T: DeserializeOwned>(value: &Value) -> Result<T, String> {
    if !value.is_object() {
        return Err(format!("expected an object, found {}", json_kind(value)));
    }
    T::deserialize(value).map_err(|err| err.to_string())
}

/// Where a table was found in the model
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableLocation {
    pub database: String,
    /// Set when the table sits inside a schema container
    pub schema: Option<String>,
    /// Key of the table in its container
    pub table: String,
}

impl TableLocation {
    pub fn new(database: &str, schema: Option<&str>, table: &str) -> Self {
        Self {
            database: database.to_string(),
            schema: schema.map(str::to_string),
            table: table.to_string(),
        }
    }
}

impl fmt::Display for TableLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.schema {
            Some(schema) => write!(f, "{}.{}.{}", self.database, schema, self.table),
            None => write!(f, "{}.{}", self.database, self.table),
        }
    }
}

/// A table visited during traversal
#[derive(Debug, Clone)]
pub struct ModelTable {
    pub location: TableLocation,
    pub entry: TableEntry,
}

/// A loaded relational model
#[derive(Debug, Clone, Default)]
pub struct RelationalModel {
    databases: Map<String, Value>,
}

impl RelationalModel {
    /// Wrap a decoded JSON document; the root must be an object.
    pub fn from_value(value: Value) -> Result<Self, SchemaMapError> {
        match value {
            Value::Object(databases) => Ok(Self { databases }),
            other => Err(SchemaMapError::InvalidModelFormat {
                message: format!("expected a JSON object at the root, found {}", json_kind(&other)),
            }),
        }
    }

    /// Database names in stored order
    pub fn database_names(&self) -> impl Iterator<Item = &str> {
        self.databases
            .iter()
            .filter(|(_, v)| v.is_object())
            .map(|(k, _)| k.as_str())
    }

    /// Visit every table: databases, then schemas (if present), then tables, in stored order.
    ///
    /// Table entries that cannot be decoded are logged and skipped.
    pub fn tables(&self) -> Vec<ModelTable> {
        let mut tables = Vec::new();

        for (db_name, db_value) in &self.databases {
            let Some(children) = db_value.as_object() else {
                continue;
            };
            tracing::debug!(database = %db_name, "processing database");

            for (name, value) in children {
                let Some(object) = value.as_object() else {
                    continue;
                };

                if is_table_object(object) {
                    push_table(&mut tables, TableLocation::new(db_name, None, name), value);
                    continue;
                }

                tracing::debug!(database = %db_name, schema = %name, "processing schema");
                for (table_name, table_value) in object {
                    if !table_value.is_object() {
                        continue;
                    }
                    push_table(
                        &mut tables,
                        TableLocation::new(db_name, Some(name), table_name),
                        table_value,
                    );
                }
            }
        }

        tables
    }
}

/// Whether an object is a table entry rather than a schema container.
pub fn is_table_object(object: &Map<String, Value>) -> bool {
    object.contains_key(TABLE_MARKER_KEY)
}

fn push_table(tables: &mut Vec<ModelTable>, location: TableLocation, value: &Value) {
    match TableEntry::deserialize(value) {
        Ok(entry) => tables.push(ModelTable { location, entry }),
        Err(err) => {
            tracing::warn!(table = %location, error = %err, "skipping malformed table entry");
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
