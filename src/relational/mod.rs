//! Persisted relational model: loading, traversal and table selection

mod include_pattern;
mod loader;
mod model;

pub use include_pattern::{IncludeFilter, IncludePattern};
pub use loader::{load_relational_model, parse_relational_model, ParseFailure};
pub use model::{
    is_table_object, BelongsTo, ColumnEntry, ModelTable, RelationalModel, TableEntry,
    TableLocation, TABLE_MARKER_KEY,
};
