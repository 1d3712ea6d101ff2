//! Schema model building

mod builder;
mod inference;
mod schema_model;

pub use builder::{build_table, extract, parse_sql_file, parse_sql_files};
pub use inference::{infer_relationship, InferredRelationship, FOREIGN_KEY_SUFFIX};
pub use schema_model::{Column, Relationship, SchemaModel, SectionGroup, Table};
