//! Foreign-key DDL generation from a relational model

mod resolver;
mod sql_writer;

pub use resolver::{
    generate_foreign_keys, resolve, source_reference, table_candidates, target_reference,
    ConstraintIdentity, ForeignKeyCandidate, ForeignKeyCollector, ForeignKeyReport,
    RelationshipOrigin, ResolvedForeignKey, SkippedRelationship, TARGET_COLUMN,
};
pub use sql_writer::{render_foreign_key_sql, write_foreign_key_sql, SqlFileHeader};
