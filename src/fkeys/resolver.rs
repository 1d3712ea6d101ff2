//! Foreign-key resolution and deduplication
//!
//! Relationships come from two places in a table entry: the named `belongs_to` records and
//! the `column_data` entries flagged as foreign or linked keys. Both are adapted into a
//! [`ForeignKeyCandidate`] and go through the same [`resolve`] function, so qualification
//! rules cannot drift between the two sources.
//!
//! Qualification rules:
//!
//! - source is `schema.table` for tables found in a schema container, else `database.table`
//! - target is `to_schema.to_table` when the relationship names a schema; otherwise
//!   `source_schema.to_table` when the source has a schema (same-schema assumption, a
//!   heuristic that is not checked against the model); otherwise `to_db.to_table` with
//!   `to_db` defaulting to the source database
//! - the target column is always `id`

use std::collections::HashSet;
use std::fmt;

use indexmap::IndexMap;

use crate::error::ResolveError;
use crate::relational::{
    BelongsTo, ColumnEntry, IncludeFilter, ModelTable, RelationalModel, TableLocation,
};

/// Column referenced on the target side of every generated constraint
pub const TARGET_COLUMN: &str = "id";

/// Where a candidate relationship was declared
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelationshipOrigin {
    /// A named `belongs_to` record
    BelongsTo(String),
    /// A `column_data` entry; the column name may be missing
    Column(Option<String>),
}

impl fmt::Display for RelationshipOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationshipOrigin::BelongsTo(name) => write!(f, "relationship {name}"),
            RelationshipOrigin::Column(Some(name)) => write!(f, "column FK {name}"),
            RelationshipOrigin::Column(None) => write!(f, "column FK <unnamed>"),
        }
    }
}

/// A relationship before qualification, independent of where it was declared
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeyCandidate {
    pub origin: RelationshipOrigin,
    pub local_key: Option<String>,
    pub to_table: Option<String>,
    pub to_db: Option<String>,
    pub to_schema: Option<String>,
}

impl ForeignKeyCandidate {
    /// Adapt a named `belongs_to` record.
    pub fn from_belongs_to(name: &str, record: &BelongsTo) -> Self {
        Self {
            origin: RelationshipOrigin::BelongsTo(name.to_string()),
            local_key: record.local_key.clone(),
            to_table: record.to_table.clone(),
            to_db: record.to_db.clone(),
            to_schema: record.to_schema.clone(),
        }
    }

    /// Adapt a column entry; `None` unless the column declares a foreign table.
    pub fn from_column(column: &ColumnEntry) -> Option<Self> {
        if !column.declares_foreign_key() {
            return None;
        }
        Some(Self {
            origin: RelationshipOrigin::Column(column.column_name.clone()),
            local_key: column.column_name.clone(),
            to_table: column.foreign_table.clone(),
            to_db: column.foreign_db.clone(),
            to_schema: None,
        })
    }
}

/// Deduplication key: source ref, local key, target ref, and target column
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConstraintIdentity(String);

impl ConstraintIdentity {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConstraintIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A fully qualified foreign key ready to be emitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedForeignKey {
    /// Database the source table was found in, used for grouping output
    pub source_database: String,
    pub source_table: String,
    pub source_ref: String,
    pub local_key: String,
    pub target_ref: String,
    pub target_column: String,
}

impl ResolvedForeignKey {
    pub fn constraint_name(&self) -> String {
        format!("fk_{}_{}", self.source_table, self.local_key)
    }

    pub fn identity(&self) -> ConstraintIdentity {
        ConstraintIdentity(format!(
            "{}.{} -> {}.{}",
            self.source_ref, self.local_key, self.target_ref, self.target_column
        ))
    }

    /// The `ALTER TABLE ... ADD CONSTRAINT ... FOREIGN KEY ... REFERENCES ...` statement
    pub fn to_sql(&self) -> String {
        format!(
            "ALTER TABLE {} ADD CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {}({});",
            self.source_ref,
            self.constraint_name(),
            self.local_key,
            self.target_ref,
            self.target_column
        )
    }
}

/// Qualified reference for the table a relationship is declared on.
pub fn source_reference(source: &TableLocation) -> String {
    let scope = source.schema.as_deref().unwrap_or(&source.database);
    format!("{}.{}", scope, source.table)
}

/// Qualified reference for the target of a relationship declared on `source`.
pub fn target_reference(
    source: &TableLocation,
    to_table: &str,
    to_db: Option<&str>,
    to_schema: Option<&str>,
) -> String {
    let scope = to_schema
        .or(source.schema.as_deref())
        .or(to_db)
        .unwrap_or(&source.database);
    format!("{scope}.{to_table}")
}

/// Resolve one candidate against the table it was declared on.
pub fn resolve(
    source: &TableLocation,
    candidate: &ForeignKeyCandidate,
) -> Result<ResolvedForeignKey, ResolveError> {
    let local_key = non_empty(&candidate.local_key).ok_or(ResolveError::MissingLocalKey)?;
    let to_table = non_empty(&candidate.to_table).ok_or(ResolveError::MissingTargetTable)?;

    Ok(ResolvedForeignKey {
        source_database: source.database.clone(),
        source_table: source.table.clone(),
        source_ref: source_reference(source),
        local_key: local_key.to_string(),
        target_ref: target_reference(
            source,
            to_table,
            non_empty(&candidate.to_db),
            non_empty(&candidate.to_schema),
        ),
        target_column: TARGET_COLUMN.to_string(),
    })
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Candidates of one table in processing order: `belongs_to` first, then columns.
///
/// Records that cannot be decoded come back as skips; the table's other records are unaffected.
pub fn table_candidates(table: &ModelTable) -> Vec<Result<ForeignKeyCandidate, SkippedRelationship>> {
    let malformed = |origin: RelationshipOrigin, message: String| SkippedRelationship {
        source: table.location.clone(),
        origin,
        reason: ResolveError::MalformedRecord { message },
    };

    let belongs_to = table.entry.belongs_to_records().map(|(name, record)| match record {
        Ok(record) => Ok(ForeignKeyCandidate::from_belongs_to(name, &record)),
        Err(message) => Err(malformed(RelationshipOrigin::BelongsTo(name.to_string()), message)),
    });
    let columns = table.entry.columns().filter_map(|column| match column {
        Ok(column) => ForeignKeyCandidate::from_column(&column).map(Ok),
        Err((name, message)) => Some(Err(malformed(RelationshipOrigin::Column(name), message))),
    });
    belongs_to.chain(columns).collect()
}

/// A relationship that could not be resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRelationship {
    pub source: TableLocation,
    pub origin: RelationshipOrigin,
    pub reason: ResolveError,
}

impl fmt::Display for SkippedRelationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Skipping {} in {}: {}", self.origin, self.source, self.reason)
    }
}

/// Outcome of foreign-key generation over a model
#[derive(Debug, Clone, Default)]
pub struct ForeignKeyReport {
    /// Unique foreign keys, first occurrence wins
    pub foreign_keys: Vec<ResolvedForeignKey>,
    /// Relationships dropped because an identical constraint was already emitted
    pub duplicates: usize,
    pub skipped: Vec<SkippedRelationship>,
    /// Tables visited after include filtering
    pub tables_processed: usize,
}

impl ForeignKeyReport {
    pub fn statements(&self) -> Vec<String> {
        self.foreign_keys.iter().map(ResolvedForeignKey::to_sql).collect()
    }

    /// Statements grouped by source database, groups in first-seen order.
    pub fn grouped_by_database(&self) -> IndexMap<&str, Vec<String>> {
        let mut groups: IndexMap<&str, Vec<String>> = IndexMap::new();
        for fk in &self.foreign_keys {
            groups
                .entry(fk.source_database.as_str())
                .or_default()
                .push(fk.to_sql());
        }
        groups
    }

    pub fn is_empty(&self) -> bool {
        self.foreign_keys.is_empty()
    }
}

/// Accumulates resolved keys, dropping repeats of an identity already seen
#[derive(Debug, Default)]
pub struct ForeignKeyCollector {
    seen: HashSet<ConstraintIdentity>,
    report: ForeignKeyReport,
}

impl ForeignKeyCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve and record a candidate. Returns `true` if a new statement was added.
    pub fn add(&mut self, source: &TableLocation, candidate: &ForeignKeyCandidate) -> bool {
        match resolve(source, candidate) {
            Ok(fk) => {
                if self.seen.insert(fk.identity()) {
                    tracing::debug!(constraint = %fk.constraint_name(), "generated FK from {}", candidate.origin);
                    self.report.foreign_keys.push(fk);
                    true
                } else {
                    tracing::debug!(identity = %fk.identity(), "duplicate FK dropped");
                    self.report.duplicates += 1;
                    false
                }
            }
            Err(reason) => {
                self.skip(SkippedRelationship {
                    source: source.clone(),
                    origin: candidate.origin.clone(),
                    reason,
                });
                false
            }
        }
    }

    /// Record a relationship that produced no statement.
    pub fn skip(&mut self, skipped: SkippedRelationship) {
        tracing::warn!("{skipped}");
        self.report.skipped.push(skipped);
    }

    pub fn finish(self) -> ForeignKeyReport {
        self.report
    }
}

/// Generate deduplicated foreign keys for every included table of a model.
///
/// Order is databases, schemas, tables, then each table's `belongs_to` records followed by
/// its flagged columns, all in stored order, so repeated runs give identical output.
pub fn generate_foreign_keys(model: &RelationalModel, filter: &IncludeFilter) -> ForeignKeyReport {
    let mut collector = ForeignKeyCollector::new();
    let mut tables_processed = 0;

    for table in model.tables() {
        if !filter.includes(&table.location) {
            continue;
        }
        tables_processed += 1;
        tracing::debug!(table = %table.location, "processing table");

        for candidate in table_candidates(&table) {
            match candidate {
                Ok(candidate) => {
                    collector.add(&table.location, &candidate);
                }
                Err(skipped) => collector.skip(skipped),
            }
        }
    }

    let mut report = collector.finish();
    report.tables_processed = tables_processed;
    report
}
