//! Extracted schema representation

use indexmap::IndexMap;

use super::inference::infer_relationship;
use crate::util::collapse_whitespace;

/// A column of an extracted table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    /// Raw type token as written in the source
    pub data_type: String,
    pub is_foreign_key: bool,
    /// Table guessed from the column name; not checked against known tables
    pub foreign_table: Option<String>,
}

impl Column {
    /// Create a column, inferring its foreign-key flags from the name.
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        let name = name.into();
        let inferred = infer_relationship(&name);
        Self {
            name,
            data_type: data_type.into(),
            is_foreign_key: inferred.is_foreign_key,
            foreign_table: inferred.target_table,
        }
    }
}

/// An extracted table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    pub fn push_column(&mut self, column: Column) {
        self.columns.push(column);
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// An inferred relationship whose target is a known table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relationship<'a> {
    pub source_table: &'a str,
    pub source_column: &'a str,
    pub target_table: &'a str,
}

/// Tables that share a section, in first-seen order
#[derive(Debug, Clone)]
pub struct SectionGroup<'a> {
    /// Whitespace-collapsed label used for grouping
    pub key: String,
    /// Label of the first table seen in the group, as written
    pub label: &'a str,
    pub tables: Vec<&'a Table>,
}

/// Aggregate result of scanning one or more SQL files
///
/// Both maps keep insertion order. Re-inserting an existing key replaces the value but keeps
/// its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaModel {
    pub tables: IndexMap<String, Table>,
    /// Table name to section label
    pub sections: IndexMap<String, String>,
}

impl SchemaModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a table; a table with the same name is replaced.
    pub fn insert_table(&mut self, table: Table) {
        self.tables.insert(table.name.clone(), table);
    }

    /// Assign a table to a section; a previous assignment is replaced.
    pub fn assign_section(&mut self, table_name: impl Into<String>, label: impl Into<String>) {
        self.sections.insert(table_name.into(), label.into());
    }

    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    pub fn section_of(&self, table_name: &str) -> Option<&str> {
        self.sections.get(table_name).map(String::as_str)
    }

    pub fn contains_table(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Fold another model into this one.
    ///
    /// Tables and section assignments from `other` win on name collisions (last write wins),
    /// which is how a later file overrides an earlier one.
    pub fn merge(mut self, other: SchemaModel) -> SchemaModel {
        self.tables.extend(other.tables);
        self.sections.extend(other.sections);
        self
    }

    /// Inferred relationships whose guessed target is a table in this model.
    ///
    /// One entry per foreign-key column, in table then column order.
    pub fn relationships(&self) -> Vec<Relationship<'_>> {
        self.tables
            .values()
            .flat_map(|table| {
                table.columns.iter().filter_map(move |column| {
                    let target = column.foreign_table.as_deref()?;
                    (column.is_foreign_key && self.contains_table(target)).then_some(
                        Relationship {
                            source_table: &table.name,
                            source_column: &column.name,
                            target_table: target,
                        },
                    )
                })
            })
            .collect()
    }

    /// Group tables by normalized section label.
    ///
    /// Returns the sectioned groups in first-seen order and the tables without a section.
    pub fn section_groups(&self) -> (Vec<SectionGroup<'_>>, Vec<&Table>) {
        let mut groups: IndexMap<String, SectionGroup<'_>> = IndexMap::new();
        let mut unassigned = Vec::new();

        for (name, table) in &self.tables {
            match self.section_of(name) {
                Some(label) => {
                    let key = collapse_whitespace(label);
                    groups
                        .entry(key.clone())
                        .or_insert_with(|| SectionGroup {
                            key,
                            label,
                            tables: Vec::new(),
                        })
                        .tables
                        .push(table);
                }
                None => unassigned.push(table),
            }
        }

        (groups.into_values().collect(), unassigned)
    }
}
