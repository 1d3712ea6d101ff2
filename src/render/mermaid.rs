//! Mermaid flowchart output

use std::collections::{HashMap, HashSet};

use super::{section_color, table_color, FK_MARKER};
use crate::model::{SchemaModel, Table};

/// Render the model as a Mermaid `flowchart TD`.
///
/// Sectioned tables are drawn inside one subgraph per section, in first-seen order. Tables
/// without a section follow, sharing the next colour. Edges come last.
pub fn render_mermaid(model: &SchemaModel) -> String {
    let mut lines = vec!["flowchart TD".to_string()];
    let (groups, unassigned) = model.section_groups();
    let ids = NodeIds::new(model);

    for (index, group) in groups.iter().enumerate() {
        let section_id = format!("section_{index}");
        lines.push(format!(
            "    subgraph {section_id}[\"<span style='font-size: 20px; font-weight: bold;'>{}</span>\"]",
            escape_label(group.label.trim())
        ));
        for table in &group.tables {
            lines.push(format!("        {}[\"{}\"]", ids.get(&table.name), table_content(table)));
        }
        lines.push("    end".to_string());
        lines.push(format!(
            "    style {section_id} fill:{},stroke:#333,stroke-width:2px,color:#000",
            section_color(index)
        ));
        for table in &group.tables {
            lines.push(table_style(&ids.get(&table.name), table_color(index)));
        }
    }

    let fill = table_color(groups.len());
    for table in unassigned {
        lines.push(format!("    {}[\"{}\"]", ids.get(&table.name), table_content(table)));
        lines.push(table_style(&ids.get(&table.name), fill));
    }

    for rel in model.relationships() {
        lines.push(format!(
            "    {} --> {}",
            ids.get(rel.source_table),
            ids.get(rel.target_table)
        ));
    }

    lines.join("\n")
}

fn table_style(id: &str, fill: &str) -> String {
    format!("    style {id} fill:{fill},stroke:#333,stroke-width:1px,color:#000")
}

/// Node ids for every table of a model, assigned in table order.
///
/// Names that sanitise to an id already taken get `_2`, `_3`, ... appended.
struct NodeIds<'a> {
    ids: HashMap<&'a str, String>,
}

impl<'a> NodeIds<'a> {
    fn new(model: &'a SchemaModel) -> Self {
        let mut used = HashSet::new();
        let mut ids = HashMap::new();

        for name in model.tables.keys() {
            let base = node_id(name);
            let mut id = base.clone();
            let mut suffix = 2;
            while !used.insert(id.clone()) {
                id = format!("{base}_{suffix}");
                suffix += 1;
            }
            ids.insert(name.as_str(), id);
        }

        Self { ids }
    }

    fn get(&self, name: &str) -> String {
        self.ids.get(name).cloned().unwrap_or_else(|| node_id(name))
    }
}

/// Node label: bold table name, a rule, then one row per column.
pub fn table_content(table: &Table) -> String {
    let mut parts = vec![
        format!(
            "<span style='font-size: 16px;'><b>{}</b></span>",
            escape_label(&table.name)
        ),
        "---".to_string(),
    ];

    for column in &table.columns {
        let marker = if column.is_foreign_key { FK_MARKER } else { "" };
        parts.push(format!(
            "<div style='display: flex; justify-content: space-between; font-size: 12px;'>\
             <span style='text-align: left;'>{}</span>\
             <span style='text-align: right;'>{}{marker}</span></div>",
            escape_label(&column.name),
            escape_label(&column.data_type)
        ));
    }

    parts.join("<br/>")
}

/// Mermaid-safe node id: every character outside `[A-Za-z0-9_]` becomes `_`.
pub fn node_id(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

// Double quotes end a Mermaid label
fn escape_label(text: &str) -> String {
    text.replace('"', "#quot;")
}
