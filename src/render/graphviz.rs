//! Graphviz DOT output with HTML-table nodes

use std::fmt::Write as _;

use super::{section_color, table_color, FK_MARKER};
use crate::model::{SchemaModel, Table};

/// Render the model as a DOT `digraph`.
///
/// Sections become `cluster_N` subgraphs so Graphviz draws a filled box around them.
pub fn render_graphviz(model: &SchemaModel) -> String {
    let mut out = String::new();
    out.push_str("// Database Schema\n");
    out.push_str("digraph {\n");
    out.push_str("\tgraph [bgcolor=white pad=0.5 rankdir=TB]\n");
    out.push_str("\tnode [fontname=Arial shape=plaintext]\n");
    out.push_str("\tedge [fontname=Arial fontsize=10]\n");

    let (groups, unassigned) = model.section_groups();

    for (index, group) in groups.iter().enumerate() {
        let fill = table_color(index);
        let _ = writeln!(out, "\tsubgraph cluster_{index} {{");
        let _ = writeln!(out, "\t\tlabel={}", quote(group.label.trim()));
        out.push_str("\t\tstyle=filled\n");
        let _ = writeln!(out, "\t\tfillcolor=\"{}\"", section_color(index));
        out.push_str("\t\tfontsize=20\n");
        out.push_str("\t\tfontname=\"Arial Bold\"\n");
        out.push_str("\t\tlabeljust=l\n");
        out.push_str("\t\tlabelloc=t\n");
        for table in &group.tables {
            let _ = writeln!(out, "\t\t{}", node(table, fill));
        }
        out.push_str("\t}\n");
    }

    let fill = table_color(groups.len());
    for table in unassigned {
        let _ = writeln!(out, "\t{}", node(table, fill));
    }

    for rel in model.relationships() {
        let _ = writeln!(
            out,
            "\t{} -> {} [arrowhead=crow arrowsize=0.8 color=\"#666666\"]",
            quote(rel.source_table),
            quote(rel.target_table)
        );
    }

    out.push_str("}\n");
    out
}

fn node(table: &Table, fill: &str) -> String {
    format!("{} [label=<{}>]", quote(&table.name), table_html(table, fill))
}

/// HTML-like label for one table: header, black rule, then one row per column.
pub fn table_html(table: &Table, fill: &str) -> String {
    let mut html = format!(
        "<TABLE BORDER=\"1\" CELLBORDER=\"0\" CELLSPACING=\"0\" BGCOLOR=\"{fill}\">\
         <TR><TD COLSPAN=\"2\" BGCOLOR=\"{fill}\"><FONT POINT-SIZE=\"16\"><B>{}</B></FONT></TD></TR>\
         <TR><TD COLSPAN=\"2\" HEIGHT=\"1\" BGCOLOR=\"black\"></TD></TR>",
        escape_html(&table.name)
    );

    if table.columns.is_empty() {
        html.push_str(&row("No columns found", "-"));
    }
    for column in &table.columns {
        let marker = if column.is_foreign_key { FK_MARKER } else { "" };
        html.push_str(&row(
            &escape_html(&column.name),
            &escape_html(&format!("{}{marker}", column.data_type)),
        ));
    }

    html.push_str("</TABLE>");
    html
}

fn row(name: &str, data_type: &str) -> String {
    format!(
        "<TR><TD ALIGN=\"LEFT\"><FONT POINT-SIZE=\"12\">{name}</FONT></TD>\
         <TD ALIGN=\"RIGHT\"><FONT POINT-SIZE=\"12\">{data_type}</FONT></TD></TR>"
    )
}

/// Escape text for an HTML-like label. `&` goes first so entities are not double-escaped.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn quote(id: &str) -> String {
    format!("\"{}\"", id.replace('\\', "\\\\").replace('"', "\\\""))
}
