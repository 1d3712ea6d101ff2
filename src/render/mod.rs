//! Diagram rendering for an extracted schema model

mod graphviz;
mod markdown;
mod mermaid;

pub use graphviz::{escape_html, render_graphviz, table_html};
pub use markdown::render_markdown;
pub use mermaid::{node_id, render_mermaid, table_content};

/// Light pastel fills for table nodes
pub const PASTEL_COLORS: [&str; 8] = [
    "#FFE5E5", "#E5F3FF", "#E5FFE5", "#FFF5E5", "#F0E5FF", "#FFFFE5", "#E5FFFF", "#FFE5F5",
];

/// Darker fills for section backgrounds, paired by index with [`PASTEL_COLORS`]
pub const SECTION_COLORS: [&str; 8] = [
    "#FFB3B3", "#B3D9FF", "#B3FFB3", "#FFCCB3", "#D9B3FF", "#FFFFB3", "#B3FFFF", "#FFB3E5",
];

/// Table fill for the group at `index`
pub fn table_color(index: usize) -> &'static str {
    PASTEL_COLORS[index % PASTEL_COLORS.len()]
}

/// Section fill for the group at `index`
pub fn section_color(index: usize) -> &'static str {
    SECTION_COLORS[index % SECTION_COLORS.len()]
}

/// Suffix appended to the type of foreign-key columns
pub(crate) const FK_MARKER: &str = " (FK)";
