//! Markdown document wrapping a Mermaid diagram

use std::fmt::Write as _;

/// Wrap Mermaid text in a markdown page followed by a numbered list of the source files.
///
/// `sources` are shown as given, linked by their own path and labelled by file name.
pub fn render_markdown<S: AsRef<str>>(mermaid: &str, sources: &[S]) -> String {
    let mut out = String::from("# Database Schema Diagram\n\n```mermaid\n");
    out.push_str(mermaid);
    out.push_str("\n```\n\n## Source Files\n\n");

    for (i, source) in sources.iter().enumerate() {
        let source = source.as_ref();
        let name = source.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(source);
        let _ = writeln!(out, "{}. [{}]({})", i + 1, name, source);
    }

    out
}
