//! Splitting a table body into column and constraint fragments

/// Split a table body at top-level commas.
///
/// Commas nested inside parentheses (numeric precision, enum lists, constraint column lists)
/// or inside quoted runs do not split. Each fragment is trimmed and empty fragments are
/// dropped. The splitter knows nothing about SQL keywords.
pub fn split_top_level_commas(body: &str) -> Vec<String> {
    let estimated_parts = (body.len() / 30).max(1);
    let mut parts = Vec::with_capacity(estimated_parts);
    let mut current = String::new();
    let mut depth: i32 = 0;
    let mut quote: Option<char> = None;

    for c in body.chars() {
        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            current.push(c);
            continue;
        }

        match c {
            '\'' | '"' => {
                quote = Some(c);
                current.push(c);
            }
            '(' => {
                depth += 1;
                current.push(c);
            }
            ')' => {
                depth -= 1;
                current.push(c);
            }
            ',' if depth == 0 => {
                push_fragment(&mut parts, &current);
                current.clear();
            }
            _ => current.push(c),
        }
    }

    push_fragment(&mut parts, &current);
    parts
}

fn push_fragment(parts: &mut Vec<String>, fragment: &str) {
    let trimmed = fragment.trim();
    if !trimmed.is_empty() {
        parts.push(trimmed.to_string());
    }
}
