//! Shared utility helpers.

/// Case-insensitive substring search without allocating an uppercase copy.
#[inline]
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    let needle_bytes = needle.as_bytes();
    let haystack_bytes = haystack.as_bytes();
    if needle_bytes.len() > haystack_bytes.len() {
        return false;
    }
    haystack_bytes
        .windows(needle_bytes.len())
        .any(|window| window.eq_ignore_ascii_case(needle_bytes))
}

/// Case-insensitive starts_with check without allocating.
#[inline]
pub fn starts_with_ci(haystack: &str, needle: &str) -> bool {
    haystack.len() >= needle.len()
        && haystack.as_bytes()[..needle.len()].eq_ignore_ascii_case(needle.as_bytes())
}

/// Case-insensitive keyword prefix check that requires a word boundary after the keyword.
///
/// The keyword must be followed by whitespace, an opening parenthesis, or the end of the
/// input, so `KEY (a)` matches `KEY` but `keyword TEXT` does not.
pub fn starts_with_keyword_ci(haystack: &str, keyword: &str) -> bool {
    if !starts_with_ci(haystack, keyword) {
        return false;
    }
    match haystack[keyword.len()..].chars().next() {
        None => true,
        Some(c) => c.is_whitespace() || c == '(',
    }
}

/// Collapse every run of whitespace into one space and trim both ends.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Byte offset where a trailing `--` line comment starts, ignoring dashes inside quotes.
pub fn line_comment_start(line: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    let mut prev_dash = false;
    for (i, c) in line.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                '\'' | '"' => quote = Some(c),
                '-' if prev_dash => return Some(i - 1),
                _ => {}
            },
        }
        prev_dash = quote.is_none() && c == '-';
    }
    None
}

/// The part of a line before any trailing `--` comment.
pub fn strip_line_comment(line: &str) -> &str {
    match line_comment_start(line) {
        Some(pos) => &line[..pos],
        None => line,
    }
}
