//! Case-insensitive substring matching (the in-memory counterpart of `ILIKE '%term%'`).

/// True when `term` occurs anywhere in `haystack`, ignoring case.
///
/// An empty term matches everything, like `ILIKE '%%'`.
pub fn contains_ignore_case(haystack: &str, term: &str) -> bool {
    haystack.to_lowercase().contains(&term.to_lowercase())
}

/// Escape `%`, `_` and `\` so `term` is matched literally inside an `ILIKE` pattern.
pub fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}
