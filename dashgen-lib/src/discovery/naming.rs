//! Name normalization shared by prefixes, metric names and alert references.

/// Characters Prometheus client libraries replace with `_` in metric names.
const REPLACED_CHARS: [char; 4] = ['.', '-', '#', ' '];

/// Replace `.`, `-`, `#` and spaces with `_`, and lowercase unless `case_sensitive`.
#[must_use]
pub fn normalize_name(name: &str, case_sensitive: bool) -> String {
    let replaced = name.replace(REPLACED_CHARS, "_");
    if case_sensitive { replaced } else { replaced.to_lowercase() }
}

/// Strip one layer of surrounding double quotes, then surrounding whitespace.
#[must_use]
pub fn strip_quotes(s: &str) -> &str {
    let s = s.strip_prefix('"').unwrap_or(s);
    let s = s.strip_suffix('"').unwrap_or(s);
    s.trim()
}

/// Uppercase the first letter of every word.
///
/// Letters, digits and `_` continue a word; everything else separates words, so
/// `calcError` becomes `CalcError` and `my-app` becomes `My-App`.
#[must_use]
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;

    for c in s.chars() {
        if at_word_start {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }

        at_word_start = !(c.is_alphanumeric() || c == '_');
    }

    out
}

/// Remove the separators that are not wanted in an alert name prefix.
#[must_use]
pub fn compact_display_prefix(s: &str) -> String {
    s.chars().filter(|c| !matches!(c, '_' | '-' | ' ')).collect()
}

/// Truncate to at most `max` bytes, preferring to cut at the last word boundary.
#[must_use]
pub fn truncate_at_word(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }

    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }

    let head = &s[..end];
    head.rfind([' ', '.', ',', ':', ';', '-']).map_or(head, |last| &head[..last])
}
