//! Movie field bounds and list-filter helpers.

/// Longest accepted title, in characters.
pub const MAX_TITLE_LEN: u64 = 255;

pub const MIN_RELEASE_YEAR: i32 = 1800;
pub const MAX_RELEASE_YEAR: i32 = 3000;

pub fn is_valid_title(title: &str) -> bool {
    let len = title.chars().count() as u64;
    (1..=MAX_TITLE_LEN).contains(&len)
}

pub fn is_valid_release_year(year: i32) -> bool {
    (MIN_RELEASE_YEAR..=MAX_RELEASE_YEAR).contains(&year)
}

/// Parse the raw `release_year` query value.
///
/// Only a plain run of ASCII digits is accepted: no sign, no whitespace,
/// nothing that overflows `i32`.
pub fn parse_release_year(raw: &str) -> Option<i32> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

/// Build an `ILIKE` pattern matching `term` anywhere in the column.
///
/// `%`, `_` and `\` in the term are escaped so they match literally.
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Turn an optional text filter into an `ILIKE` pattern; empty terms mean
/// "no filter".
pub fn text_filter(term: Option<&str>) -> Option<String> {
    term.filter(|t| !t.is_empty()).map(contains_pattern)
}
