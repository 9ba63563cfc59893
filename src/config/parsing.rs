//! Line-level helpers for `key = value` configuration files.

/// What: Check if a line should be skipped (empty or comment).
///
/// Details:
/// - Skips empty lines and lines starting with `#`, `//`, or `;`
pub(crate) fn skip_comment_or_empty(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty()
        || trimmed.starts_with('#')
        || trimmed.starts_with("//")
        || trimmed.starts_with(';')
}

/// What: Parse a key-value pair from a line.
///
/// Output:
/// - `Some((key, value))` with the key normalized by [`normalize_key`] and the value
///   stripped of inline comments; `None` when the line has no `=`.
pub(crate) fn parse_key_value(line: &str) -> Option<(String, String)> {
    let (k, v) = line.trim().split_once('=')?;
    Some((normalize_key(k), strip_inline_comment(v).to_string()))
}

/// What: Lowercase a key and fold `.`, `-` and spaces into `_`.
pub(crate) fn normalize_key(raw: &str) -> String {
    raw.trim().to_lowercase().replace(['.', '-', ' '], "_")
}

/// What: Remove an inline comment from a value.
///
/// Details:
/// - A comment starts at `#` or `//` preceded by whitespace, so URLs such as
///   `https://host/path#frag` survive intact.
pub(crate) fn strip_inline_comment(s: &str) -> &str {
    let bytes = s.as_bytes();
    let mut end = s.len();
    for (i, w) in bytes.windows(2).enumerate() {
        let starts_comment = w[1] == b'#' || (w[1] == b'/' && bytes.get(i + 2) == Some(&b'/'));
        if w[0].is_ascii_whitespace() && starts_comment {
            end = i;
            break;
        }
    }
    s[..end].trim()
}
