//! Small display helpers for dates, widths and counts.
//!
//! The functions in this module are used by the renderer, the `--list`
//! printer and the log timer.

use chrono::{DateTime, Local, Utc};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// What: Format a timestamp as a short calendar date.
///
/// Output:
/// - `YYYY-MM-DD` in UTC, so output does not depend on the viewer's timezone.
#[must_use]
pub fn short_date(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d").to_string()
}

/// What: Current local time as `YYYY-MM-DD-T HH:MM:SS` for log lines.
#[must_use]
pub fn log_timestamp() -> String {
    Local::now().format("%Y-%m-%d-T %H:%M:%S").to_string()
}

/// What: Truncate `s` to at most `max_width` terminal columns.
///
/// Inputs:
/// - `s`: Text to fit
/// - `max_width`: Column budget
///
/// Output:
/// - `s` unchanged when it fits; otherwise a prefix ending in `…` that fits the budget.
///
/// Details:
/// - Widths are measured with `unicode-width`, so wide CJK glyphs count as two columns.
#[must_use]
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let budget = max_width - 1;
    let mut used = 0usize;
    let mut out = String::new();
    for ch in s.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}

/// What: `"1 show"` / `"3 shows"` style counts.
#[must_use]
pub fn plural(n: usize, singular: &str, plural: &str) -> String {
    if n == 1 {
        format!("{n} {singular}")
    } else {
        format!("{n} {plural}")
    }
}
