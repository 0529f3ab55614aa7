//! Terminal display width helpers.
//!
//! Screen names may carry ANSI styling; everything here measures the visible
//! text only so breadcrumb clamping lines up with what the terminal draws.

use unicode_width::UnicodeWidthChar;

/// Remove ANSI escape sequences, returning the visible text.
pub fn strip_ansi(text: &str) -> String {
    let clean = strip_ansi_escapes::strip(text);
    String::from_utf8_lossy(&clean).into_owned()
}

/// Compute the display width of a string after stripping ANSI escapes.
pub fn display_width(text: &str) -> usize {
    unicode_width::UnicodeWidthStr::width(strip_ansi(text).as_str())
}

/// Keep the trailing part of `text` that fits in `max_width` columns.
///
/// Styling is dropped. Wide characters that would straddle the boundary are
/// left out rather than split.
pub fn truncate_left(text: &str, max_width: usize) -> String {
    let clean = strip_ansi(text);
    let mut width = 0usize;
    let mut kept = Vec::new();
    for ch in clean.chars().rev() {
        let w = ch.width().unwrap_or(0);
        if width + w > max_width {
            break;
        }
        width += w;
        kept.push(ch);
    }
    kept.into_iter().rev().collect()
}
