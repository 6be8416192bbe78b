//! String helpers for log previews and error bodies.

/// Shorten `s` to at most `max_chars` characters, appending `...` when cut.
///
/// Counts characters rather than bytes so accented text is never split.
pub fn preview(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}...", &s[..cut]),
    }
}
