// Output formatting: terminal display for the CLI.

pub mod terminal;

/// Shorten `text` to at most `max_chars` characters, appending "..." when cut.
///
/// Counts characters rather than bytes, so Hangul and emoji never split.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        None => text.to_string(),
        Some((cut, _)) => format!("{}...", &text[..cut]),
    }
}
