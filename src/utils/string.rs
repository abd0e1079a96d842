//! String utilities for safe text handling

/// Maximum preview length for text in logs
pub const MAX_PREVIEW_LEN: usize = 80;

/// Creates a safe UTF-8 preview of a string, respecting character boundaries.
///
/// Unlike byte slicing (`&s[..n]`), this function will never panic on
/// multi-byte UTF-8 characters. Query documents and formulas can carry
/// arbitrary user text, so log lines go through this.
pub fn safe_preview(text: &str, max_chars: usize) -> String {
    let preview: String = text.chars().take(max_chars).collect();
    if text.chars().nth(max_chars).is_some() {
        format!("{}...", preview)
    } else {
        preview
    }
}
