//! String utilities for the domain layer.

/// Build a single-line preview of `s`, at most `max_len` bytes (UTF-8 safe).
///
/// Line breaks and runs of whitespace collapse to one space. When the text
/// has to be cut, the preview ends with `...`.
pub fn preview(s: &str, max_len: usize) -> String {
    let flat = s.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.len() <= max_len {
        return flat;
    }

    let target = max_len.saturating_sub(3);
    let mut end = target.min(flat.len());
    while end > 0 && !flat.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &flat[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_short_text_unchanged() {
        assert_eq!(preview("hello", 10), "hello");
    }

    #[test]
    fn test_preview_truncates_with_ellipsis() {
        assert_eq!(preview("hello world", 8), "hello...");
    }

    #[test]
    fn test_preview_flattens_newlines() {
        assert_eq!(
            preview("Summarize the following text:\n\n\"{selection}\"", 80),
            "Summarize the following text: \"{selection}\""
        );
    }

    #[test]
    fn test_preview_multibyte_boundary() {
        // 'é' is 2 bytes; cutting inside it must back up
        assert_eq!(preview("ééééé", 6), "é...");
    }

    #[test]
    fn test_preview_empty() {
        assert_eq!(preview("", 10), "");
        assert_eq!(preview("  \n ", 10), "");
    }
}
