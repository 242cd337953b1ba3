//! Discord length limits for announcement text
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Add modal input limit
//! - 1.0.0: Embed description truncation

/// Discord embed description limit
pub const EMBED_LIMIT: usize = 4096;

/// Maximum length accepted by the compose modal text input
pub const MODAL_INPUT_LIMIT: u64 = 1900;

/// Truncate text to fit in an embed description (UTF-8 safe)
pub fn truncate_for_embed(text: &str) -> String {
    truncate_chars(text, EMBED_LIMIT)
}

/// Truncate to at most `max_bytes` bytes, appending an ellipsis when cut
fn truncate_chars(text: &str, max_bytes: usize) -> String {
    if text.len() <= max_bytes {
        return text.to_string();
    }

    let budget = max_bytes.saturating_sub('…'.len_utf8());
    let mut end = budget;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…", &text[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_untouched() {
        assert_eq!(truncate_for_embed("hello"), "hello");
    }

    #[test]
    fn test_long_text_fits_limit() {
        let text = "x".repeat(5000);
        let out = truncate_for_embed(&text);
        assert!(out.len() <= EMBED_LIMIT);
        assert!(out.ends_with('…'));
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let text = "é".repeat(3000);
        let out = truncate_for_embed(&text);
        assert!(out.len() <= EMBED_LIMIT);
        assert!(out.chars().all(|c| c == 'é' || c == '…'));
    }
}
