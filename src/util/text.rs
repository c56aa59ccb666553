//! Utility functions for text handling
//!
//! Offsets throughout the crate are char counts, so these helpers convert
//! between char positions and byte indices.

/// Number of chars in a string
#[inline]
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Byte index of the char at `char_idx` (clamped to the end of the string)
pub fn byte_index(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

/// Escape text for inclusion in markup (text content or quoted attribute)
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Drop everything between `<` and `>`.
///
/// This is a plain-text approximation for statistics, not a parser.
pub fn strip_tags(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut in_tag = false;
    for ch in markup.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out
}
