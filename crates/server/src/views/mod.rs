//! Server-rendered HTML fragments.
//!
//! Every function returns markup as a `String`; [`layout::page`] wraps a
//! body into a full document. Text that came from the catalogue or the
//! request goes through [`escape`].

pub mod cards;
pub mod detail;
pub mod filters;
pub mod format;
pub mod layout;
pub mod pagination;

/// Escape text for use in element content and quoted attributes.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Card grid, or the empty-state box when there is nothing to show.
pub fn grid(cards: &[String], empty_message: &str) -> String {
    if cards.is_empty() {
        return format!(r#"<div class="empty-box">{}</div>"#, escape(empty_message));
    }
    format!(r#"<section class="grid-list">{}</section>"#, cards.concat())
}
