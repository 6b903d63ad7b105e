//! Search-term controller behind the header search box.
//!
//! Time is passed in by the caller so the debounce is testable.

use std::time::{Duration, Instant};

/// Quiet period after the last keystroke before navigating.
pub const DEBOUNCE: Duration = Duration::from_millis(300);

/// Path of the search results page.
pub const SEARCH_PATH: &str = "/search";

/// Trim and collapse internal whitespace. Returns `None` for blank terms.
pub fn normalize(term: &str) -> Option<String> {
    let collapsed = term.split_whitespace().collect::<Vec<_>>().join(" ");
    (!collapsed.is_empty()).then_some(collapsed)
}

/// `/search?q=<term>` for a non-blank term.
pub fn search_href(term: &str) -> Option<String> {
    normalize(term).map(|t| format!("{SEARCH_PATH}?q={}", urlencoding::encode(&t)))
}

#[derive(Debug, Clone, Default)]
pub struct SearchTerm {
    term: String,
    edited_at: Option<Instant>,
}

impl SearchTerm {
    pub fn new(initial: &str) -> Self {
        Self {
            term: initial.to_string(),
            edited_at: None,
        }
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn change(&mut self, term: &str, now: Instant) {
        self.term = term.to_string();
        self.edited_at = Some(now);
    }

    /// Yields the navigation target once the debounce has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let edited_at = self.edited_at?;
        if now.saturating_duration_since(edited_at) < DEBOUNCE {
            return None;
        }
        self.edited_at = None;
        search_href(&self.term)
    }

    /// Enter pressed: navigate immediately.
    pub fn submit(&mut self) -> Option<String> {
        self.edited_at = None;
        search_href(&self.term)
    }

    pub fn clear(&mut self) {
        self.term.clear();
        self.edited_at = None;
    }

    pub fn is_pending(&self) -> bool {
        self.edited_at.is_some()
    }
}
