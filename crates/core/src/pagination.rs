//! Page-number window for list navigation.
//!
//! The remote catalogue reports totals in the tens of thousands but refuses
//! pages past 500, so totals are clamped before the window is computed.

use serde::Serialize;

/// Highest page the catalogue will serve.
pub const MAX_TOTAL_PAGES: u32 = 500;

/// Number of page links shown around the current page.
pub const WINDOW_SIZE: u32 = 5;

/// Page links to render for one listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    pub current: u32,
    pub total: u32,
    pub numbers: Vec<u32>,
    pub previous: Option<u32>,
    pub next: Option<u32>,
}

impl PageWindow {
    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Nothing to render for single-page listings.
    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }
}

/// Compute the window of page numbers around `current_page`.
///
/// `total_pages` is clamped to [`MAX_TOTAL_PAGES`]; `current_page` is taken
/// as given.
pub fn compute(current_page: u32, total_pages: u32) -> PageWindow {
    let total = total_pages.min(MAX_TOTAL_PAGES);

    if total <= 1 {
        return PageWindow {
            current: current_page,
            total,
            numbers: Vec::new(),
            previous: None,
            next: None,
        };
    }

    let half = WINDOW_SIZE / 2;
    let mut start = current_page.saturating_sub(half).max(1);
    let end = start.saturating_add(WINDOW_SIZE - 1).min(total);
    // Shift left when the window hits the last page.
    start = end.saturating_sub(WINDOW_SIZE - 1).max(1);

    PageWindow {
        current: current_page,
        total,
        numbers: (start..=end).collect(),
        previous: (current_page > 1).then(|| current_page - 1),
        next: (current_page < total).then(|| current_page + 1),
    }
}

/// Read the `page` parameter from a raw query string.
///
/// Missing, zero or unparseable values yield page 1.
pub fn parse_page(query: Option<&str>) -> u32 {
    query
        .unwrap_or_default()
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "page")
        .and_then(|(_, value)| value.parse::<u32>().ok())
        .filter(|page| *page >= 1)
        .unwrap_or(1)
}

/// Builds hrefs of the form `<base>?page=<n>[&<filters>]`.
#[derive(Debug, Clone)]
pub struct PageLinks {
    base_path: String,
    extra_query: String,
}

impl PageLinks {
    /// `extra_query` is an already-encoded query string without a leading `?`.
    pub fn new(base_path: impl Into<String>, extra_query: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            extra_query: extra_query.into(),
        }
    }

    pub fn href(&self, page: u32) -> String {
        if self.extra_query.is_empty() {
            format!("{}?page={page}", self.base_path)
        } else {
            format!("{}?page={page}&{}", self.base_path, self.extra_query)
        }
    }

    pub fn previous_href(&self, window: &PageWindow) -> Option<String> {
        window.previous.map(|p| self.href(p))
    }

    pub fn next_href(&self, window: &PageWindow) -> Option<String> {
        window.next.map(|p| self.href(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_page_renders_nothing() {
        for total in [0, 1] {
            let w = compute(1, total);
            assert!(w.numbers.is_empty());
            assert!(!w.has_previous());
            assert!(!w.has_next());
        }
    }

    #[test]
    fn middle_of_three() {
        let w = compute(2, 3);
        assert_eq!(w.numbers, vec![1, 2, 3]);
        assert_eq!(w.previous, Some(1));
        assert_eq!(w.next, Some(3));
    }

    #[test]
    fn total_is_clamped_to_500() {
        let w = compute(1, 1000);
        assert_eq!(w, compute(1, 500));
        assert_eq!(w.total, 500);
        assert!(w.numbers.contains(&1));
        assert!(w.numbers.iter().all(|n| *n <= 500));
        assert_eq!(w.previous, None);
        assert_eq!(w.next, Some(2));

        let last = compute(500, 90_000);
        assert_eq!(last.numbers, vec![496, 497, 498, 499, 500]);
        assert_eq!(last.next, None);
    }

    #[test]
    fn window_is_full_at_the_edges() {
        assert_eq!(compute(1, 20).numbers, vec![1, 2, 3, 4, 5]);
        assert_eq!(compute(2, 20).numbers, vec![1, 2, 3, 4, 5]);
        assert_eq!(compute(10, 20).numbers, vec![8, 9, 10, 11, 12]);
        assert_eq!(compute(19, 20).numbers, vec![16, 17, 18, 19, 20]);
        assert_eq!(compute(20, 20).numbers, vec![16, 17, 18, 19, 20]);
    }

    #[test]
    fn every_valid_page_is_in_its_window() {
        for total in 2..=40 {
            for current in 1..=total {
                let w = compute(current, total);
                assert!(w.numbers.contains(&current), "{current}/{total}");
                assert!(w.numbers.len() as u32 <= WINDOW_SIZE);
                assert!(w.numbers.iter().all(|n| (1..=total).contains(n)));
                assert_eq!(w.has_previous(), current > 1);
                assert_eq!(w.has_next(), current < total);
            }
        }
    }

    #[test]
    fn out_of_range_current_page_is_not_clamped() {
        let w = compute(10, 3);
        assert_eq!(w.current, 10);
        assert_eq!(w.numbers, vec![1, 2, 3]);
        assert_eq!(w.previous, Some(9));
        assert_eq!(w.next, None);

        let w = compute(0, 3);
        assert_eq!(w.numbers, vec![1, 2, 3]);
        assert_eq!(w.previous, None);
        assert_eq!(w.next, Some(1));
    }

    #[test]
    fn page_parameter_parsing() {
        assert_eq!(parse_page(None), 1);
        assert_eq!(parse_page(Some("")), 1);
        assert_eq!(parse_page(Some("page=4")), 4);
        assert_eq!(parse_page(Some("with_genres=28&page=7")), 7);
        assert_eq!(parse_page(Some("page=abc")), 1);
        assert_eq!(parse_page(Some("page=0")), 1);
        assert_eq!(parse_page(Some("page=-2")), 1);
    }

    #[test]
    fn links_append_filters() {
        let plain = PageLinks::new("/movies/popular", "");
        assert_eq!(plain.href(3), "/movies/popular?page=3");

        let filtered = PageLinks::new("/discover/movie", "with_genres=28,12");
        let w = compute(2, 3);
        assert_eq!(
            filtered.previous_href(&w).as_deref(),
            Some("/discover/movie?page=1&with_genres=28,12")
        );
        assert_eq!(
            filtered.next_href(&w).as_deref(),
            Some("/discover/movie?page=3&with_genres=28,12")
        );
        assert_eq!(filtered.next_href(&compute(3, 3)), None);
    }
}
