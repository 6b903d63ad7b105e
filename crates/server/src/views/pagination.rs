use cinedex_core::pagination::{PageLinks, PageWindow};

use super::escape;

/// Page navigation for a listing. Empty when the window is empty.
pub fn list_pagination(window: &PageWindow, links: &PageLinks) -> String {
    if window.is_empty() {
        return String::new();
    }

    let mut html = String::from(r#"<nav class="pagination" role="navigation" aria-label="pagination"><ul>"#);

    if let Some(href) = links.previous_href(window) {
        html.push_str(&format!(
            r#"<li><a class="hidden md:flex" href="{}" aria-label="Go to previous page">Previous</a></li>"#,
            escape(&href)
        ));
    }

    for n in &window.numbers {
        let current = if *n == window.current {
            r#" aria-current="page""#
        } else {
            ""
        };
        html.push_str(&format!(
            r#"<li><a href="{}"{current}>{n}</a></li>"#,
            escape(&links.href(*n))
        ));
    }

    if let Some(href) = links.next_href(window) {
        html.push_str(&format!(
            r#"<li><a class="hidden md:flex" href="{}" aria-label="Go to next page">Next</a></li>"#,
            escape(&href)
        ));
    }

    html.push_str("</ul></nav>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinedex_core::pagination::compute;

    #[test]
    fn middle_page_has_both_directions() {
        let html = list_pagination(&compute(2, 3), &PageLinks::new("/movies/popular", ""));
        assert!(html.contains(r#"href="/movies/popular?page=1" aria-label="Go to previous page""#));
        assert!(html.contains(r#"href="/movies/popular?page=3" aria-label="Go to next page""#));
        assert!(html.contains(r#"<a href="/movies/popular?page=2" aria-current="page">2</a>"#));
        assert_eq!(html.matches("aria-current").count(), 1);
    }

    #[test]
    fn first_and_last_pages_hide_one_direction() {
        let links = PageLinks::new("/movies/popular", "");
        assert!(!list_pagination(&compute(1, 3), &links).contains("Previous"));
        assert!(!list_pagination(&compute(3, 3), &links).contains("Next"));
    }

    #[test]
    fn single_page_renders_nothing() {
        let links = PageLinks::new("/movies/popular", "");
        assert_eq!(list_pagination(&compute(1, 1), &links), "");
    }

    #[test]
    fn filter_query_is_kept_and_escaped() {
        let html = list_pagination(
            &compute(1, 2),
            &PageLinks::new("/discover/movie", "with_genres=28,12&sort_by=vote_average.desc"),
        );
        assert!(html.contains(
            r#"href="/discover/movie?page=2&amp;with_genres=28,12&amp;sort_by=vote_average.desc""#
        ));
    }
}
