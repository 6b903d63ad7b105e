use axum::response::Html;
use cinedex_core::search::SEARCH_PATH;
use cinedex_core::types::{MovieList, TvList};

use super::escape;
use crate::region::{PageContext, REGIONS, region_name};

const STYLES: &str = "body{margin:0;font-family:system-ui,sans-serif;background:#09090b;color:#fafafa}
a{color:inherit}
.site-header,.site-footer{display:flex;gap:1rem;align-items:center;padding:1rem 2rem;border-bottom:1px solid #27272a}
.site-footer{border-top:1px solid #27272a;border-bottom:0;color:#a1a1aa}
main{padding:1rem 2rem}
.grid-list{display:grid;grid-template-columns:repeat(auto-fill,minmax(160px,1fr));gap:1rem}
.media-card img,.cast-card img{width:100%}
.empty-box{padding:4rem;text-align:center;border:1px dashed #27272a;border-radius:.5rem}
.pagination ul{display:flex;gap:.5rem;list-style:none;padding:0}
.pagination [aria-current=page]{font-weight:700;text-decoration:none}
.badge{display:inline-block;padding:0 .5rem;border-radius:9999px;background:#27272a;font-size:.75rem}
.badge-default{background:#fafafa;color:#09090b}
.pending-note{color:#facc15;font-size:.875rem}
.text-muted-foreground{color:#a1a1aa}";

fn nav() -> String {
    let movies: String = MovieList::ALL
        .iter()
        .map(|l| format!(r#"<li><a href="/movies/{}">{}</a></li>"#, l.slug(), l.title()))
        .collect();
    let shows: String = TvList::ALL
        .iter()
        .map(|l| format!(r#"<li><a href="/tv-shows/{}">{}</a></li>"#, l.slug(), l.title()))
        .collect();

    format!(
        concat!(
            r#"<nav class="main-nav"><ul>"#,
            r#"<li><details><summary>Movies</summary><ul>{movies}"#,
            r#"<li><a href="/discover/movie">Discover Movies</a></li></ul></details></li>"#,
            r#"<li><details><summary>TV Shows</summary><ul>{shows}"#,
            r#"<li><a href="/discover/tv">Discover TV Shows</a></li></ul></details></li>"#,
            r#"<li><a href="/people">People</a></li>"#,
            r#"<li><a href="/trending/movie">Trending</a></li>"#,
            "</ul></nav>"
        ),
        movies = movies,
        shows = shows,
    )
}

fn search_form(term: &str) -> String {
    format!(
        r#"<form class="search-form" method="get" action="{SEARCH_PATH}"><input type="search" name="q" value="{}" placeholder="Search..." aria-label="Search"></form>"#,
        escape(term)
    )
}

fn region_form(ctx: &PageContext) -> String {
    let options: String = REGIONS
        .iter()
        .map(|(code, name)| {
            format!(
                r#"<option value="{code}"{}>{name}</option>"#,
                if *code == ctx.region { " selected" } else { "" }
            )
        })
        .collect();

    format!(
        concat!(
            r#"<form class="region-form" method="post" action="/region" title="Availability for {current}">"#,
            r#"<input type="hidden" name="return_to" value="{path}">"#,
            r#"<select name="region" aria-label="Region">{options}</select>"#,
            r#"<button type="submit">Set region</button></form>"#
        ),
        current = escape(region_name(&ctx.region)),
        path = escape(&ctx.path),
        options = options,
    )
}

/// Full document: header with navigation, search and region selector,
/// the page body, and the footer.
pub fn page(ctx: &PageContext, title: &str, body: &str) -> Html<String> {
    page_with_search(ctx, title, "", body)
}

/// Like [`page`], with the search box pre-filled.
pub fn page_with_search(ctx: &PageContext, title: &str, term: &str, body: &str) -> Html<String> {
    Html(format!(
        concat!(
            "<!DOCTYPE html>",
            r#"<html lang="en" class="dark"><head><meta charset="utf-8">"#,
            r#"<meta name="viewport" content="width=device-width, initial-scale=1">"#,
            "<title>{title} | Cinedex</title><style>{styles}</style></head>",
            r#"<body><div class="relative flex min-h-screen flex-col">"#,
            r#"<header class="site-header"><a class="logo" href="/">Cinedex</a>{nav}{search}{region}</header>"#,
            r#"<main class="relative flex-1 py-4">{body}</main>"#,
            r#"<footer class="site-footer"><p>Data provided by TMDB. This product uses the TMDB API but is not endorsed or certified by TMDB.</p>"#,
            r##"<a href="#top" class="scroll-top">Back to top</a></footer>"##,
            "</div></body></html>"
        ),
        title = escape(title),
        styles = STYLES,
        nav = nav(),
        search = search_form(term),
        region = region_form(ctx),
        body = body,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_has_title_search_and_region() {
        let ctx = PageContext {
            region: "GB".into(),
            path: "/movie/1?page=2".into(),
        };
        let Html(html) = page_with_search(&ctx, "Dune & Co", "dune", "<p>body</p>");
        assert!(html.contains("<title>Dune &amp; Co | Cinedex</title>"));
        assert!(html.contains(r#"value="dune" placeholder="Search...""#));
        assert!(html.contains(r#"<option value="GB" selected>United Kingdom</option>"#));
        assert!(html.contains(r#"title="Availability for United Kingdom""#));
        assert!(html.contains(r#"name="return_to" value="/movie/1?page=2""#));
        assert!(html.contains("<p>body</p>"));
        assert!(html.contains(r#"href="/movies/now-playing""#));
    }
}
