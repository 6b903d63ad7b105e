use cinedex_core::types::MediaKind;
use cinedex_tmdb::models::{
    Credit, Episode, MovieSummary, PersonSummary, Review, SearchHit, TvSummary,
};
use cinedex_tmdb::{ImageSize, image_url};

use super::escape;
use super::format;

/// Poster image, or a muted placeholder box when there is none.
pub fn poster(path: Option<&str>, alt: &str, size: ImageSize) -> String {
    match image_url(path, size) {
        Some(src) => format!(
            r#"<img class="rounded-md border bg-muted" src="{}" alt="{}" loading="lazy">"#,
            escape(&src),
            escape(alt)
        ),
        None => format!(
            r#"<div class="size-full rounded-md border bg-muted" role="img" aria-label="{}"></div>"#,
            escape(alt)
        ),
    }
}

pub fn rating(average: f64, count: u64) -> String {
    format!(
        r#"<span class="media-rating" title="{count} votes">{}</span>"#,
        format::rating(average)
    )
}

fn media_card(href: &str, poster_html: &str, top: &str, title: &str, excerpt: &str) -> String {
    format!(
        concat!(
            r#"<a class="media-card" href="{href}">"#,
            "{poster}",
            r#"<div class="media-card-content">{top}"#,
            r#"<h3 class="line-clamp-1 text-sm font-medium">{title}</h3>"#,
            r#"<p class="line-clamp-3 text-xs text-muted-foreground">{excerpt}</p>"#,
            "</div></a>"
        ),
        href = escape(href),
        poster = poster_html,
        top = top,
        title = escape(title),
        excerpt = escape(excerpt),
    )
}

pub fn movie_card(movie: &MovieSummary) -> String {
    media_card(
        &MediaKind::Movie.detail_path(movie.id),
        &poster(movie.poster_path.as_deref(), &movie.title, ImageSize::W500),
        &rating(movie.vote_average, movie.vote_count),
        &movie.title,
        &format::year(movie.release_date.as_deref()),
    )
}

pub fn tv_card(show: &TvSummary) -> String {
    media_card(
        &MediaKind::Tv.detail_path(show.id),
        &poster(show.poster_path.as_deref(), &show.name, ImageSize::W500),
        &rating(show.vote_average, show.vote_count),
        &show.name,
        &format::year(show.first_air_date.as_deref()),
    )
}

fn known_for(department: Option<&str>) -> String {
    department
        .map(|d| format!("Known for {d}"))
        .unwrap_or_default()
}

pub fn person_card(person: &PersonSummary) -> String {
    media_card(
        &MediaKind::Person.detail_path(person.id),
        &poster(person.profile_path.as_deref(), &person.name, ImageSize::W500),
        "",
        &person.name,
        &known_for(person.known_for_department.as_deref()),
    )
}

/// Grid card for a mixed-kind listing such as trending.
pub fn hit_card(hit: &SearchHit) -> String {
    match hit {
        SearchHit::Movie(m) => movie_card(m),
        SearchHit::Tv(t) => tv_card(t),
        SearchHit::Person(p) => person_card(p),
    }
}

/// Compact row used on the search page. People get no rating.
pub fn search_result_card(hit: &SearchHit) -> String {
    let (kind, id, name, image, details) = match hit {
        SearchHit::Movie(m) => (
            MediaKind::Movie,
            m.id,
            m.title.as_str(),
            m.poster_path.as_deref(),
            format!(
                "{}<span>{}</span>",
                rating(m.vote_average, m.vote_count),
                format::year(m.release_date.as_deref())
            ),
        ),
        SearchHit::Tv(t) => (
            MediaKind::Tv,
            t.id,
            t.name.as_str(),
            t.poster_path.as_deref(),
            format!(
                "{}<span>{}</span>",
                rating(t.vote_average, t.vote_count),
                format::year(t.first_air_date.as_deref())
            ),
        ),
        SearchHit::Person(p) => (
            MediaKind::Person,
            p.id,
            p.name.as_str(),
            p.profile_path.as_deref(),
            format!(
                "<span>{}</span>",
                escape(&known_for(p.known_for_department.as_deref()))
            ),
        ),
    };

    format!(
        concat!(
            r#"<a class="search-result-card" href="{href}">"#,
            r#"<div class="search-result-image">{poster}</div>"#,
            r#"<div class="search-result-body"><h3>{name}</h3>"#,
            r#"<span class="badge">{label}</span>"#,
            r#"<div class="search-result-details">{details}</div></div></a>"#
        ),
        href = kind.detail_path(id),
        poster = poster(image, name, ImageSize::W185),
        name = escape(name),
        label = kind.label(),
        details = details,
    )
}

pub fn cast_card(credit: &Credit) -> String {
    format!(
        concat!(
            r#"<a class="cast-card" href="{href}">{poster}"#,
            r#"<h4 class="text-sm font-medium">{name}</h4>"#,
            r#"<p class="text-xs text-muted-foreground">{role}</p></a>"#
        ),
        href = MediaKind::Person.detail_path(credit.id),
        poster = poster(credit.profile_path.as_deref(), &credit.name, ImageSize::W185),
        name = escape(&credit.name),
        role = escape(credit.role.as_deref().unwrap_or_default()),
    )
}

pub fn episode_card(episode: &Episode) -> String {
    let meta = [
        format::long_date(episode.air_date.as_deref()),
        format::runtime(episode.runtime_minutes),
    ]
    .into_iter()
    .filter(|s| !s.is_empty())
    .collect::<Vec<_>>()
    .join(" · ");

    format!(
        concat!(
            r#"<article class="episode-card">{still}<div>"#,
            r#"<h4>S{season}E{number} · {name}</h4>{rating}"#,
            r#"<p class="text-xs text-muted-foreground">{meta}</p>"#,
            r#"<p class="line-clamp-3">{overview}</p></div></article>"#
        ),
        still = poster(episode.still_path.as_deref(), &episode.name, ImageSize::W300),
        season = format::pad(episode.season_number),
        number = format::pad(episode.episode_number),
        name = escape(&episode.name),
        rating = rating(episode.vote_average, episode.vote_count),
        meta = escape(&meta),
        overview = escape(episode.overview.as_deref().unwrap_or_default()),
    )
}

pub fn review_card(review: &Review) -> String {
    let score = review
        .rating
        .map(|r| format!(r#"<span class="media-rating">{}</span>"#, format::rating(r)))
        .unwrap_or_default();
    let created = review
        .created_at
        .as_deref()
        .and_then(|ts| ts.get(..10))
        .map(|d| format::long_date(Some(d)))
        .unwrap_or_default();

    format!(
        concat!(
            r#"<article class="review-card"><header>"#,
            r#"<span class="user-avatar">{initial}</span>"#,
            r#"<strong>{author}</strong>{score}<time>{created}</time></header>"#,
            r#"<p class="whitespace-pre-line">{content}</p></article>"#
        ),
        initial = escape(&review.author.chars().next().unwrap_or('?').to_uppercase().to_string()),
        author = escape(&review.author),
        score = score,
        created = escape(&created),
        content = escape(&review.content),
    )
}
