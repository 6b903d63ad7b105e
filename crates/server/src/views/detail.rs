use cinedex_core::types::MediaKind;
use cinedex_tmdb::models::{Genre, MovieDetail, PersonDetail, TvDetail};
use cinedex_tmdb::{ImageSize, image_url};

use super::cards::{cast_card, movie_card, poster, rating, tv_card};
use super::{escape, format, grid};

/// Tabs shown under a movie or TV hero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Overview,
    Seasons,
    Recommendations,
    Similar,
    Reviews,
}

impl Tab {
    fn label(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Seasons => "Seasons",
            Self::Recommendations => "Recommendations",
            Self::Similar => "Similar",
            Self::Reviews => "Reviews",
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            Self::Overview => "",
            Self::Seasons => "/seasons",
            Self::Recommendations => "/recommendations",
            Self::Similar => "/similar",
            Self::Reviews => "/reviews",
        }
    }
}

pub fn tabs(kind: MediaKind, id: u64, active: Tab) -> String {
    let available: &[Tab] = match kind {
        MediaKind::Tv => &[
            Tab::Overview,
            Tab::Seasons,
            Tab::Recommendations,
            Tab::Similar,
            Tab::Reviews,
        ],
        _ => &[Tab::Overview, Tab::Recommendations, Tab::Similar, Tab::Reviews],
    };

    let items: String = available
        .iter()
        .map(|tab| {
            let current = if *tab == active {
                r#" aria-current="page""#
            } else {
                ""
            };
            format!(
                r#"<a href="{}{}"{current}>{}</a>"#,
                kind.detail_path(id),
                tab.suffix(),
                tab.label()
            )
        })
        .collect();

    format!(r#"<nav class="detail-tabs">{items}</nav>"#)
}

fn genre_badges(genres: &[Genre]) -> String {
    genres
        .iter()
        .map(|g| format!(r#"<span class="badge">{}</span>"#, escape(&g.name)))
        .collect()
}

fn backdrop(path: Option<&str>, alt: &str) -> String {
    image_url(path, ImageSize::Original)
        .map(|src| {
            format!(
                r#"<img class="media-backdrop" src="{}" alt="{}">"#,
                escape(&src),
                escape(alt)
            )
        })
        .unwrap_or_default()
}

fn hero(
    title: &str,
    backdrop_path: Option<&str>,
    poster_path: Option<&str>,
    facts: &str,
    tagline: Option<&str>,
    overview: Option<&str>,
) -> String {
    let tagline = tagline
        .map(|t| format!(r#"<p class="tagline">{}</p>"#, escape(t)))
        .unwrap_or_default();

    format!(
        concat!(
            r#"<section class="media-hero">{backdrop}<div class="media-hero-body">"#,
            r#"<div class="media-hero-poster">{poster}</div><div>"#,
            r#"<h1>{title}</h1>{tagline}<div class="facts">{facts}</div>"#,
            r#"<p class="overview">{overview}</p></div></div></section>"#
        ),
        backdrop = backdrop(backdrop_path, title),
        poster = poster(poster_path, title, ImageSize::W500),
        title = escape(title),
        tagline = tagline,
        facts = facts,
        overview = escape(overview.unwrap_or("No overview available.")),
    )
}

pub fn movie_hero(movie: &MovieDetail) -> String {
    let facts = [
        rating(movie.vote_average, movie.vote_count),
        escape(&format::long_date(movie.release_date.as_deref())),
        escape(&format::runtime(movie.runtime_minutes)),
        genre_badges(&movie.genres),
    ]
    .into_iter()
    .filter(|s| !s.is_empty())
    .collect::<Vec<_>>()
    .join(" ");

    hero(
        &movie.title,
        movie.backdrop_path.as_deref(),
        movie.poster_path.as_deref(),
        &facts,
        movie.tagline.as_deref(),
        movie.overview.as_deref(),
    )
}

pub fn movie_overview(movie: &MovieDetail) -> String {
    let directors = if movie.directors.is_empty() {
        String::new()
    } else {
        let names = movie
            .directors
            .iter()
            .map(|d| {
                format!(
                    r#"<a href="{}">{}</a>"#,
                    MediaKind::Person.detail_path(d.id),
                    escape(&d.name)
                )
            })
            .collect::<Vec<_>>()
            .join(", ");
        format!(r#"<p class="directors">Directed by {names}</p>"#)
    };

    let collection = movie
        .collection
        .as_ref()
        .map(|c| {
            format!(
                r#"<p class="collection">Part of the <strong>{}</strong></p>"#,
                escape(&c.name)
            )
        })
        .unwrap_or_default();

    let cast: Vec<String> = movie.cast.iter().map(cast_card).collect();
    format!(
        r#"{directors}{collection}<h2>Cast</h2>{}"#,
        grid(&cast, "No cast information")
    )
}

pub fn tv_hero(show: &TvDetail) -> String {
    let seasons = match show.number_of_seasons {
        0 => String::new(),
        1 => "1 season".to_string(),
        n => format!("{n} seasons"),
    };
    let facts = [
        rating(show.vote_average, show.vote_count),
        escape(&format::long_date(show.first_air_date.as_deref())),
        seasons,
        genre_badges(&show.genres),
    ]
    .into_iter()
    .filter(|s| !s.is_empty())
    .collect::<Vec<_>>()
    .join(" ");

    hero(
        &show.name,
        show.backdrop_path.as_deref(),
        show.poster_path.as_deref(),
        &facts,
        show.tagline.as_deref(),
        show.overview.as_deref(),
    )
}

pub fn tv_overview(show: &TvDetail) -> String {
    let creators = if show.creators.is_empty() {
        String::new()
    } else {
        let names = show
            .creators
            .iter()
            .map(|c| escape(&c.name))
            .collect::<Vec<_>>()
            .join(", ");
        format!(r#"<p class="creators">Created by {names}</p>"#)
    };
    let cast: Vec<String> = show.cast.iter().map(cast_card).collect();
    format!(
        r#"{creators}<h2>Cast</h2>{}"#,
        grid(&cast, "No cast information")
    )
}

/// Season list linking to each season's episode page.
pub fn tv_seasons(show: &TvDetail) -> String {
    let cards: Vec<String> = show
        .seasons
        .iter()
        .map(|s| {
            format!(
                concat!(
                    r#"<a class="media-card" href="{base}/seasons/{number}">{poster}"#,
                    r#"<h3 class="line-clamp-1 text-sm font-medium">{name}</h3>"#,
                    r#"<p class="text-xs text-muted-foreground">{count} episodes {year}</p></a>"#
                ),
                base = MediaKind::Tv.detail_path(show.id),
                number = s.season_number,
                poster = poster(s.poster_path.as_deref(), &s.name, ImageSize::W300),
                name = escape(&s.name),
                count = s.episode_count,
                year = format::year(s.air_date.as_deref()),
            )
        })
        .collect();
    grid(&cards, "No seasons")
}

pub fn person_profile(person: &PersonDetail) -> String {
    let facts = [
        person
            .known_for_department
            .as_deref()
            .map(|d| format!("Known for {d}")),
        person
            .birthday
            .as_deref()
            .map(|b| format!("Born {}", format::long_date(Some(b)))),
        person.place_of_birth.as_deref().map(|p| format!("in {p}")),
        person
            .deathday
            .as_deref()
            .map(|d| format!("Died {}", format::long_date(Some(d)))),
    ]
    .into_iter()
    .flatten()
    .map(|f| escape(&f))
    .collect::<Vec<_>>()
    .join(" ");

    let movies: Vec<String> = person.movie_credits.iter().take(20).map(movie_card).collect();
    let shows: Vec<String> = person.tv_credits.iter().take(20).map(tv_card).collect();

    format!(
        concat!(
            r#"<section class="person-hero"><div class="media-hero-poster">{poster}</div><div>"#,
            r#"<h1>{name}</h1><p class="facts">{facts}</p>"#,
            r#"<p class="biography whitespace-pre-line">{bio}</p></div></section>"#,
            "<h2>Movies</h2>{movies}<h2>TV Shows</h2>{shows}"
        ),
        poster = poster(person.profile_path.as_deref(), &person.name, ImageSize::W500),
        name = escape(&person.name),
        facts = facts,
        bio = escape(
            person
                .biography
                .as_deref()
                .unwrap_or("No biography available.")
        ),
        movies = grid(&movies, "No movie credits"),
        shows = grid(&shows, "No TV credits"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinedex_tmdb::models::Credit;

    fn movie() -> MovieDetail {
        MovieDetail {
            id: 27205,
            title: "Inception".into(),
            original_title: None,
            tagline: Some("Your mind is the scene of the crime.".into()),
            overview: None,
            release_date: Some("2010-07-16".into()),
            runtime_minutes: Some(148),
            vote_average: 8.4,
            vote_count: 30000,
            genres: vec![Genre {
                id: 28,
                name: "Action".into(),
            }],
            poster_path: Some("/poster.jpg".into()),
            backdrop_path: None,
            collection: None,
            cast: vec![],
            directors: vec![Credit {
                id: 525,
                name: "Christopher Nolan".into(),
                role: Some("Director".into()),
                profile_path: None,
            }],
        }
    }

    #[test]
    fn movie_hero_facts() {
        let html = movie_hero(&movie());
        assert!(html.contains("<h1>Inception</h1>"));
        assert!(html.contains("July 16, 2010"));
        assert!(html.contains("2h 28m"));
        assert!(html.contains(r#"<span class="badge">Action</span>"#));
        assert!(html.contains("No overview available."));
        assert!(!html.contains("media-backdrop"));
    }

    #[test]
    fn movie_overview_links_directors() {
        let html = movie_overview(&movie());
        assert!(html.contains(r#"Directed by <a href="/person/525">Christopher Nolan</a>"#));
        assert!(html.contains("No cast information"));
    }

    #[test]
    fn tabs_mark_active() {
        let html = tabs(MediaKind::Movie, 1, Tab::Reviews);
        assert!(html.contains(r#"<a href="/movie/1/reviews" aria-current="page">Reviews</a>"#));
        assert!(html.contains(r#"<a href="/movie/1">Overview</a>"#));
        assert!(!html.contains("Seasons"));
        assert!(tabs(MediaKind::Tv, 1, Tab::Overview).contains(r#"href="/tv/1/seasons""#));
    }
}
