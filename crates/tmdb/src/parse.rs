//! Tolerant mapping from TMDB JSON to models. Missing fields never fail a
//! record; they become `None`, zero or an empty list.

use cinedex_core::types::MediaKind;
use serde_json::Value;

use crate::models::{
    CollectionRef, Credit, Episode, Genre, MovieDetail, MovieSummary, Paged, PersonDetail,
    PersonSummary, Review, Season, SeasonSummary, SearchHit, TvDetail, TvSummary, WatchProvider,
};

const MAX_CAST: usize = 20;

fn text(v: &Value) -> Option<String> {
    v.as_str()
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

fn id(v: &Value) -> u64 {
    v["id"].as_u64().unwrap_or(0)
}

fn small(v: &Value) -> u32 {
    v.as_u64().and_then(|n| u32::try_from(n).ok()).unwrap_or(0)
}

fn array<'a>(v: &'a Value) -> impl Iterator<Item = &'a Value> {
    v.as_array().into_iter().flatten()
}

pub fn paged<T>(data: &Value, item: impl Fn(&Value) -> Option<T>) -> Paged<T> {
    Paged {
        page: small(&data["page"]).max(1),
        total_pages: small(&data["total_pages"]),
        total_results: data["total_results"].as_u64().unwrap_or(0),
        results: array(&data["results"]).filter_map(item).collect(),
    }
}

pub fn movie_summary(v: &Value) -> Option<MovieSummary> {
    Some(MovieSummary {
        id: v["id"].as_u64()?,
        title: text(&v["title"]).unwrap_or_else(|| "Untitled".to_string()),
        overview: text(&v["overview"]),
        release_date: text(&v["release_date"]),
        poster_path: text(&v["poster_path"]),
        backdrop_path: text(&v["backdrop_path"]),
        vote_average: v["vote_average"].as_f64().unwrap_or(0.0),
        vote_count: v["vote_count"].as_u64().unwrap_or(0),
    })
}

pub fn tv_summary(v: &Value) -> Option<TvSummary> {
    Some(TvSummary {
        id: v["id"].as_u64()?,
        name: text(&v["name"]).unwrap_or_else(|| "Untitled".to_string()),
        overview: text(&v["overview"]),
        first_air_date: text(&v["first_air_date"]),
        poster_path: text(&v["poster_path"]),
        backdrop_path: text(&v["backdrop_path"]),
        vote_average: v["vote_average"].as_f64().unwrap_or(0.0),
        vote_count: v["vote_count"].as_u64().unwrap_or(0),
    })
}

pub fn person_summary(v: &Value) -> Option<PersonSummary> {
    Some(PersonSummary {
        id: v["id"].as_u64()?,
        name: text(&v["name"]).unwrap_or_else(|| "Unknown".to_string()),
        profile_path: text(&v["profile_path"]),
        known_for_department: text(&v["known_for_department"]),
    })
}

/// Multi-search entries carry their own `media_type`.
pub fn search_hit(v: &Value) -> Option<SearchHit> {
    let kind = v["media_type"].as_str().and_then(MediaKind::from_slug)?;
    search_hit_as(kind, v)
}

pub fn search_hit_as(kind: MediaKind, v: &Value) -> Option<SearchHit> {
    match kind {
        MediaKind::Movie => movie_summary(v).map(SearchHit::Movie),
        MediaKind::Tv => tv_summary(v).map(SearchHit::Tv),
        MediaKind::Person => person_summary(v).map(SearchHit::Person),
    }
}

pub fn genres(v: &Value) -> Vec<Genre> {
    array(v)
        .filter_map(|g| {
            Some(Genre {
                id: g["id"].as_u64()?,
                name: text(&g["name"])?,
            })
        })
        .collect()
}

pub fn watch_providers(data: &Value) -> Vec<WatchProvider> {
    let mut providers: Vec<(u64, WatchProvider)> = array(&data["results"])
        .filter_map(|p| {
            let provider = WatchProvider {
                provider_id: p["provider_id"].as_u64()?,
                provider_name: text(&p["provider_name"])?,
                logo_path: text(&p["logo_path"]),
            };
            Some((p["display_priority"].as_u64().unwrap_or(u64::MAX), provider))
        })
        .collect();
    providers.sort_by_key(|(priority, _)| *priority);
    providers.into_iter().map(|(_, p)| p).collect()
}

fn cast(credits: &Value) -> Vec<Credit> {
    array(&credits["cast"])
        .take(MAX_CAST)
        .map(|p| Credit {
            id: id(p),
            name: text(&p["name"]).unwrap_or_default(),
            role: text(&p["character"]),
            profile_path: text(&p["profile_path"]),
        })
        .collect()
}

fn crew_with_job(credits: &Value, job: &str) -> Vec<Credit> {
    array(&credits["crew"])
        .filter(|p| p["job"].as_str() == Some(job))
        .map(|p| Credit {
            id: id(p),
            name: text(&p["name"]).unwrap_or_default(),
            role: Some(job.to_string()),
            profile_path: text(&p["profile_path"]),
        })
        .collect()
}

pub fn movie_detail(data: &Value) -> MovieDetail {
    let credits = &data["credits"];
    let collection = &data["belongs_to_collection"];

    MovieDetail {
        id: id(data),
        title: text(&data["title"]).unwrap_or_else(|| "Untitled".to_string()),
        original_title: text(&data["original_title"]),
        tagline: text(&data["tagline"]),
        overview: text(&data["overview"]),
        release_date: text(&data["release_date"]),
        runtime_minutes: data["runtime"]
            .as_u64()
            .filter(|r| *r > 0)
            .and_then(|r| u32::try_from(r).ok()),
        vote_average: data["vote_average"].as_f64().unwrap_or(0.0),
        vote_count: data["vote_count"].as_u64().unwrap_or(0),
        genres: genres(&data["genres"]),
        poster_path: text(&data["poster_path"]),
        backdrop_path: text(&data["backdrop_path"]),
        collection: collection["id"].as_u64().map(|cid| CollectionRef {
            id: cid,
            name: text(&collection["name"]).unwrap_or_default(),
            poster_path: text(&collection["poster_path"]),
        }),
        cast: cast(credits),
        directors: crew_with_job(credits, "Director"),
    }
}

pub fn tv_detail(data: &Value) -> TvDetail {
    TvDetail {
        id: id(data),
        name: text(&data["name"]).unwrap_or_else(|| "Untitled".to_string()),
        tagline: text(&data["tagline"]),
        overview: text(&data["overview"]),
        first_air_date: text(&data["first_air_date"]),
        last_air_date: text(&data["last_air_date"]),
        number_of_seasons: small(&data["number_of_seasons"]),
        number_of_episodes: small(&data["number_of_episodes"]),
        vote_average: data["vote_average"].as_f64().unwrap_or(0.0),
        vote_count: data["vote_count"].as_u64().unwrap_or(0),
        genres: genres(&data["genres"]),
        poster_path: text(&data["poster_path"]),
        backdrop_path: text(&data["backdrop_path"]),
        seasons: array(&data["seasons"])
            .map(|s| SeasonSummary {
                season_number: small(&s["season_number"]),
                name: text(&s["name"]).unwrap_or_default(),
                episode_count: small(&s["episode_count"]),
                air_date: text(&s["air_date"]),
                poster_path: text(&s["poster_path"]),
            })
            .collect(),
        creators: array(&data["created_by"])
            .map(|p| Credit {
                id: id(p),
                name: text(&p["name"]).unwrap_or_default(),
                role: Some("Creator".to_string()),
                profile_path: text(&p["profile_path"]),
            })
            .collect(),
        cast: cast(&data["credits"]),
    }
}

pub fn person_detail(data: &Value) -> PersonDetail {
    PersonDetail {
        id: id(data),
        name: text(&data["name"]).unwrap_or_else(|| "Unknown".to_string()),
        biography: text(&data["biography"]),
        birthday: text(&data["birthday"]),
        deathday: text(&data["deathday"]),
        place_of_birth: text(&data["place_of_birth"]),
        known_for_department: text(&data["known_for_department"]),
        profile_path: text(&data["profile_path"]),
        movie_credits: array(&data["movie_credits"]["cast"])
            .filter_map(movie_summary)
            .collect(),
        tv_credits: array(&data["tv_credits"]["cast"])
            .filter_map(tv_summary)
            .collect(),
    }
}

pub fn episode(v: &Value) -> Episode {
    Episode {
        id: id(v),
        name: text(&v["name"]).unwrap_or_default(),
        season_number: small(&v["season_number"]),
        episode_number: small(&v["episode_number"]),
        overview: text(&v["overview"]),
        air_date: text(&v["air_date"]),
        runtime_minutes: v["runtime"].as_u64().and_then(|r| u32::try_from(r).ok()),
        still_path: text(&v["still_path"]),
        vote_average: v["vote_average"].as_f64().unwrap_or(0.0),
        vote_count: v["vote_count"].as_u64().unwrap_or(0),
    }
}

pub fn season(data: &Value) -> Season {
    Season {
        season_number: small(&data["season_number"]),
        name: text(&data["name"]).unwrap_or_default(),
        overview: text(&data["overview"]),
        air_date: text(&data["air_date"]),
        episodes: array(&data["episodes"]).map(episode).collect(),
    }
}

pub fn review(v: &Value) -> Option<Review> {
    let details = &v["author_details"];
    Some(Review {
        id: text(&v["id"])?,
        author: text(&v["author"]).unwrap_or_else(|| "Anonymous".to_string()),
        content: text(&v["content"]).unwrap_or_default(),
        created_at: text(&v["created_at"]),
        rating: details["rating"].as_f64(),
        avatar_path: text(&details["avatar_path"]),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn paged_movies_skip_records_without_id() {
        let data = json!({
            "page": 2,
            "total_pages": 40_000,
            "total_results": 800_000,
            "results": [
                { "id": 1, "title": "Test Movie", "vote_average": 8.5, "vote_count": 1000,
                  "release_date": "2023-01-01", "poster_path": "/p.jpg" },
                { "title": "Broken" }
            ]
        });

        let page = paged(&data, movie_summary);
        assert_eq!(page.page, 2);
        assert_eq!(page.total_pages, 40_000);
        assert_eq!(page.results.len(), 1);
        let movie = &page.results[0];
        assert_eq!(movie.title, "Test Movie");
        assert_eq!(movie.release_date.as_deref(), Some("2023-01-01"));
        assert_eq!(movie.poster_path.as_deref(), Some("/p.jpg"));
        assert_eq!(movie.backdrop_path, None);
    }

    #[test]
    fn empty_strings_become_none() {
        let show = tv_summary(&json!({
            "id": 1, "name": "Breaking Bad", "poster_path": null, "first_air_date": ""
        }))
        .unwrap();
        assert_eq!(show.poster_path, None);
        assert_eq!(show.first_air_date, None);
        assert_eq!(show.vote_count, 0);
    }

    #[test]
    fn multi_search_dispatches_on_media_type() {
        let data = json!({
            "page": 1, "total_pages": 1, "total_results": 4,
            "results": [
                { "id": 1, "media_type": "movie", "title": "Test Movie" },
                { "id": 2, "media_type": "tv", "name": "Test Show" },
                { "id": 3, "media_type": "person", "name": "Test Person",
                  "known_for_department": "Acting" },
                { "id": 4, "media_type": "collection", "name": "Ignored" }
            ]
        });
        let page = paged(&data, search_hit);
        assert_eq!(page.results.len(), 3);
        assert!(matches!(&page.results[0], SearchHit::Movie(m) if m.title == "Test Movie"));
        assert!(matches!(&page.results[1], SearchHit::Tv(t) if t.name == "Test Show"));
        assert!(matches!(
            &page.results[2],
            SearchHit::Person(p) if p.known_for_department.as_deref() == Some("Acting")
        ));
    }

    #[test]
    fn movie_detail_with_credits_and_collection() {
        let data = json!({
            "id": 27205,
            "title": "Inception",
            "tagline": "Your mind is the scene of the crime.",
            "release_date": "2010-07-16",
            "runtime": 148,
            "vote_average": 8.4,
            "genres": [
                { "id": 28, "name": "Action" },
                { "id": 878, "name": "Science Fiction" }
            ],
            "belongs_to_collection": null,
            "credits": {
                "cast": [
                    { "id": 6193, "name": "Leonardo DiCaprio", "character": "Cobb", "profile_path": "/leo.jpg" }
                ],
                "crew": [
                    { "id": 525, "name": "Christopher Nolan", "job": "Director" },
                    { "id": 1, "name": "Someone Else", "job": "Editor" }
                ]
            }
        });

        let movie = movie_detail(&data);
        assert_eq!(movie.title, "Inception");
        assert_eq!(movie.runtime_minutes, Some(148));
        assert_eq!(movie.genres.len(), 2);
        assert_eq!(movie.collection, None);
        assert_eq!(movie.cast[0].role.as_deref(), Some("Cobb"));
        assert_eq!(movie.directors.len(), 1);
        assert_eq!(movie.directors[0].name, "Christopher Nolan");

        let with_collection = movie_detail(&json!({
            "id": 1,
            "belongs_to_collection": { "id": 10, "name": "Test Collection" }
        }));
        assert_eq!(with_collection.collection.unwrap().name, "Test Collection");
    }

    #[test]
    fn tv_detail_seasons_and_creators() {
        let data = json!({
            "id": 1396,
            "name": "Breaking Bad",
            "first_air_date": "2008-01-20",
            "last_air_date": "2013-09-29",
            "number_of_seasons": 5,
            "seasons": [
                { "season_number": 0, "name": "Specials", "episode_count": 9 },
                { "season_number": 1, "name": "Season 1", "episode_count": 7 }
            ],
            "created_by": [ { "id": 66633, "name": "Vince Gilligan" } ]
        });
        let show = tv_detail(&data);
        assert_eq!(show.number_of_seasons, 5);
        assert_eq!(show.seasons.len(), 2);
        assert_eq!(show.seasons[1].episode_count, 7);
        assert_eq!(show.creators[0].role.as_deref(), Some("Creator"));
        assert!(show.cast.is_empty());
    }

    #[test]
    fn watch_providers_sorted_by_priority() {
        let data = json!({
            "results": [
                { "provider_id": 9, "provider_name": "Amazon", "display_priority": 5 },
                { "provider_id": 8, "provider_name": "Netflix", "display_priority": 1, "logo_path": "/n.png" },
                { "provider_name": "No id" }
            ]
        });
        let providers = watch_providers(&data);
        assert_eq!(providers.len(), 2);
        assert_eq!(providers[0].provider_name, "Netflix");
        assert_eq!(providers[1].provider_id, 9);
    }

    #[test]
    fn season_episodes_and_reviews() {
        let s = season(&json!({
            "season_number": 1,
            "name": "Season 1",
            "episodes": [
                { "id": 62085, "name": "Pilot", "episode_number": 1, "season_number": 1,
                  "runtime": 58, "vote_average": 8.5, "vote_count": 1000 }
            ]
        }));
        assert_eq!(s.episodes.len(), 1);
        assert_eq!(s.episodes[0].runtime_minutes, Some(58));

        let r = review(&json!({
            "id": "abc",
            "author": "critic",
            "content": "Great.",
            "author_details": { "rating": 9.0 }
        }))
        .unwrap();
        assert_eq!(r.rating, Some(9.0));
        assert!(review(&json!({ "author": "no id" })).is_none());
    }
}
