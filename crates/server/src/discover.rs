//! Filter schemas for the discover views.
//!
//! Keys are the upstream discover parameter names, so applied filters can
//! be forwarded without renaming.

use cinedex_core::filters::{FilterSchema, Logic, ValueRule};
use cinedex_core::types::MediaKind;

pub const GENRES_KEY: &str = "with_genres";
pub const PROVIDERS_KEY: &str = "with_watch_providers";
pub const LANGUAGE_KEY: &str = "with_original_language";
pub const SORT_KEY: &str = "sort_by";
pub const VOTE_AVERAGE_KEY: &str = "vote_average.gte";
pub const VOTE_COUNT_KEY: &str = "vote_count.gte";
pub const DEFAULT_SORT: &str = "popularity.desc";

pub struct SortOption {
    pub value: &'static str,
    pub label: &'static str,
}

const fn sort(value: &'static str, label: &'static str) -> SortOption {
    SortOption { value, label }
}

pub const MOVIE_SORTS: &[SortOption] = &[
    sort("popularity.desc", "Popularity (high to low)"),
    sort("popularity.asc", "Popularity (low to high)"),
    sort("vote_average.desc", "Rating (high to low)"),
    sort("vote_average.asc", "Rating (low to high)"),
    sort("primary_release_date.desc", "Release date (newest)"),
    sort("primary_release_date.asc", "Release date (oldest)"),
    sort("revenue.desc", "Revenue"),
    sort("title.asc", "Title (A-Z)"),
];

pub const TV_SORTS: &[SortOption] = &[
    sort("popularity.desc", "Popularity (high to low)"),
    sort("popularity.asc", "Popularity (low to high)"),
    sort("vote_average.desc", "Rating (high to low)"),
    sort("vote_average.asc", "Rating (low to high)"),
    sort("first_air_date.desc", "First aired (newest)"),
    sort("first_air_date.asc", "First aired (oldest)"),
    sort("name.asc", "Name (A-Z)"),
];

/// Discover views exist for movies and TV only.
pub fn discover_kind(slug: &str) -> Option<MediaKind> {
    match MediaKind::from_slug(slug)? {
        MediaKind::Person => None,
        kind => Some(kind),
    }
}

pub fn sort_options(kind: MediaKind) -> &'static [SortOption] {
    match kind {
        MediaKind::Tv => TV_SORTS,
        _ => MOVIE_SORTS,
    }
}

/// `(from, to)` keys of the release/air date range.
pub fn date_keys(kind: MediaKind) -> (&'static str, &'static str) {
    match kind {
        MediaKind::Tv => ("first_air_date.gte", "first_air_date.lte"),
        _ => ("primary_release_date.gte", "primary_release_date.lte"),
    }
}

pub fn schema_for(kind: MediaKind) -> FilterSchema {
    let (date_from, date_to) = date_keys(kind);
    let sorts = sort_options(kind)
        .iter()
        .map(|s| s.value.to_string())
        .collect();
    let id = ValueRule::Integer {
        min: 1,
        max: i64::from(u32::MAX),
    };

    FilterSchema::new()
        .multi(GENRES_KEY, Logic::And, id.clone())
        .multi(PROVIDERS_KEY, Logic::Or, id)
        .scalar(LANGUAGE_KEY, "", ValueRule::Text)
        .scalar(date_from, "", ValueRule::Date)
        .scalar(date_to, "", ValueRule::Date)
        .scalar(
            VOTE_AVERAGE_KEY,
            "",
            ValueRule::Decimal { min: 0.0, max: 10.0 },
        )
        .scalar(
            VOTE_COUNT_KEY,
            "",
            ValueRule::Integer {
                min: 0,
                max: 1_000_000,
            },
        )
        .scalar(SORT_KEY, DEFAULT_SORT, ValueRule::OneOf(sorts))
}
