use cinedex_core::types::{MediaKind, MovieList, TimeWindow, TvList};

use crate::TmdbError;
use crate::models::{
    Genre, MovieDetail, MovieSummary, Paged, PersonDetail, PersonSummary, Review, Season,
    SearchHit, TvDetail, TvSummary, WatchProvider,
};

/// Which related-titles listing to fetch for a movie or show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Related {
    Recommendations,
    Similar,
}

impl Related {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Recommendations => "recommendations",
            Self::Similar => "similar",
        }
    }
}

/// Read-only access to a movie/TV catalogue.
#[async_trait::async_trait]
pub trait MediaSource: Send + Sync {
    fn name(&self) -> &str;

    async fn movie_list(&self, list: MovieList, page: u32)
    -> Result<Paged<MovieSummary>, TmdbError>;

    async fn tv_list(&self, list: TvList, page: u32) -> Result<Paged<TvSummary>, TmdbError>;

    async fn trending(
        &self,
        kind: MediaKind,
        window: TimeWindow,
        page: u32,
    ) -> Result<Paged<SearchHit>, TmdbError>;

    /// `filters` are forwarded verbatim as discover query parameters.
    async fn discover_movies(
        &self,
        filters: &[(String, String)],
        page: u32,
    ) -> Result<Paged<MovieSummary>, TmdbError>;

    async fn discover_tv(
        &self,
        filters: &[(String, String)],
        page: u32,
    ) -> Result<Paged<TvSummary>, TmdbError>;

    /// Movie with credits appended.
    async fn movie(&self, id: u64) -> Result<MovieDetail, TmdbError>;

    /// Series with credits appended.
    async fn tv(&self, id: u64) -> Result<TvDetail, TmdbError>;

    /// Person with movie and TV credits appended.
    async fn person(&self, id: u64) -> Result<PersonDetail, TmdbError>;

    async fn movie_related(
        &self,
        id: u64,
        related: Related,
        page: u32,
    ) -> Result<Paged<MovieSummary>, TmdbError>;

    async fn tv_related(
        &self,
        id: u64,
        related: Related,
        page: u32,
    ) -> Result<Paged<TvSummary>, TmdbError>;

    async fn reviews(
        &self,
        kind: MediaKind,
        id: u64,
        page: u32,
    ) -> Result<Paged<Review>, TmdbError>;

    async fn tv_season(&self, id: u64, season_number: u32) -> Result<Season, TmdbError>;

    async fn search(&self, query: &str, page: u32) -> Result<Paged<SearchHit>, TmdbError>;

    async fn popular_people(&self, page: u32) -> Result<Paged<PersonSummary>, TmdbError>;

    async fn genres(&self, kind: MediaKind) -> Result<Vec<Genre>, TmdbError>;

    async fn watch_providers(
        &self,
        kind: MediaKind,
        region: &str,
    ) -> Result<Vec<WatchProvider>, TmdbError>;
}
