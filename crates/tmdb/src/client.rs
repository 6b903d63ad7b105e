//! TMDB (The Movie Database) client.
//!
//! Uses TMDB API v3: https://developer.themoviedb.org/docs

use std::time::Duration;

use cinedex_core::pagination::MAX_TOTAL_PAGES;
use cinedex_core::types::{MediaKind, MovieList, TimeWindow, TvList};
use tracing::debug;

use crate::models::{
    Genre, MovieDetail, MovieSummary, Paged, PersonDetail, PersonSummary, Review, Season,
    SearchHit, TvDetail, TvSummary, WatchProvider,
};
use crate::provider::{MediaSource, Related};
use crate::{TmdbError, parse};

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
const REQUEST_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone)]
pub struct TmdbConfig {
    pub api_key: String,
    pub base_url: String,
    pub language: String,
    pub region: String,
}

impl TmdbConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            language: "en-US".to_string(),
            region: "US".to_string(),
        }
    }
}

pub struct TmdbClient {
    config: TmdbConfig,
    client: reqwest::Client,
}

impl TmdbClient {
    pub fn new(config: TmdbConfig) -> Result<Self, TmdbError> {
        if config.api_key.trim().is_empty() {
            return Err(TmdbError::Provider("TMDB API key cannot be empty".into()));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| TmdbError::Network(format!("build HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    async fn get_json(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<serde_json::Value, TmdbError> {
        let mut all_params = vec![
            ("api_key", self.config.api_key.as_str()),
            ("language", self.config.language.as_str()),
        ];
        all_params.extend_from_slice(params);

        let url = format!("{}{path}", self.config.base_url.trim_end_matches('/'));
        debug!(url = %url, "TMDB request");

        let resp = self
            .client
            .get(&url)
            .query(&all_params)
            .send()
            .await
            .map_err(|e| TmdbError::Network(e.to_string()))?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(TmdbError::NotFound);
        }

        if !resp.status().is_success() {
            return Err(TmdbError::Provider(format!(
                "TMDB returned {}",
                resp.status()
            )));
        }

        resp.json()
            .await
            .map_err(|e| TmdbError::Provider(format!("parse JSON: {e}")))
    }

    async fn get_page(
        &self,
        path: &str,
        page: u32,
        params: &[(&str, &str)],
    ) -> Result<serde_json::Value, TmdbError> {
        let page = clamp_page(page).to_string();
        let mut all_params = vec![("page", page.as_str())];
        all_params.extend_from_slice(params);
        self.get_json(path, &all_params).await
    }
}

/// The API rejects pages outside `1..=500`.
fn clamp_page(page: u32) -> u32 {
    page.clamp(1, MAX_TOTAL_PAGES)
}

fn kind_segment(kind: MediaKind) -> Result<&'static str, TmdbError> {
    match kind {
        MediaKind::Movie => Ok("movie"),
        MediaKind::Tv => Ok("tv"),
        MediaKind::Person => Err(TmdbError::Provider(
            "people have no genres, reviews or providers".into(),
        )),
    }
}

fn borrowed(pairs: &[(String, String)]) -> Vec<(&str, &str)> {
    pairs
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect()
}

#[async_trait::async_trait]
impl MediaSource for TmdbClient {
    fn name(&self) -> &str {
        "tmdb"
    }

    async fn movie_list(
        &self,
        list: MovieList,
        page: u32,
    ) -> Result<Paged<MovieSummary>, TmdbError> {
        let region = self.config.region.as_str();
        let data = self
            .get_page(
                &format!("/movie/{}", list.endpoint()),
                page,
                &[("region", region)],
            )
            .await?;
        Ok(parse::paged(&data, parse::movie_summary))
    }

    async fn tv_list(&self, list: TvList, page: u32) -> Result<Paged<TvSummary>, TmdbError> {
        let data = self
            .get_page(&format!("/tv/{}", list.endpoint()), page, &[])
            .await?;
        Ok(parse::paged(&data, parse::tv_summary))
    }

    async fn trending(
        &self,
        kind: MediaKind,
        window: TimeWindow,
        page: u32,
    ) -> Result<Paged<SearchHit>, TmdbError> {
        let data = self
            .get_page(&format!("/trending/{kind}/{window}"), page, &[])
            .await?;
        Ok(parse::paged(&data, |v| parse::search_hit_as(kind, v)))
    }

    async fn discover_movies(
        &self,
        filters: &[(String, String)],
        page: u32,
    ) -> Result<Paged<MovieSummary>, TmdbError> {
        let data = self
            .get_page("/discover/movie", page, &borrowed(filters))
            .await?;
        Ok(parse::paged(&data, parse::movie_summary))
    }

    async fn discover_tv(
        &self,
        filters: &[(String, String)],
        page: u32,
    ) -> Result<Paged<TvSummary>, TmdbError> {
        let data = self
            .get_page("/discover/tv", page, &borrowed(filters))
            .await?;
        Ok(parse::paged(&data, parse::tv_summary))
    }

    async fn movie(&self, id: u64) -> Result<MovieDetail, TmdbError> {
        let data = self
            .get_json(&format!("/movie/{id}"), &[("append_to_response", "credits")])
            .await?;
        Ok(parse::movie_detail(&data))
    }

    async fn tv(&self, id: u64) -> Result<TvDetail, TmdbError> {
        let data = self
            .get_json(&format!("/tv/{id}"), &[("append_to_response", "credits")])
            .await?;
        Ok(parse::tv_detail(&data))
    }

    async fn person(&self, id: u64) -> Result<PersonDetail, TmdbError> {
        let data = self
            .get_json(
                &format!("/person/{id}"),
                &[("append_to_response", "movie_credits,tv_credits")],
            )
            .await?;
        Ok(parse::person_detail(&data))
    }

    async fn movie_related(
        &self,
        id: u64,
        related: Related,
        page: u32,
    ) -> Result<Paged<MovieSummary>, TmdbError> {
        let data = self
            .get_page(&format!("/movie/{id}/{}", related.as_str()), page, &[])
            .await?;
        Ok(parse::paged(&data, parse::movie_summary))
    }

    async fn tv_related(
        &self,
        id: u64,
        related: Related,
        page: u32,
    ) -> Result<Paged<TvSummary>, TmdbError> {
        let data = self
            .get_page(&format!("/tv/{id}/{}", related.as_str()), page, &[])
            .await?;
        Ok(parse::paged(&data, parse::tv_summary))
    }

    async fn reviews(
        &self,
        kind: MediaKind,
        id: u64,
        page: u32,
    ) -> Result<Paged<Review>, TmdbError> {
        let segment = kind_segment(kind)?;
        let data = self
            .get_page(&format!("/{segment}/{id}/reviews"), page, &[])
            .await?;
        Ok(parse::paged(&data, parse::review))
    }

    async fn tv_season(&self, id: u64, season_number: u32) -> Result<Season, TmdbError> {
        let data = self
            .get_json(&format!("/tv/{id}/season/{season_number}"), &[])
            .await?;
        Ok(parse::season(&data))
    }

    async fn search(&self, query: &str, page: u32) -> Result<Paged<SearchHit>, TmdbError> {
        let data = self
            .get_page(
                "/search/multi",
                page,
                &[("query", query), ("include_adult", "false")],
            )
            .await?;
        Ok(parse::paged(&data, parse::search_hit))
    }

    async fn popular_people(&self, page: u32) -> Result<Paged<PersonSummary>, TmdbError> {
        let data = self.get_page("/person/popular", page, &[]).await?;
        Ok(parse::paged(&data, parse::person_summary))
    }

    async fn genres(&self, kind: MediaKind) -> Result<Vec<Genre>, TmdbError> {
        let segment = kind_segment(kind)?;
        let data = self
            .get_json(&format!("/genre/{segment}/list"), &[])
            .await?;
        Ok(parse::genres(&data["genres"]))
    }

    async fn watch_providers(
        &self,
        kind: MediaKind,
        region: &str,
    ) -> Result<Vec<WatchProvider>, TmdbError> {
        let segment = kind_segment(kind)?;
        let data = self
            .get_json(
                &format!("/watch/providers/{segment}"),
                &[("watch_region", region)],
            )
            .await?;
        Ok(parse::watch_providers(&data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_are_clamped_to_api_range() {
        assert_eq!(clamp_page(0), 1);
        assert_eq!(clamp_page(7), 7);
        assert_eq!(clamp_page(501), 500);
    }

    #[test]
    fn empty_api_key_is_rejected() {
        assert!(matches!(
            TmdbClient::new(TmdbConfig::new("  ")),
            Err(TmdbError::Provider(_))
        ));
    }

    #[test]
    fn person_kind_has_no_catalogue_segment() {
        assert_eq!(kind_segment(MediaKind::Tv).unwrap(), "tv");
        assert!(kind_segment(MediaKind::Person).is_err());
    }
}
