use std::convert::Infallible;
use std::sync::LazyLock;

use axum::extract::FromRequestParts;
use axum::http::header::COOKIE;
use axum::http::request::Parts;
use regex::Regex;

use crate::state::AppState;

pub const REGION_COOKIE: &str = "region";
const COOKIE_MAX_AGE_SECS: u64 = 60 * 60 * 24 * 365;

static REGION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2}$").expect("static regex"));

/// Regions offered in the header selector (ISO 3166-1).
pub const REGIONS: &[(&str, &str)] = &[
    ("AU", "Australia"),
    ("BR", "Brazil"),
    ("CA", "Canada"),
    ("DE", "Germany"),
    ("ES", "Spain"),
    ("FR", "France"),
    ("GB", "United Kingdom"),
    ("IN", "India"),
    ("IT", "Italy"),
    ("JP", "Japan"),
    ("MX", "Mexico"),
    ("NL", "Netherlands"),
    ("SE", "Sweden"),
    ("US", "United States"),
];

pub fn region_name(code: &str) -> &str {
    REGIONS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
        .unwrap_or(code)
}

pub fn is_valid_region(code: &str) -> bool {
    REGION_RE.is_match(code)
}

pub fn region_cookie(code: &str) -> String {
    format!("{REGION_COOKIE}={code}; Path=/; Max-Age={COOKIE_MAX_AGE_SECS}; SameSite=Lax")
}

/// Only same-site absolute paths are followed after a form post.
pub fn safe_return_path(path: Option<&str>) -> &str {
    match path {
        Some(p) if p.starts_with('/') && !p.starts_with("//") && !p.contains('\\') => p,
        _ => "/",
    }
}

fn region_from_cookies(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == REGION_COOKIE)
        .map(|(_, value)| value.trim().to_ascii_uppercase())
        .filter(|code| is_valid_region(code))
}

/// Per-request values the page layout needs.
#[derive(Debug, Clone)]
pub struct PageContext {
    pub region: String,
    /// Path and query of the current request, for the region form.
    pub path: String,
}

impl Default for PageContext {
    fn default() -> Self {
        Self {
            region: "US".to_string(),
            path: "/".to_string(),
        }
    }
}

impl FromRequestParts<AppState> for PageContext {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let region = region_from_cookies(parts).unwrap_or_else(|| state.default_region.clone());
        let path = parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| "/".to_string());

        Ok(PageContext { region, path })
    }
}
