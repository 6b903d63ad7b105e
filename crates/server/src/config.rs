use anyhow::{Context, bail};
use cinedex_tmdb::TmdbConfig;
use cinedex_tmdb::client::DEFAULT_BASE_URL;

use crate::region::is_valid_region;

/// Process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub tmdb: TmdbConfig,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) with an injectable variable source.
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let api_key = var("TMDB_API_KEY")
            .filter(|k| !k.trim().is_empty())
            .context("TMDB_API_KEY must be set")?;

        let region = var("CINEDEX_REGION")
            .map(|r| r.to_ascii_uppercase())
            .unwrap_or_else(|| "US".to_string());
        if !is_valid_region(&region) {
            bail!("CINEDEX_REGION must be a two-letter country code, got {region:?}");
        }

        let tmdb = TmdbConfig {
            api_key,
            base_url: var("TMDB_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            language: var("CINEDEX_LANGUAGE").unwrap_or_else(|| "en-US".to_string()),
            region,
        };

        Ok(Self {
            bind_addr: var("CINEDEX_BIND").unwrap_or_else(|| "0.0.0.0:3000".to_string()),
            tmdb,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = ServerConfig::from_lookup(lookup(&[("TMDB_API_KEY", "k")])).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:3000");
        assert_eq!(config.tmdb.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.tmdb.language, "en-US");
        assert_eq!(config.tmdb.region, "US");
    }

    #[test]
    fn api_key_is_required() {
        assert!(ServerConfig::from_lookup(lookup(&[])).is_err());
        assert!(ServerConfig::from_lookup(lookup(&[("TMDB_API_KEY", "  ")])).is_err());
    }

    #[test]
    fn region_is_normalized_and_checked() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("TMDB_API_KEY", "k"),
            ("CINEDEX_REGION", "gb"),
        ]))
        .unwrap();
        assert_eq!(config.tmdb.region, "GB");

        let bad = ServerConfig::from_lookup(lookup(&[
            ("TMDB_API_KEY", "k"),
            ("CINEDEX_REGION", "Britain"),
        ]));
        assert!(bad.is_err());
    }
}
