pub mod client;
pub mod models;
pub mod parse;
pub mod provider;

pub use client::{TmdbClient, TmdbConfig};
pub use provider::{MediaSource, Related};

use thiserror::Error;

pub const IMAGE_BASE: &str = "https://image.tmdb.org/t/p";

#[derive(Error, Debug)]
pub enum TmdbError {
    #[error("provider error: {0}")]
    Provider(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("not found")]
    NotFound,
}

/// Image sizes the site asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    W185,
    W300,
    W500,
    W780,
    Original,
}

impl ImageSize {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::W185 => "w185",
            Self::W300 => "w300",
            Self::W500 => "w500",
            Self::W780 => "w780",
            Self::Original => "original",
        }
    }
}

/// Absolute image URL for a TMDB image path.
pub fn image_url(path: Option<&str>, size: ImageSize) -> Option<String> {
    path.filter(|p| !p.is_empty())
        .map(|p| format!("{IMAGE_BASE}/{}{p}", size.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_urls() {
        assert_eq!(
            image_url(Some("/poster.jpg"), ImageSize::W500).as_deref(),
            Some("https://image.tmdb.org/t/p/w500/poster.jpg")
        );
        assert_eq!(image_url(Some(""), ImageSize::W500), None);
        assert_eq!(image_url(None, ImageSize::Original), None);
    }
}
