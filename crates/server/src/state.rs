use std::sync::Arc;

use cinedex_core::filters::FilterSchema;
use cinedex_core::types::MediaKind;
use cinedex_tmdb::MediaSource;

use crate::discover::schema_for;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn MediaSource>,
    pub movie_filters: Arc<FilterSchema>,
    pub tv_filters: Arc<FilterSchema>,
    /// Region used when the visitor has not picked one.
    pub default_region: String,
}

impl AppState {
    pub fn new(source: Arc<dyn MediaSource>, default_region: impl Into<String>) -> Self {
        Self {
            source,
            movie_filters: Arc::new(schema_for(MediaKind::Movie)),
            tv_filters: Arc::new(schema_for(MediaKind::Tv)),
            default_region: default_region.into(),
        }
    }

    pub fn filter_schema(&self, kind: MediaKind) -> Arc<FilterSchema> {
        match kind {
            MediaKind::Tv => self.tv_filters.clone(),
            _ => self.movie_filters.clone(),
        }
    }
}
