use serde::{Deserialize, Serialize};

/// Kind of record the remote catalogue returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Movie,
    Tv,
    Person,
}

impl MediaKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Tv => "tv",
            Self::Person => "person",
        }
    }

    /// Label shown on search result badges.
    pub fn label(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Tv => "TV Show",
            Self::Person => "person",
        }
    }

    /// Detail page path for a record of this kind.
    pub fn detail_path(self, id: u64) -> String {
        format!("/{}/{id}", self.as_str())
    }

    pub fn from_slug(s: &str) -> Option<Self> {
        match s {
            "movie" => Some(Self::Movie),
            "tv" => Some(Self::Tv),
            "person" => Some(Self::Person),
            _ => None,
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MediaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_slug(s).ok_or_else(|| format!("unknown media kind: {s}"))
    }
}

/// Curated movie listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovieList {
    Popular,
    NowPlaying,
    Upcoming,
    TopRated,
}

impl MovieList {
    pub const ALL: [MovieList; 4] = [
        Self::Popular,
        Self::NowPlaying,
        Self::Upcoming,
        Self::TopRated,
    ];

    /// URL slug used by the site routes.
    pub fn slug(self) -> &'static str {
        match self {
            Self::Popular => "popular",
            Self::NowPlaying => "now-playing",
            Self::Upcoming => "upcoming",
            Self::TopRated => "top-rated",
        }
    }

    /// Path segment of the remote endpoint (`/movie/{segment}`).
    pub fn endpoint(self) -> &'static str {
        match self {
            Self::Popular => "popular",
            Self::NowPlaying => "now_playing",
            Self::Upcoming => "upcoming",
            Self::TopRated => "top_rated",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Popular => "Popular Movies",
            Self::NowPlaying => "Now Playing Movies",
            Self::Upcoming => "Upcoming Movies",
            Self::TopRated => "Top Rated Movies",
        }
    }

    pub fn from_slug(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.slug() == s)
    }
}

/// Curated TV listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TvList {
    Popular,
    AiringToday,
    OnTheAir,
    TopRated,
}

impl TvList {
    pub const ALL: [TvList; 4] = [
        Self::Popular,
        Self::AiringToday,
        Self::OnTheAir,
        Self::TopRated,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Self::Popular => "popular",
            Self::AiringToday => "airing-today",
            Self::OnTheAir => "on-the-air",
            Self::TopRated => "top-rated",
        }
    }

    pub fn endpoint(self) -> &'static str {
        match self {
            Self::Popular => "popular",
            Self::AiringToday => "airing_today",
            Self::OnTheAir => "on_the_air",
            Self::TopRated => "top_rated",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Popular => "Popular TV Shows",
            Self::AiringToday => "TV Shows Airing Today",
            Self::OnTheAir => "Currently Airing TV Shows",
            Self::TopRated => "Top Rated TV Shows",
        }
    }

    pub fn from_slug(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.slug() == s)
    }
}

/// Trending aggregation window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeWindow {
    #[default]
    Day,
    Week,
}

impl TimeWindow {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
        }
    }

    /// Unknown values fall back to `Day`.
    pub fn parse_or_default(s: Option<&str>) -> Self {
        match s {
            Some("week") => Self::Week,
            _ => Self::Day,
        }
    }
}

impl std::fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_slugs_round_trip() {
        for list in MovieList::ALL {
            assert_eq!(MovieList::from_slug(list.slug()), Some(list));
        }
        for list in TvList::ALL {
            assert_eq!(TvList::from_slug(list.slug()), Some(list));
        }
        assert_eq!(MovieList::from_slug("now_playing"), None);
    }

    #[test]
    fn detail_paths() {
        assert_eq!(MediaKind::Movie.detail_path(1), "/movie/1");
        assert_eq!(MediaKind::Tv.detail_path(2), "/tv/2");
        assert_eq!(MediaKind::Person.detail_path(3), "/person/3");
        assert_eq!("tv".parse::<MediaKind>(), Ok(MediaKind::Tv));
        assert!("anime".parse::<MediaKind>().is_err());
    }

    #[test]
    fn time_window_defaults_to_day() {
        assert_eq!(TimeWindow::parse_or_default(None), TimeWindow::Day);
        assert_eq!(TimeWindow::parse_or_default(Some("year")), TimeWindow::Day);
        assert_eq!(TimeWindow::parse_or_default(Some("week")), TimeWindow::Week);
    }
}
