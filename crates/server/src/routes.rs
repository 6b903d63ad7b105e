use axum::extract::rejection::QueryRejection;
use axum::extract::{Form, Path, Query, RawQuery, State};
use axum::http::header::SET_COOKIE;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use cinedex_core::error::ApiError;
use cinedex_core::filters::FilterCodec;
use cinedex_core::pagination::{PageLinks, compute, parse_page};
use cinedex_core::search::{SEARCH_PATH, normalize, search_href};
use cinedex_core::types::{MediaKind, MovieList, TimeWindow, TvList};
use cinedex_tmdb::Related;
use cinedex_tmdb::models::{Genre, Paged, WatchProvider};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use crate::discover::{PROVIDERS_KEY, discover_kind};
use crate::error::AppError;
use crate::region::{PageContext, is_valid_region, region_cookie, safe_return_path};
use crate::state::AppState;
use crate::views::cards::{
    episode_card, hit_card, movie_card, person_card, review_card, search_result_card, tv_card,
};
use crate::views::detail::{self, Tab};
use crate::views::filters::{FilterPanel, discover_filters};
use crate::views::layout::{page, page_with_search};
use crate::views::pagination::list_pagination;
use crate::views::{escape, grid};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/", get(home))
        .route("/movies/{list}", get(movie_list))
        .route("/tv-shows/{list}", get(tv_list))
        .route("/trending/{kind}", get(trending))
        .route("/people", get(people))
        .route("/discover/{kind}", get(discover).post(save_discover))
        .route("/discover/{kind}/clear", post(clear_discover))
        .route(SEARCH_PATH, get(search))
        .route("/region", post(set_region))
        .merge(detail_router())
        .fallback(not_found)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

fn detail_router() -> Router<AppState> {
    Router::new()
        .route("/movie/{id}", get(movie_page))
        .route("/movie/{id}/recommendations", get(movie_recommendations))
        .route("/movie/{id}/similar", get(movie_similar))
        .route("/movie/{id}/reviews", get(movie_reviews))
        .route("/tv/{id}", get(tv_page))
        .route("/tv/{id}/seasons", get(tv_seasons))
        .route("/tv/{id}/seasons/{number}", get(tv_season))
        .route("/tv/{id}/recommendations", get(tv_recommendations))
        .route("/tv/{id}/similar", get(tv_similar))
        .route("/tv/{id}/reviews", get(tv_reviews))
        .route("/person/{id}", get(person_page))
}

type PageResult = Result<Html<String>, AppError>;

// ---------------------------------------------------------------------------
// Shared rendering
// ---------------------------------------------------------------------------

/// Heading, card grid and pagination for one page of a listing.
fn listing<T>(
    heading: &str,
    paged: &Paged<T>,
    card: impl Fn(&T) -> String,
    empty_message: &str,
    links: &PageLinks,
) -> String {
    let cards: Vec<String> = paged.results.iter().map(card).collect();
    let window = compute(paged.page, paged.total_pages);
    format!(
        "<h1>{}</h1>{}{}",
        escape(heading),
        grid(&cards, empty_message),
        list_pagination(&window, links)
    )
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    source: String,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        source: state.source.name().to_string(),
    })
}

async fn not_found(ctx: PageContext) -> AppError {
    debug!(path = %ctx.path, "no route");
    AppError(ApiError::NotFound(format!("no page at {}", ctx.path)))
}

// ---------------------------------------------------------------------------
// Listings
// ---------------------------------------------------------------------------

async fn home(ctx: PageContext, State(state): State<AppState>) -> PageResult {
    let (movies, shows) = tokio::try_join!(
        state.source.trending(MediaKind::Movie, TimeWindow::Day, 1),
        state.source.trending(MediaKind::Tv, TimeWindow::Day, 1),
    )?;

    let movie_cards: Vec<String> = movies.results.iter().map(hit_card).collect();
    let show_cards: Vec<String> = shows.results.iter().map(hit_card).collect();
    let body = format!(
        concat!(
            r#"<section><h2><a href="/trending/movie">Trending Movies</a></h2>{movies}</section>"#,
            r#"<section><h2><a href="/trending/tv">Trending TV Shows</a></h2>{shows}</section>"#
        ),
        movies = grid(&movie_cards, "No results"),
        shows = grid(&show_cards, "No results"),
    );
    Ok(page(&ctx, "Home", &body))
}

async fn movie_list(
    ctx: PageContext,
    State(state): State<AppState>,
    Path(slug): Path<String>,
    RawQuery(query): RawQuery,
) -> PageResult {
    let list = MovieList::from_slug(&slug)
        .ok_or_else(|| ApiError::NotFound(format!("unknown movie list: {slug}")))?;
    let paged = state
        .source
        .movie_list(list, parse_page(query.as_deref()))
        .await?;

    let links = PageLinks::new(format!("/movies/{}", list.slug()), "");
    let body = listing(list.title(), &paged, movie_card, "No results", &links);
    Ok(page(&ctx, list.title(), &body))
}

async fn tv_list(
    ctx: PageContext,
    State(state): State<AppState>,
    Path(slug): Path<String>,
    RawQuery(query): RawQuery,
) -> PageResult {
    let list = TvList::from_slug(&slug)
        .ok_or_else(|| ApiError::NotFound(format!("unknown TV list: {slug}")))?;
    let paged = state
        .source
        .tv_list(list, parse_page(query.as_deref()))
        .await?;

    let links = PageLinks::new(format!("/tv-shows/{}", list.slug()), "");
    let body = listing(list.title(), &paged, tv_card, "No results", &links);
    Ok(page(&ctx, list.title(), &body))
}

#[derive(Deserialize)]
struct TrendingParams {
    window: Option<String>,
}

async fn trending(
    ctx: PageContext,
    State(state): State<AppState>,
    Path(slug): Path<String>,
    params: Result<Query<TrendingParams>, QueryRejection>,
    RawQuery(query): RawQuery,
) -> PageResult {
    let kind: MediaKind = slug.parse().map_err(ApiError::NotFound)?;
    let Query(params) = params?;
    let window = TimeWindow::parse_or_default(params.window.as_deref());
    let paged = state
        .source
        .trending(kind, window, parse_page(query.as_deref()))
        .await?;

    let extra = if window == TimeWindow::default() {
        String::new()
    } else {
        format!("window={window}")
    };
    let links = PageLinks::new(format!("/trending/{}", kind.as_str()), extra);
    let heading = match window {
        TimeWindow::Day => "Trending today",
        TimeWindow::Week => "Trending this week",
    };
    let switch = format!(
        r#"<nav class="window-switch"><a href="/trending/{k}">Today</a> <a href="/trending/{k}?window=week">This week</a></nav>"#,
        k = kind.as_str()
    );
    let body = format!(
        "{switch}{}",
        listing(heading, &paged, hit_card, "No results", &links)
    );
    Ok(page(&ctx, heading, &body))
}

async fn people(
    ctx: PageContext,
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> PageResult {
    let paged = state
        .source
        .popular_people(parse_page(query.as_deref()))
        .await?;
    let links = PageLinks::new("/people", "");
    let body = listing("Popular People", &paged, person_card, "No results", &links);
    Ok(page(&ctx, "Popular People", &body))
}

// ---------------------------------------------------------------------------
// Discover
// ---------------------------------------------------------------------------

async fn discover(
    ctx: PageContext,
    State(state): State<AppState>,
    Path(slug): Path<String>,
    RawQuery(query): RawQuery,
) -> PageResult {
    let kind = discover_kind(&slug)
        .ok_or_else(|| ApiError::NotFound(format!("nothing to discover for {slug}")))?;
    let query = query.unwrap_or_default();
    let codec = FilterCodec::from_query(state.filter_schema(kind), &query);
    render_discover(ctx, state, kind, codec, parse_page(Some(query.as_str()))).await
}

/// Results follow the applied filters, the panel shows the staged ones.
async fn render_discover(
    ctx: PageContext,
    state: AppState,
    kind: MediaKind,
    codec: FilterCodec,
    page_number: u32,
) -> PageResult {
    let mut pairs = codec.applied_pairs();
    if codec.applied().contains_key(PROVIDERS_KEY) {
        pairs.push(("watch_region".to_string(), ctx.region.clone()));
    }
    debug!(kind = %kind, filters = pairs.len(), page = page_number, "discover");

    let base_path = format!("/discover/{}", kind.as_str());
    let links = PageLinks::new(base_path.as_str(), codec.applied_query());

    let (genres, providers, results) = match kind {
        MediaKind::Tv => {
            let (genres, providers, paged) = tokio::join!(
                state.source.genres(kind),
                state.source.watch_providers(kind, &ctx.region),
                state.source.discover_tv(&pairs, page_number),
            );
            let paged = paged?;
            (
                genres,
                providers,
                listing("Discover TV Shows", &paged, tv_card, "No results", &links),
            )
        }
        _ => {
            let (genres, providers, paged) = tokio::join!(
                state.source.genres(kind),
                state.source.watch_providers(kind, &ctx.region),
                state.source.discover_movies(&pairs, page_number),
            );
            let paged = paged?;
            (
                genres,
                providers,
                listing("Discover Movies", &paged, movie_card, "No results", &links),
            )
        }
    };

    // The grid still renders when the filter vocabularies are unavailable.
    let genres: Vec<Genre> = genres.unwrap_or_else(|e| {
        warn!(error = %e, "genre list unavailable");
        Vec::new()
    });
    let providers: Vec<WatchProvider> = providers.unwrap_or_else(|e| {
        warn!(error = %e, "watch provider list unavailable");
        Vec::new()
    });

    let panel = discover_filters(&FilterPanel {
        kind,
        base_path: &base_path,
        codec: &codec,
        genres: &genres,
        providers: &providers,
    });
    let title = match kind {
        MediaKind::Tv => "Discover TV Shows",
        _ => "Discover Movies",
    };
    Ok(page(&ctx, title, &format!("{panel}{results}")))
}

/// Filter form submission: the body becomes the staged filters, which are
/// then saved and the browser sent to the canonical URL.
async fn save_discover(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    body: String,
) -> Result<Redirect, AppError> {
    let kind = discover_kind(&slug)
        .ok_or_else(|| ApiError::NotFound(format!("nothing to discover for {slug}")))?;

    let mut codec = FilterCodec::new(state.filter_schema(kind));
    codec.stage_query(&body);
    let query = codec.save_filters();
    debug!(kind = %kind, query = %query, "filters saved");

    let target = if query.is_empty() {
        format!("/discover/{}", kind.as_str())
    } else {
        format!("/discover/{}?{query}", kind.as_str())
    };
    Ok(Redirect::to(&target))
}

/// "Clear" in the filter form. Stages the defaults and re-renders the panel
/// without committing; results keep the applied filters, which arrive in
/// the query string.
async fn clear_discover(
    ctx: PageContext,
    State(state): State<AppState>,
    Path(slug): Path<String>,
    RawQuery(query): RawQuery,
) -> PageResult {
    let kind = discover_kind(&slug)
        .ok_or_else(|| ApiError::NotFound(format!("nothing to discover for {slug}")))?;
    let query = query.unwrap_or_default();
    let mut codec = FilterCodec::from_query(state.filter_schema(kind), &query);
    codec.clear_filters();
    debug!(kind = %kind, pending = codec.has_pending_changes(), "filters cleared");
    render_discover(ctx, state, kind, codec, parse_page(Some(query.as_str()))).await
}

// ---------------------------------------------------------------------------
// Movie detail
// ---------------------------------------------------------------------------

async fn movie_page(
    ctx: PageContext,
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> PageResult {
    let movie = state.source.movie(id).await?;
    let body = format!(
        "{}{}{}",
        detail::movie_hero(&movie),
        detail::tabs(MediaKind::Movie, id, Tab::Overview),
        detail::movie_overview(&movie)
    );
    Ok(page(&ctx, &movie.title, &body))
}

async fn movie_related(
    ctx: PageContext,
    state: AppState,
    id: u64,
    related: Related,
    query: Option<String>,
) -> PageResult {
    let page_number = parse_page(query.as_deref());
    let (movie, paged) = tokio::try_join!(
        state.source.movie(id),
        state.source.movie_related(id, related, page_number),
    )?;

    let (tab, heading, empty) = related_labels(related);
    let links = PageLinks::new(
        format!("{}/{}", MediaKind::Movie.detail_path(id), related.as_str()),
        "",
    );
    let body = format!(
        "{}{}{}",
        detail::movie_hero(&movie),
        detail::tabs(MediaKind::Movie, id, tab),
        listing(heading, &paged, movie_card, empty, &links)
    );
    Ok(page(&ctx, &format!("{heading} for {}", movie.title), &body))
}

async fn movie_recommendations(
    ctx: PageContext,
    State(state): State<AppState>,
    Path(id): Path<u64>,
    RawQuery(query): RawQuery,
) -> PageResult {
    movie_related(ctx, state, id, Related::Recommendations, query).await
}

async fn movie_similar(
    ctx: PageContext,
    State(state): State<AppState>,
    Path(id): Path<u64>,
    RawQuery(query): RawQuery,
) -> PageResult {
    movie_related(ctx, state, id, Related::Similar, query).await
}

async fn movie_reviews(
    ctx: PageContext,
    State(state): State<AppState>,
    Path(id): Path<u64>,
    RawQuery(query): RawQuery,
) -> PageResult {
    let page_number = parse_page(query.as_deref());
    let (movie, paged) = tokio::try_join!(
        state.source.movie(id),
        state.source.reviews(MediaKind::Movie, id, page_number),
    )?;

    let links = PageLinks::new(format!("{}/reviews", MediaKind::Movie.detail_path(id)), "");
    let body = format!(
        "{}{}{}",
        detail::movie_hero(&movie),
        detail::tabs(MediaKind::Movie, id, Tab::Reviews),
        listing("Reviews", &paged, review_card, "No reviews", &links)
    );
    Ok(page(&ctx, &format!("Reviews of {}", movie.title), &body))
}

fn related_labels(related: Related) -> (Tab, &'static str, &'static str) {
    match related {
        Related::Recommendations => (Tab::Recommendations, "Recommendations", "No recommendations"),
        Related::Similar => (Tab::Similar, "Similar", "No similar titles"),
    }
}

// ---------------------------------------------------------------------------
// TV detail
// ---------------------------------------------------------------------------

async fn tv_page(
    ctx: PageContext,
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> PageResult {
    let show = state.source.tv(id).await?;
    let body = format!(
        "{}{}{}",
        detail::tv_hero(&show),
        detail::tabs(MediaKind::Tv, id, Tab::Overview),
        detail::tv_overview(&show)
    );
    Ok(page(&ctx, &show.name, &body))
}

async fn tv_seasons(
    ctx: PageContext,
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> PageResult {
    let show = state.source.tv(id).await?;
    let body = format!(
        "{}{}<h1>Seasons</h1>{}",
        detail::tv_hero(&show),
        detail::tabs(MediaKind::Tv, id, Tab::Seasons),
        detail::tv_seasons(&show)
    );
    Ok(page(&ctx, &format!("Seasons of {}", show.name), &body))
}

async fn tv_season(
    ctx: PageContext,
    State(state): State<AppState>,
    Path((id, number)): Path<(u64, u32)>,
) -> PageResult {
    let (show, season) = tokio::try_join!(state.source.tv(id), state.source.tv_season(id, number))?;

    let episodes: Vec<String> = season.episodes.iter().map(episode_card).collect();
    let overview = season
        .overview
        .as_deref()
        .filter(|o| !o.is_empty())
        .map(|o| format!(r#"<p class="overview">{}</p>"#, escape(o)))
        .unwrap_or_default();
    let body = format!(
        "{}{}<h1>{}</h1>{overview}{}",
        detail::tv_hero(&show),
        detail::tabs(MediaKind::Tv, id, Tab::Seasons),
        escape(&season.name),
        grid(&episodes, "No episodes")
    );
    Ok(page(&ctx, &format!("{} {}", show.name, season.name), &body))
}

async fn tv_related(
    ctx: PageContext,
    state: AppState,
    id: u64,
    related: Related,
    query: Option<String>,
) -> PageResult {
    let page_number = parse_page(query.as_deref());
    let (show, paged) = tokio::try_join!(
        state.source.tv(id),
        state.source.tv_related(id, related, page_number),
    )?;

    let (tab, heading, empty) = related_labels(related);
    let links = PageLinks::new(
        format!("{}/{}", MediaKind::Tv.detail_path(id), related.as_str()),
        "",
    );
    let body = format!(
        "{}{}{}",
        detail::tv_hero(&show),
        detail::tabs(MediaKind::Tv, id, tab),
        listing(heading, &paged, tv_card, empty, &links)
    );
    Ok(page(&ctx, &format!("{heading} for {}", show.name), &body))
}

async fn tv_recommendations(
    ctx: PageContext,
    State(state): State<AppState>,
    Path(id): Path<u64>,
    RawQuery(query): RawQuery,
) -> PageResult {
    tv_related(ctx, state, id, Related::Recommendations, query).await
}

async fn tv_similar(
    ctx: PageContext,
    State(state): State<AppState>,
    Path(id): Path<u64>,
    RawQuery(query): RawQuery,
) -> PageResult {
    tv_related(ctx, state, id, Related::Similar, query).await
}

async fn tv_reviews(
    ctx: PageContext,
    State(state): State<AppState>,
    Path(id): Path<u64>,
    RawQuery(query): RawQuery,
) -> PageResult {
    let page_number = parse_page(query.as_deref());
    let (show, paged) = tokio::try_join!(
        state.source.tv(id),
        state.source.reviews(MediaKind::Tv, id, page_number),
    )?;

    let links = PageLinks::new(format!("{}/reviews", MediaKind::Tv.detail_path(id)), "");
    let body = format!(
        "{}{}{}",
        detail::tv_hero(&show),
        detail::tabs(MediaKind::Tv, id, Tab::Reviews),
        listing("Reviews", &paged, review_card, "No reviews", &links)
    );
    Ok(page(&ctx, &format!("Reviews of {}", show.name), &body))
}

// ---------------------------------------------------------------------------
// People
// ---------------------------------------------------------------------------

async fn person_page(
    ctx: PageContext,
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> PageResult {
    let person = state.source.person(id).await?;
    Ok(page(&ctx, &person.name, &detail::person_profile(&person)))
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct SearchParams {
    q: Option<String>,
}

async fn search(
    ctx: PageContext,
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
    RawQuery(query): RawQuery,
) -> Result<Response, AppError> {
    let Query(params) = params?;
    let raw = params.q.unwrap_or_default();
    let (Some(term), Some(canonical)) = (normalize(&raw), search_href(&raw)) else {
        let body = r#"<div class="empty-box">Search for movies, TV shows and people.</div>"#;
        return Ok(page(&ctx, "Search", body).into_response());
    };
    if term != raw {
        debug!(from = %raw, to = %canonical, "normalizing search term");
        return Ok(Redirect::to(&canonical).into_response());
    }

    let paged = state
        .source
        .search(&term, parse_page(query.as_deref()))
        .await?;
    info!(term = %term, results = paged.total_results, "search");

    let links = PageLinks::new(SEARCH_PATH, format!("q={}", urlencoding::encode(&term)));
    let heading = format!("Search results for \"{term}\"");
    let body = listing(&heading, &paged, search_result_card, "No results", &links);
    Ok(page_with_search(&ctx, &heading, &term, &body).into_response())
}

// ---------------------------------------------------------------------------
// Region
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct RegionForm {
    region: String,
    return_to: Option<String>,
}

async fn set_region(Form(form): Form<RegionForm>) -> Response {
    let target = safe_return_path(form.return_to.as_deref()).to_string();
    let region = form.region.trim().to_ascii_uppercase();

    if !is_valid_region(&region) {
        warn!(region = %form.region, "ignoring invalid region");
        return Redirect::to(&target).into_response();
    }

    debug!(region = %region, "region selected");
    ([(SET_COOKIE, region_cookie(&region))], Redirect::to(&target)).into_response()
}
