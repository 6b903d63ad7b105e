use cinedex_core::types::{MediaKind, MovieList, TimeWindow};
use cinedex_tmdb::models::SearchHit;
use cinedex_tmdb::{MediaSource, Related, TmdbClient, TmdbConfig, TmdbError};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> TmdbClient {
    let mut config = TmdbConfig::new("test-key");
    config.base_url = server.uri();
    config.region = "GB".into();
    TmdbClient::new(config).expect("client builds")
}

#[tokio::test]
async fn movie_list_sends_key_language_region_and_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movie/now_playing"))
        .and(query_param("api_key", "test-key"))
        .and(query_param("language", "en-US"))
        .and(query_param("region", "GB"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 3,
            "total_pages": 12,
            "total_results": 230,
            "results": [ { "id": 550, "title": "Fight Club", "vote_average": 8.4 } ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = client_for(&server)
        .movie_list(MovieList::NowPlaying, 3)
        .await
        .expect("list ok");
    assert_eq!(page.page, 3);
    assert_eq!(page.total_pages, 12);
    assert_eq!(page.results[0].title, "Fight Club");
}

#[tokio::test]
async fn out_of_range_pages_are_clamped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/person/popular"))
        .and(query_param("page", "500"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 500, "total_pages": 500, "total_results": 10000, "results": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = client_for(&server).popular_people(9999).await.unwrap();
    assert!(page.is_empty());
}

#[tokio::test]
async fn discover_forwards_filter_pairs() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/discover/movie"))
        .and(query_param("with_genres", "28,12"))
        .and(query_param("vote_average.gte", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 1, "total_pages": 1, "total_results": 1,
            "results": [ { "id": 1, "title": "Action Adventure" } ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let filters = vec![
        ("with_genres".to_string(), "28,12".to_string()),
        ("vote_average.gte".to_string(), "7".to_string()),
    ];
    let page = client_for(&server)
        .discover_movies(&filters, 1)
        .await
        .unwrap();
    assert_eq!(page.results.len(), 1);
}

#[tokio::test]
async fn trending_tags_hits_with_requested_kind() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/trending/tv/week"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 1, "total_pages": 1, "total_results": 1,
            "results": [ { "id": 1396, "name": "Breaking Bad" } ]
        })))
        .mount(&server)
        .await;

    let page = client_for(&server)
        .trending(MediaKind::Tv, TimeWindow::Week, 1)
        .await
        .unwrap();
    assert!(matches!(&page.results[0], SearchHit::Tv(show) if show.id == 1396));
}

#[tokio::test]
async fn recommendations_and_credits_paths() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movie/27205/recommendations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 1, "total_pages": 0, "total_results": 0, "results": []
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/movie/27205"))
        .and(query_param("append_to_response", "credits"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 27205, "title": "Inception",
            "credits": { "cast": [], "crew": [ { "id": 525, "name": "Christopher Nolan", "job": "Director" } ] }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let recs = client
        .movie_related(27205, Related::Recommendations, 1)
        .await
        .unwrap();
    assert!(recs.is_empty());

    let movie = client.movie(27205).await.unwrap();
    assert_eq!(movie.directors[0].name, "Christopher Nolan");
}

#[tokio::test]
async fn not_found_maps_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tv/0"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client_for(&server).tv(0).await.unwrap_err();
    assert!(matches!(err, TmdbError::NotFound));
}

#[tokio::test]
async fn server_errors_map_to_provider_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/multi"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client_for(&server).search("dune", 1).await.unwrap_err();
    assert!(matches!(err, TmdbError::Provider(msg) if msg.contains("503")));
}

#[tokio::test]
async fn invalid_json_is_a_provider_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/genre/movie/list"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .genres(MediaKind::Movie)
        .await
        .unwrap_err();
    assert!(matches!(err, TmdbError::Provider(_)));
}

#[tokio::test]
async fn unreachable_host_is_a_network_error() {
    let mut config = TmdbConfig::new("test-key");
    config.base_url = "http://127.0.0.1:9".into();
    let client = TmdbClient::new(config).unwrap();

    let err = client.popular_people(1).await.unwrap_err();
    assert!(matches!(err, TmdbError::Network(_)));
}
