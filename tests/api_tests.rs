use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use movie_recommender::{
    routes::{create_router, AppState},
    services::{corpus, EngineSettings, Recommender},
};

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/movies.csv");

fn create_test_app() -> Router {
    let corpus = corpus::load(FIXTURE).unwrap();
    let recommender = Recommender::new(corpus, EngineSettings::default());
    create_router(AppState::new(recommender, 3))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health_check() {
    let (status, body) = get(create_test_app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_titles_in_corpus_order() {
    let (status, body) = get(create_test_app(), "/api/v1/titles").await;
    assert_eq!(status, StatusCode::OK);
    let titles = body.as_array().unwrap();
    assert_eq!(titles.len(), 6);
    assert_eq!(titles[0], "Avatar");
    assert_eq!(titles[4], "Untitled Project");
}

#[tokio::test]
async fn test_genre_vocabulary_is_sorted() {
    let (status, body) = get(create_test_app(), "/api/v1/genres").await;
    assert_eq!(status, StatusCode::OK);
    let genres: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g.as_str().unwrap())
        .collect();
    assert_eq!(
        genres,
        vec!["Action", "Adventure", "Crime", "Drama", "Romance", "Science Fiction"]
    );
}

#[tokio::test]
async fn test_recommend_by_title() {
    let (status, body) = get(
        create_test_app(),
        "/api/v1/recommendations/title?title=Avatar",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Avatar");

    let recommendations = body["recommendations"].as_array().unwrap();
    assert_eq!(recommendations.len(), 5);
    assert_eq!(recommendations[0], "First Contact");
    assert!(!recommendations.iter().any(|t| t == "Avatar"));
}

#[tokio::test]
async fn test_recommend_by_unknown_title_is_404() {
    let (status, body) = get(
        create_test_app(),
        "/api/v1/recommendations/title?title=Avatar%202",
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("Avatar 2"));
}

#[tokio::test]
async fn test_recommend_by_genre() {
    let (status, body) = get(
        create_test_app(),
        "/api/v1/recommendations/genre?genre=%20action&limit=2",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["kind"], "matches");

    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["title"], "Avatar");
    assert_eq!(results[1]["title"], "Pirates of the Caribbean: At World's End");
    assert!(results[0]["score"].as_f64().unwrap() > 6.0);
}

#[tokio::test]
async fn test_recommend_by_genre_from_plain_words() {
    let (status, body) = get(
        create_test_app(),
        "/api/v1/recommendations/genre?genre=romance",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"][0]["title"], "Love at Sea");
}

#[tokio::test]
async fn test_recommend_by_genre_no_result() {
    let (status, body) = get(
        create_test_app(),
        "/api/v1/recommendations/genre?genre=Western",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["kind"], "no_result");
    assert_eq!(body["genre"], "Western");
    assert_eq!(body["message"], "No movies found for the genre: \"Western\"");
}

#[tokio::test]
async fn test_recommend_by_genre_zero_limit_is_400() {
    let (status, _) = get(
        create_test_app(),
        "/api/v1/recommendations/genre?genre=action&limit=0",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let id = "6f1c2a58-1f0e-4c1e-9a57-3c2b9a0d7e11";
    let response = create_test_app()
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("x-request-id", id)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.headers()["x-request-id"], id);
}
