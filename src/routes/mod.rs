use std::sync::Arc;

use axum::{http::StatusCode, middleware, routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{make_span_with_request_id, request_id_middleware};
use crate::services::Recommender;

pub mod genres;
pub mod recommendations;
pub mod titles;

/// State shared by every handler; the engine is read-only after boot
#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<Recommender>,
    /// Limit used by genre queries that do not pass one
    pub genre_limit: usize,
}

impl AppState {
    pub fn new(recommender: Recommender, genre_limit: usize) -> Self {
        Self {
            recommender: Arc::new(recommender),
            genre_limit,
        }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/titles", get(titles::list))
        .route("/genres", get(genres::list))
        .route("/recommendations/title", get(recommendations::by_title))
        .route("/recommendations/genre", get(recommendations::by_genre))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
