use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::error::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct TitleQuery {
    pub title: String,
}

#[derive(Debug, Serialize)]
pub struct TitleRecommendations {
    pub title: String,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct GenreQuery {
    pub genre: String,
    pub limit: Option<usize>,
}

/// Movies with the most similar plot summaries
pub async fn by_title(
    State(state): State<AppState>,
    Query(params): Query<TitleQuery>,
) -> AppResult<Json<TitleRecommendations>> {
    if params.title.is_empty() {
        return Err(AppError::InvalidInput("title must not be empty".to_string()));
    }

    let recommendations = state.recommender.recommend_by_title(&params.title)?;
    Ok(Json(TitleRecommendations {
        title: params.title,
        recommendations,
    }))
}

/// First movies of a genre; a query matching nothing is answered with `no_result`
pub async fn by_genre(
    State(state): State<AppState>,
    Query(params): Query<GenreQuery>,
) -> AppResult<Json<serde_json::Value>> {
    let limit = params.limit.unwrap_or(state.genre_limit);
    if limit == 0 {
        return Err(AppError::InvalidInput("limit must be positive".to_string()));
    }

    let outcome = state.recommender.recommend_by_genre(&params.genre, limit);
    let mut body = serde_json::to_value(&outcome)?;
    if let Some(message) = outcome.message() {
        body["message"] = message.into();
    }
    Ok(Json(body))
}
