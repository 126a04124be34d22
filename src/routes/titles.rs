use axum::{extract::State, Json};

use super::AppState;

/// Every title in corpus order, for the movie picker
pub async fn list(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.recommender.get_all_titles())
}
