use axum::{extract::State, Json};

use super::AppState;

/// Sorted genre vocabulary, for the genre picker
pub async fn list(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.recommender.get_genre_vocabulary().to_vec())
}
