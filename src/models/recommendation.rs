use serde::Serialize;

/// A movie matched by a genre query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreMatch {
    pub title: String,
    /// Weighted rating rounded to two decimal places
    pub score: f64,
}

/// Outcome of a genre query
///
/// Callers must branch on the variant: a query that matched nothing is
/// reported as `NoResult`, never as an empty `Matches`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GenreRecommendations {
    Matches {
        genre: String,
        results: Vec<GenreMatch>,
    },
    NoResult {
        /// The genre exactly as the caller supplied it
        genre: String,
    },
}

impl GenreRecommendations {
    pub fn is_no_result(&self) -> bool {
        matches!(self, GenreRecommendations::NoResult { .. })
    }

    /// Human-readable message for the no-result case
    pub fn message(&self) -> Option<String> {
        match self {
            GenreRecommendations::NoResult { genre } => {
                Some(format!("No movies found for the genre: \"{}\"", genre))
            }
            GenreRecommendations::Matches { .. } => None,
        }
    }
}
