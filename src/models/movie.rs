use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw genre metadata exactly as the dataset stores it
///
/// The TMDB export is not consistent: most rows hold a stringified list of
/// `{"id": .., "name": ..}` mappings, JSON sources may carry the list natively,
/// and a few rows hold plain words or nothing at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GenreField {
    /// Already a sequence of entries
    Sequence(Vec<Value>),
    /// A string that may or may not encode a literal sequence
    Text(String),
    /// Any other value, including null
    Scalar(Value),
}

impl GenreField {
    pub fn is_null(&self) -> bool {
        matches!(self, GenreField::Scalar(Value::Null))
    }
}

impl Default for GenreField {
    fn default() -> Self {
        GenreField::Scalar(Value::Null)
    }
}

impl From<Option<String>> for GenreField {
    fn from(raw: Option<String>) -> Self {
        match raw {
            Some(text) => GenreField::Text(text),
            None => GenreField::default(),
        }
    }
}

/// A single movie record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Movie {
    /// Row position in the corpus, stable for the process lifetime
    pub id: usize,
    pub title: String,
    /// Plot summary, empty when the source has none
    pub overview: String,
    pub vote_average: f64,
    pub vote_count: u64,
    pub genres: GenreField,
    /// Weighted rating; 0.0 until the corpus has been scored
    pub score: f64,
}

impl Movie {
    pub fn new(
        id: usize,
        title: impl Into<String>,
        overview: impl Into<String>,
        vote_average: f64,
        vote_count: u64,
        genres: GenreField,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            overview: overview.into(),
            vote_average,
            vote_count,
            genres,
            score: 0.0,
        }
    }
}

/// The in-memory movie collection for one process lifetime
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Corpus {
    movies: Vec<Movie>,
}

impl Corpus {
    /// Builds a corpus, re-assigning ids from row position
    pub fn new(mut movies: Vec<Movie>) -> Self {
        for (id, movie) in movies.iter_mut().enumerate() {
            movie.id = id;
        }
        Self { movies }
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn get(&self, id: usize) -> Option<&Movie> {
        self.movies.get(id)
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// First movie whose title matches exactly
    pub fn position_of(&self, title: &str) -> Option<usize> {
        self.movies.iter().position(|movie| movie.title == title)
    }

    pub(crate) fn movies_mut(&mut self) -> &mut [Movie] {
        &mut self.movies
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_corpus_assigns_row_ids() {
        let corpus = Corpus::new(vec![
            Movie::new(7, "Avatar", "", 7.2, 11800, GenreField::default()),
            Movie::new(7, "Spectre", "", 6.3, 4466, GenreField::default()),
        ]);
        assert_eq!(corpus.get(0).unwrap().id, 0);
        assert_eq!(corpus.get(1).unwrap().id, 1);
    }

    #[test]
    fn test_position_of_first_match_wins() {
        let corpus = Corpus::new(vec![
            Movie::new(0, "The Host", "", 6.0, 10, GenreField::default()),
            Movie::new(0, "The Host", "", 7.0, 20, GenreField::default()),
        ]);
        assert_eq!(corpus.position_of("The Host"), Some(0));
        assert_eq!(corpus.position_of("the host"), None);
    }

    #[test]
    fn test_genre_field_untagged_deserialization() {
        let native: GenreField = serde_json::from_value(json!([{"name": "Action"}])).unwrap();
        assert!(matches!(native, GenreField::Sequence(_)));

        let text: GenreField = serde_json::from_value(json!("Action Drama")).unwrap();
        assert_eq!(text, GenreField::Text("Action Drama".to_string()));

        let null: GenreField = serde_json::from_value(json!(null)).unwrap();
        assert!(null.is_null());

        let number: GenreField = serde_json::from_value(json!(28)).unwrap();
        assert_eq!(number, GenreField::Scalar(json!(28)));
    }
}
