use std::collections::BTreeSet;

use crate::{
    error::{AppError, AppResult},
    models::{Corpus, GenreMatch, GenreRecommendations},
    services::{
        genres::{build_vocabulary, normalize_genres, normalize_query},
        scoring::{score_all, RatingPrior},
        similarity::SimilarityMatrix,
    },
};

/// Tunables of the recommendation engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineSettings {
    /// Neighbours returned by [`Recommender::recommend_by_title`]
    pub neighbor_count: usize,
    /// `vote_count` quantile used as the minimum-votes threshold
    pub vote_quantile: f64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            neighbor_count: 5,
            vote_quantile: 0.90,
        }
    }
}

/// Recommendation engine over one immutable corpus
///
/// Everything derived from the corpus (scores, genre tokens, vocabulary and the
/// similarity matrix) is computed once in [`Recommender::new`]; queries only read.
#[derive(Debug, Clone)]
pub struct Recommender {
    corpus: Corpus,
    prior: RatingPrior,
    genre_tokens: Vec<BTreeSet<String>>,
    vocabulary: Vec<String>,
    similarity: SimilarityMatrix,
    settings: EngineSettings,
}

impl Recommender {
    pub fn new(corpus: Corpus, settings: EngineSettings) -> Self {
        let (corpus, prior) = score_all(corpus, settings.vote_quantile);
        let genre_tokens = corpus
            .movies()
            .iter()
            .map(|movie| normalize_genres(&movie.genres))
            .collect();
        let vocabulary = build_vocabulary(&corpus);
        let similarity = SimilarityMatrix::build(&corpus);

        Self {
            corpus,
            prior,
            genre_tokens,
            vocabulary,
            similarity,
            settings,
        }
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn prior(&self) -> RatingPrior {
        self.prior
    }

    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }

    pub fn settings(&self) -> EngineSettings {
        self.settings
    }

    /// Every title in corpus order
    pub fn get_all_titles(&self) -> Vec<String> {
        self.corpus.movies().iter().map(|m| m.title.clone()).collect()
    }

    /// Sorted genre display names
    pub fn get_genre_vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Titles with the most similar plot summaries, most similar first
    ///
    /// Duplicate titles resolve to their first occurrence in the corpus.
    pub fn recommend_by_title(&self, title: &str) -> AppResult<Vec<String>> {
        let Some(index) = self.corpus.position_of(title) else {
            tracing::warn!(title, "Title not found in corpus");
            return Err(AppError::NotFound(format!("Movie not found: {}", title)));
        };

        let titles: Vec<String> = self
            .similarity
            .neighbors(index, self.settings.neighbor_count)
            .into_iter()
            .filter_map(|i| self.corpus.get(i))
            .map(|movie| movie.title.clone())
            .collect();

        tracing::debug!(title, index, results = titles.len(), "Title recommendations");
        Ok(titles)
    }

    /// The first `limit` movies in corpus order tagged with `genre`
    ///
    /// Matches are not ranked by score.
    pub fn recommend_by_genre(&self, genre: &str, limit: usize) -> GenreRecommendations {
        let wanted = normalize_query(genre);

        let results: Vec<GenreMatch> = self
            .corpus
            .movies()
            .iter()
            .zip(&self.genre_tokens)
            .filter(|(_, tokens)| tokens.contains(&wanted))
            .take(limit)
            .map(|(movie, _)| GenreMatch {
                title: movie.title.clone(),
                score: round2(movie.score),
            })
            .collect();

        tracing::debug!(genre, results = results.len(), "Genre recommendations");

        if results.is_empty() {
            GenreRecommendations::NoResult {
                genre: genre.to_string(),
            }
        } else {
            GenreRecommendations::Matches {
                genre: wanted,
                results,
            }
        }
    }
}

/// Rounds to two decimals from the exact binary value, ties to even
fn round2(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}
