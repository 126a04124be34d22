//! Weighted rating (Bayesian shrinkage toward the corpus mean).

use crate::models::Corpus;

/// Corpus-wide constants of the weighted rating
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingPrior {
    /// Mean `vote_average` across the corpus
    pub mean_vote: f64,
    /// Minimum votes threshold (`vote_count` quantile)
    pub min_votes: f64,
}

impl RatingPrior {
    pub fn from_corpus(corpus: &Corpus, quantile: f64) -> Self {
        let movies = corpus.movies();
        let mean_vote = if movies.is_empty() {
            0.0
        } else {
            movies.iter().map(|m| m.vote_average).sum::<f64>() / movies.len() as f64
        };
        let counts: Vec<f64> = movies.iter().map(|m| m.vote_count as f64).collect();

        Self {
            mean_vote,
            min_votes: quantile_of(counts, quantile),
        }
    }

    /// `v/(v+m)·r + m/(v+m)·C`, or `C` when `v + m == 0`
    pub fn weighted_rating(&self, vote_count: u64, vote_average: f64) -> f64 {
        let v = vote_count as f64;
        let m = self.min_votes;
        if v + m == 0.0 {
            return self.mean_vote;
        }
        (v / (v + m)) * vote_average + (m / (v + m)) * self.mean_vote
    }
}

/// Linearly interpolated quantile; 0 for an empty sample
pub fn quantile_of(mut values: Vec<f64>, q: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.sort_by(|a, b| a.total_cmp(b));

    let position = q.clamp(0.0, 1.0) * (values.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    values[lower] + (values[upper] - values[lower]) * fraction
}

/// Fills in `score` for every movie and returns the scored corpus
pub fn score_all(mut corpus: Corpus, quantile: f64) -> (Corpus, RatingPrior) {
    let prior = RatingPrior::from_corpus(&corpus, quantile);
    for movie in corpus.movies_mut() {
        movie.score = prior.weighted_rating(movie.vote_count, movie.vote_average);
    }

    tracing::info!(
        mean_vote = prior.mean_vote,
        min_votes = prior.min_votes,
        "Weighted ratings computed"
    );

    (corpus, prior)
}
