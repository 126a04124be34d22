//! TF-IDF vector space over plot summaries and the pairwise cosine matrix.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::time::Instant;

use crate::models::Corpus;
use crate::services::stopwords::is_stop_word;

/// Sparse document vector: (term id, weight), sorted by term id
type SparseVector = Vec<(usize, f64)>;

/// Lowercases and splits text into runs of two or more word characters,
/// dropping English stop words
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| token.chars().count() >= 2)
        .filter(|token| !is_stop_word(token))
        .map(str::to_string)
        .collect()
}

/// Fitted TF-IDF model: vocabulary and smoothed inverse document frequencies
#[derive(Debug, Clone, Default)]
pub struct TfidfModel {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfModel {
    /// Fits the model on the given documents
    ///
    /// `idf(t) = ln((1 + n) / (1 + df(t))) + 1`
    pub fn fit(documents: &[Vec<String>]) -> Self {
        let mut document_frequency: BTreeMap<&str, usize> = BTreeMap::new();
        for tokens in documents {
            let mut seen: Vec<&str> = tokens.iter().map(String::as_str).collect();
            seen.sort_unstable();
            seen.dedup();
            for term in seen {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        let n = documents.len() as f64;
        let mut vocabulary = HashMap::with_capacity(document_frequency.len());
        let mut idf = Vec::with_capacity(document_frequency.len());
        for (id, (term, df)) in document_frequency.into_iter().enumerate() {
            vocabulary.insert(term.to_string(), id);
            idf.push(((1.0 + n) / (1.0 + df as f64)).ln() + 1.0);
        }

        Self { vocabulary, idf }
    }

    pub fn vocabulary_size(&self) -> usize {
        self.idf.len()
    }

    /// L2-normalized TF-IDF vector; all-zero (empty) when no term is known
    fn transform(&self, tokens: &[String]) -> SparseVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for token in tokens {
            if let Some(&id) = self.vocabulary.get(token) {
                *counts.entry(id).or_insert(0.0) += 1.0;
            }
        }

        let mut vector: SparseVector = counts
            .into_iter()
            .map(|(id, tf)| (id, tf * self.idf[id]))
            .collect();

        let norm = vector.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, weight) in vector.iter_mut() {
                *weight /= norm;
            }
        }
        vector
    }
}

/// Dot product of two sorted sparse vectors
fn dot(a: &[(usize, f64)], b: &[(usize, f64)]) -> f64 {
    let (mut i, mut j) = (0, 0);
    let mut sum = 0.0;
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                sum += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }
    sum
}

/// Square, symmetric cosine-similarity matrix over the corpus
#[derive(Debug, Clone, Default)]
pub struct SimilarityMatrix {
    size: usize,
    values: Vec<f64>,
}

impl SimilarityMatrix {
    /// Builds the TF-IDF space over every overview and fills all pairs
    pub fn build(corpus: &Corpus) -> Self {
        let start = Instant::now();

        let documents: Vec<Vec<String>> = corpus
            .movies()
            .iter()
            .map(|movie| tokenize(&movie.overview))
            .collect();
        let model = TfidfModel::fit(&documents);
        let vectors: Vec<SparseVector> = documents.iter().map(|d| model.transform(d)).collect();

        let size = vectors.len();
        let mut values = vec![0.0; size * size];
        for i in 0..size {
            // Normalized vectors have self-similarity exactly 1; zero vectors 0
            values[i * size + i] = if vectors[i].is_empty() { 0.0 } else { 1.0 };
            for j in (i + 1)..size {
                let similarity = dot(&vectors[i], &vectors[j]).clamp(0.0, 1.0);
                values[i * size + j] = similarity;
                values[j * size + i] = similarity;
            }
        }

        tracing::info!(
            movies = size,
            terms = model.vocabulary_size(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Similarity index built"
        );

        Self { size, values }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Similarity between two movies, `None` when either index is out of range
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        (i < self.size && j < self.size).then(|| self.values[i * self.size + j])
    }

    pub fn row(&self, i: usize) -> Option<&[f64]> {
        (i < self.size).then(|| &self.values[i * self.size..(i + 1) * self.size])
    }

    /// The `k` most similar other movies, most similar first
    ///
    /// Equal similarities keep corpus order (lower index first).
    pub fn neighbors(&self, movie_index: usize, k: usize) -> Vec<usize> {
        let Some(row) = self.row(movie_index) else {
            return Vec::new();
        };

        let mut ranked: Vec<(usize, f64)> = row.iter().copied().enumerate().collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

        ranked
            .into_iter()
            .map(|(index, _)| index)
            .filter(|&index| index != movie_index)
            .take(k)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GenreField, Movie};

    fn corpus(overviews: &[&str]) -> Corpus {
        Corpus::new(
            overviews
                .iter()
                .enumerate()
                .map(|(i, o)| Movie::new(i, format!("Movie {}", i), *o, 5.0, 10, GenreField::default()))
                .collect(),
        )
    }

    #[test]
    fn test_tokenize_drops_stop_words_and_short_tokens() {
        assert_eq!(
            tokenize("A robot falls in love, doesn't it? X-Men 2"),
            vec!["robot", "falls", "love", "doesn", "men"]
        );
    }

    #[test]
    fn test_idf_is_smoothed() {
        let docs = vec![
            vec!["robot".to_string(), "aliens".to_string()],
            vec!["robot".to_string()],
        ];
        let model = TfidfModel::fit(&docs);
        let robot = model.idf[model.vocabulary["robot"]];
        let aliens = model.idf[model.vocabulary["aliens"]];
        assert!((robot - 1.0).abs() < 1e-12);
        assert!((aliens - ((3.0f64 / 2.0).ln() + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_matrix_is_symmetric_with_unit_diagonal() {
        let matrix = SimilarityMatrix::build(&corpus(&[
            "a robot fights aliens",
            "a robot falls in love",
            "aliens invade earth",
            "",
        ]));

        assert_eq!(matrix.size(), 4);
        for i in 0..4 {
            for j in 0..4 {
                let s = matrix.get(i, j).unwrap();
                assert_eq!(s, matrix.get(j, i).unwrap());
                assert!((0.0..=1.0).contains(&s));
            }
        }
        assert_eq!(matrix.get(0, 0), Some(1.0));
        assert_eq!(matrix.get(3, 3), Some(0.0));
        assert_eq!(matrix.get(3, 0), Some(0.0));
        assert_eq!(matrix.get(4, 0), None);
    }

    #[test]
    fn test_stop_word_only_overview_is_zero_vector() {
        let matrix = SimilarityMatrix::build(&corpus(&["the and of", "robot"]));
        assert_eq!(matrix.get(0, 0), Some(0.0));
        assert_eq!(matrix.get(1, 1), Some(1.0));
    }

    #[test]
    fn test_neighbors_order_by_similarity() {
        let matrix = SimilarityMatrix::build(&corpus(&[
            "robot aliens",
            "cooking show",
            "robot aliens invasion",
            "robot",
        ]));
        assert_eq!(matrix.neighbors(0, 5), vec![2, 3, 1]);
    }

    #[test]
    fn test_neighbors_ties_keep_corpus_order() {
        let matrix = SimilarityMatrix::build(&corpus(&["robot", "cooking", "gardening", ""]));
        assert_eq!(matrix.neighbors(0, 5), vec![1, 2, 3]);
        assert_eq!(matrix.neighbors(3, 2), vec![0, 1]);
    }

    #[test]
    fn test_neighbors_excludes_self_even_with_duplicate_overview() {
        let matrix = SimilarityMatrix::build(&corpus(&[
            "space pirates",
            "space pirates",
            "cooking show",
        ]));
        assert!(matrix.get(0, 1).unwrap() > 0.999);
        assert_eq!(matrix.neighbors(1, 5), vec![0, 2]);
        assert_eq!(matrix.neighbors(0, 1), vec![1]);
    }

    #[test]
    fn test_neighbors_out_of_range_is_empty() {
        let matrix = SimilarityMatrix::build(&corpus(&["robot"]));
        assert!(matrix.neighbors(0, 5).is_empty());
        assert!(matrix.neighbors(9, 5).is_empty());
    }
}
