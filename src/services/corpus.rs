//! Corpus loading from the dataset export
//!
//! CSV is the TMDB layout (`tmdb_5000_movies.csv`); JSON is an array of records
//! whose `genres` may already be a native list.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::models::{Corpus, GenreField, Movie};

/// Columns every source must provide
pub const REQUIRED_COLUMNS: [&str; 5] = ["title", "overview", "vote_average", "vote_count", "genres"];

#[derive(Debug, Deserialize)]
struct CsvRow {
    title: String,
    overview: Option<String>,
    vote_average: f64,
    vote_count: u64,
    genres: Option<String>,
}

#[derive(Debug, Deserialize)]
struct JsonRecord {
    title: String,
    overview: Option<String>,
    vote_average: f64,
    vote_count: u64,
    genres: GenreField,
}

/// Loads the corpus from a `.csv` or `.json` file
pub fn load(path: impl AsRef<Path>) -> AppResult<Corpus> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let file = File::open(path).map_err(|e| {
        AppError::DataSource(format!("cannot open {}: {}", path.display(), e))
    })?;
    let reader = BufReader::new(file);

    let corpus = match extension.as_deref() {
        Some("csv") => from_csv_reader(reader)?,
        Some("json") => from_json_reader(reader)?,
        _ => {
            return Err(AppError::DataSource(format!(
                "unsupported dataset format: {}",
                path.display()
            )))
        }
    };

    tracing::info!(path = %path.display(), movies = corpus.len(), "Corpus loaded");
    Ok(corpus)
}

/// Reads a CSV export with a header row
pub fn from_csv_reader<R: Read>(reader: R) -> AppResult<Corpus> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|column| !headers.iter().any(|h| h == *column))
        .collect();
    if !missing.is_empty() {
        return Err(AppError::DataSource(format!(
            "missing required columns: {}",
            missing.join(", ")
        )));
    }

    let mut movies = Vec::new();
    for (row, result) in reader.deserialize::<CsvRow>().enumerate() {
        let record = result.map_err(|e| {
            AppError::DataSource(format!("malformed row {}: {}", row + 1, e))
        })?;
        let genres = record.genres.filter(|g| !g.is_empty());
        movies.push(Movie::new(
            row,
            record.title,
            record.overview.unwrap_or_default(),
            record.vote_average,
            record.vote_count,
            GenreField::from(genres),
        ));
    }

    Ok(Corpus::new(movies))
}

/// Reads a JSON array of movie records
pub fn from_json_reader<R: Read>(reader: R) -> AppResult<Corpus> {
    let records: Vec<JsonRecord> = serde_json::from_reader(reader)
        .map_err(|e| AppError::DataSource(format!("invalid JSON dataset: {}", e)))?;

    let movies = records
        .into_iter()
        .enumerate()
        .map(|(row, record)| {
            Movie::new(
                row,
                record.title,
                record.overview.unwrap_or_default(),
                record.vote_average,
                record.vote_count,
                record.genres,
            )
        })
        .collect();

    Ok(Corpus::new(movies))
}
