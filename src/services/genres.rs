//! Genre normalization
//!
//! Turns a [`GenreField`] of any encoding into a canonical token set. Decoding
//! never fails: each rule that cannot be applied falls through to a more
//! permissive one.

use std::collections::BTreeSet;

use serde_json::Value;

use crate::models::{Corpus, GenreField};
use crate::services::literal::parse_literal;

/// Result of the single decode step over a genre field
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedGenres {
    /// Entries of a native or parsed sequence
    Entries(Vec<Value>),
    /// Words of a string that is not a literal sequence
    Words(Vec<String>),
    /// Stringified scalar or non-sequence literal
    Single(String),
}

/// Decodes a raw genre field using the fixed fallback order
pub fn decode(field: &GenreField) -> DecodedGenres {
    match field {
        GenreField::Sequence(entries) => DecodedGenres::Entries(entries.clone()),
        GenreField::Text(text) => match parse_literal(text) {
            Ok(Value::Array(entries)) => DecodedGenres::Entries(entries),
            Ok(value) => DecodedGenres::Single(stringify(&value)),
            Err(_) => DecodedGenres::Words(text.split_whitespace().map(str::to_string).collect()),
        },
        GenreField::Scalar(value) => DecodedGenres::Single(stringify(value)),
    }
}

impl DecodedGenres {
    /// Trimmed names in their original case, empties dropped
    pub fn names(&self) -> Vec<String> {
        let raw: Vec<String> = match self {
            DecodedGenres::Entries(entries) => entries.iter().map(entry_name).collect(),
            DecodedGenres::Words(words) => words.clone(),
            DecodedGenres::Single(value) => vec![value.clone()],
        };

        raw.into_iter()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect()
    }
}

/// `name` of a mapping entry, or the stringified entry
fn entry_name(entry: &Value) -> String {
    match entry.get("name") {
        Some(name) => stringify(name),
        None => stringify(entry),
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Lowercased token set used for matching
pub fn normalize_genres(field: &GenreField) -> BTreeSet<String> {
    decode(field)
        .names()
        .into_iter()
        .map(|name| name.to_lowercase())
        .collect()
}

/// Original-case token set used for display
pub fn normalize_genres_display(field: &GenreField) -> BTreeSet<String> {
    decode(field).names().into_iter().collect()
}

/// Canonical form of a genre query term
pub fn normalize_query(genre: &str) -> String {
    genre.trim().to_lowercase()
}

/// Sorted union of display genres across all non-null genre fields
pub fn build_vocabulary(corpus: &Corpus) -> Vec<String> {
    let vocabulary: BTreeSet<String> = corpus
        .movies()
        .iter()
        .filter(|movie| !movie.genres.is_null())
        .flat_map(|movie| normalize_genres_display(&movie.genres))
        .collect();

    tracing::info!(genres = vocabulary.len(), "Genre vocabulary built");

    vocabulary.into_iter().collect()
}
