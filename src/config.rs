use serde::Deserialize;

use crate::services::EngineSettings;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Path to the movie dataset (`.csv` or `.json`)
    #[serde(default = "default_dataset_path")]
    pub dataset_path: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of neighbours returned by title recommendations
    #[serde(default = "default_neighbor_count")]
    pub neighbor_count: usize,

    /// Default number of movies returned by genre recommendations
    #[serde(default = "default_genre_limit")]
    pub genre_limit: usize,

    /// Vote-count quantile used as the minimum-votes threshold
    #[serde(default = "default_vote_quantile")]
    pub vote_quantile: f64,
}

fn default_dataset_path() -> String {
    "tmdb_5000_movies.csv".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_neighbor_count() -> usize {
    5
}

fn default_genre_limit() -> usize {
    3
}

fn default_vote_quantile() -> f64 {
    0.90
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

        if !(0.0..=1.0).contains(&config.vote_quantile) {
            anyhow::bail!("VOTE_QUANTILE must be within [0, 1], got {}", config.vote_quantile);
        }

        Ok(config)
    }

    /// Engine parameters derived from this configuration
    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            neighbor_count: self.neighbor_count,
            vote_quantile: self.vote_quantile,
        }
    }
}
