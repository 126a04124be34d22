pub mod corpus;
pub mod genres;
pub mod literal;
pub mod recommendations;
pub mod scoring;
pub mod similarity;
pub mod stopwords;

pub use recommendations::{EngineSettings, Recommender};
