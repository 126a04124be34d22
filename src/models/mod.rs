pub mod movie;
pub mod recommendation;

pub use movie::{Corpus, GenreField, Movie};
pub use recommendation::{GenreMatch, GenreRecommendations};
