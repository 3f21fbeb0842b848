//! Text normalization and language resources

pub mod normalizer;
pub mod stemmer;
pub mod stopwords;

pub use normalizer::TextNormalizer;
pub use stemmer::{Language, SnowballStemmer, Stem};
pub use stopwords::StopwordSet;
