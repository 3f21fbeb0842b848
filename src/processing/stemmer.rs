//! Stemming of normalized tokens

use rust_stemmers::{Algorithm, Stemmer};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Languages with stemming and stopword resources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Russian,
}

impl Language {
    fn algorithm(self) -> Algorithm {
        match self {
            Language::Russian => Algorithm::Russian,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::Russian => write!(f, "russian"),
        }
    }
}

/// Deterministic token → stem mapping.
pub trait Stem: Send + Sync {
    fn stem<'a>(&self, token: &'a str) -> Cow<'a, str>;
}

/// Snowball stemmer for a single language
pub struct SnowballStemmer {
    inner: Stemmer,
    language: Language,
}

impl SnowballStemmer {
    pub fn new(language: Language) -> Self {
        Self {
            inner: Stemmer::create(language.algorithm()),
            language,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }
}

impl Stem for SnowballStemmer {
    fn stem<'a>(&self, token: &'a str) -> Cow<'a, str> {
        self.inner.stem(token)
    }
}

impl fmt::Debug for SnowballStemmer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnowballStemmer")
            .field("language", &self.language)
            .finish()
    }
}
