//! Text normalization ahead of vectorization
//!
//! The pipeline order is fixed: lowercase, strip ASCII punctuation, strip
//! digits, collapse whitespace, split, drop stopwords, stem, join. The
//! vectorizer artifacts were fitted on text produced in exactly this order.

use crate::error::{ClassifierError, Result};
use crate::processing::stemmer::{Language, SnowballStemmer, Stem};
use crate::processing::stopwords::StopwordSet;
use log::debug;
use regex::Regex;
use std::fmt;
use std::path::Path;

pub struct TextNormalizer {
    stopwords: StopwordSet,
    stemmer: Box<dyn Stem>,
    punctuation_regex: Regex,
    digit_regex: Regex,
    whitespace_regex: Regex,
}

impl TextNormalizer {
    pub fn new(stopwords: StopwordSet, stemmer: Box<dyn Stem>) -> Result<Self> {
        Ok(Self {
            stopwords,
            stemmer,
            punctuation_regex: compile(r"[[:punct:]]")?,
            digit_regex: compile(r"\d+")?,
            whitespace_regex: compile(r"\s+")?,
        })
    }

    /// Build the language resources: the Snowball stemmer and either the
    /// built-in stopword list or the one at `stopwords_path`.
    pub fn for_language(language: Language, stopwords_path: Option<&Path>) -> Result<Self> {
        let stopwords = match stopwords_path {
            Some(path) => StopwordSet::from_file(path)?,
            None => StopwordSet::builtin(language),
        };
        debug!(
            "Initializing {} normalizer with {} stopwords",
            language,
            stopwords.len()
        );

        Self::new(stopwords, Box::new(SnowballStemmer::new(language)))
    }

    /// Reduce raw text to space-joined stems
    pub fn normalize(&self, text: &str) -> String {
        self.tokens(text).join(" ")
    }

    /// Same as [`normalize`](Self::normalize), with a missing value mapped to
    /// an empty result
    pub fn normalize_opt(&self, text: Option<&str>) -> String {
        text.map(|t| self.normalize(t)).unwrap_or_default()
    }

    /// Stems surviving stopword removal, in input order
    pub fn tokens(&self, text: &str) -> Vec<String> {
        self.clean(text)
            .split_whitespace()
            .filter(|token| !self.stopwords.contains(token))
            .map(|token| self.stemmer.stem(token).into_owned())
            .filter(|stem| !stem.is_empty())
            .collect()
    }

    /// Lowercase and strip punctuation, digits and redundant whitespace,
    /// without touching stopwords or stems
    pub fn clean(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        let cleaned = self.punctuation_regex.replace_all(&lowered, "");
        let cleaned = self.digit_regex.replace_all(&cleaned, "");
        self.whitespace_regex
            .replace_all(&cleaned, " ")
            .trim()
            .to_string()
    }

    pub fn stopwords(&self) -> &StopwordSet {
        &self.stopwords
    }
}

impl fmt::Debug for TextNormalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextNormalizer")
            .field("stopwords", &self.stopwords.len())
            .finish_non_exhaustive()
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| {
        ClassifierError::Configuration(format!("Invalid normalization pattern '{}': {}", pattern, e))
    })
}
