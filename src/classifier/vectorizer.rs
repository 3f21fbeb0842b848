//! Pre-trained text vectorizers

use crate::error::{ClassifierError, Result};
use anyhow::bail;
use log::info;
use ndarray::Array2;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Dense feature matrix, one row per document
pub type FeatureMatrix = Array2<f64>;

/// Converts normalized documents into feature rows.
pub trait Vectorizer: Send + Sync {
    fn transform(&self, documents: &[String]) -> anyhow::Result<FeatureMatrix>;

    /// Width of the rows produced by [`transform`](Self::transform)
    fn n_features(&self) -> usize;
}

const DEFAULT_TOKEN_PATTERN: &str = r"\b\w\w+\b";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

/// On-disk layout of a fitted TF-IDF (or plain count) vectorizer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorizerArtifact {
    pub vocabulary: HashMap<String, usize>,
    #[serde(default)]
    pub idf: Option<Vec<f64>>,
    #[serde(default)]
    pub norm: Option<Norm>,
    #[serde(default)]
    pub sublinear_tf: bool,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    #[serde(default = "default_token_pattern")]
    pub token_pattern: String,
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_token_pattern() -> String {
    DEFAULT_TOKEN_PATTERN.to_string()
}

/// Bag-of-n-grams vectorizer with optional IDF weighting and row norm
#[derive(Debug)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Option<Vec<f64>>,
    norm: Option<Norm>,
    sublinear_tf: bool,
    ngram_range: (usize, usize),
    token_regex: Regex,
    n_features: usize,
}

impl TfidfVectorizer {
    pub fn from_artifact(artifact: VectorizerArtifact) -> anyhow::Result<Self> {
        let VectorizerArtifact {
            vocabulary,
            idf,
            norm,
            sublinear_tf,
            ngram_range,
            token_pattern,
        } = artifact;

        if vocabulary.is_empty() {
            bail!("vocabulary is empty");
        }

        let (min_n, max_n) = ngram_range;
        if min_n == 0 || min_n > max_n {
            bail!("invalid ngram_range ({}, {})", min_n, max_n);
        }

        let n_features = vocabulary.values().max().map_or(0, |max| max + 1);
        if n_features != vocabulary.len() {
            bail!(
                "vocabulary columns are not contiguous: {} terms, highest column {}",
                vocabulary.len(),
                n_features - 1
            );
        }

        let columns: HashSet<usize> = vocabulary.values().copied().collect();
        if columns.len() != vocabulary.len() {
            bail!(
                "vocabulary maps {} terms onto {} distinct columns",
                vocabulary.len(),
                columns.len()
            );
        }

        if let Some(weights) = &idf {
            if weights.len() != n_features {
                bail!(
                    "idf has {} weights but vocabulary has {} terms",
                    weights.len(),
                    n_features
                );
            }
        }

        let token_regex = Regex::new(&token_pattern)?;

        Ok(Self {
            vocabulary,
            idf,
            norm,
            sublinear_tf,
            ngram_range,
            token_regex,
            n_features,
        })
    }

    /// Load a vectorizer artifact from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ClassifierError::load_failure("vectorizer", path, e))?;
        let artifact: VectorizerArtifact = serde_json::from_str(&content)
            .map_err(|e| ClassifierError::load_failure("vectorizer", path, e))?;
        let vectorizer = Self::from_artifact(artifact)
            .map_err(|e| ClassifierError::load_failure("vectorizer", path, e))?;

        info!(
            "Loaded vectorizer from {} ({} features, idf: {})",
            path.display(),
            vectorizer.n_features,
            vectorizer.idf.is_some()
        );
        Ok(vectorizer)
    }

    pub fn uses_idf(&self) -> bool {
        self.idf.is_some()
    }

    fn analyze<'a>(&self, document: &'a str) -> Vec<String> {
        let tokens: Vec<&'a str> = self
            .token_regex
            .find_iter(document)
            .map(|m| m.as_str())
            .collect();

        let (min_n, max_n) = self.ngram_range;
        let mut terms = Vec::new();
        for n in min_n..=max_n {
            for window in tokens.windows(n) {
                terms.push(window.join(" "));
            }
        }
        terms
    }

    fn fill_row(&self, document: &str, row: &mut [f64]) {
        for term in self.analyze(&document.to_lowercase()) {
            if let Some(&column) = self.vocabulary.get(&term) {
                row[column] += 1.0;
            }
        }

        if self.sublinear_tf {
            for value in row.iter_mut().filter(|v| **v > 0.0) {
                *value = 1.0 + value.ln();
            }
        }

        if let Some(idf) = &self.idf {
            for (value, weight) in row.iter_mut().zip(idf) {
                *value *= weight;
            }
        }

        let norm = match self.norm {
            Some(Norm::L2) => row.iter().map(|v| v * v).sum::<f64>().sqrt(),
            Some(Norm::L1) => row.iter().map(|v| v.abs()).sum::<f64>(),
            None => 1.0,
        };
        if norm > 0.0 && norm != 1.0 {
            for value in row.iter_mut() {
                *value /= norm;
            }
        }
    }
}

impl Vectorizer for TfidfVectorizer {
    fn transform(&self, documents: &[String]) -> anyhow::Result<FeatureMatrix> {
        let mut matrix = FeatureMatrix::zeros((documents.len(), self.n_features));

        for (document, mut row) in documents.iter().zip(matrix.rows_mut()) {
            match row.as_slice_mut() {
                Some(slice) => self.fill_row(document, slice),
                None => bail!("feature row is not contiguous"),
            }
        }

        Ok(matrix)
    }

    fn n_features(&self) -> usize {
        self.n_features
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn artifact(terms: &[&str]) -> VectorizerArtifact {
        VectorizerArtifact {
            vocabulary: terms
                .iter()
                .enumerate()
                .map(|(i, t)| (t.to_string(), i))
                .collect(),
            idf: None,
            norm: None,
            sublinear_tf: false,
            ngram_range: (1, 1),
            token_pattern: DEFAULT_TOKEN_PATTERN.to_string(),
        }
    }

    #[test]
    fn test_counts_without_idf() {
        let vectorizer = TfidfVectorizer::from_artifact(artifact(&["учител", "школ"])).unwrap();
        let matrix = vectorizer
            .transform(&["учител школ учител код".to_string()])
            .unwrap();

        assert_eq!(matrix.shape(), &[1, 2]);
        assert_relative_eq!(matrix[[0, 0]], 2.0);
        assert_relative_eq!(matrix[[0, 1]], 1.0);
    }

    #[test]
    fn test_l2_normalized_rows() {
        let mut spec = artifact(&["учител", "школ", "урок"]);
        spec.idf = Some(vec![1.0, 2.0, 1.0]);
        spec.norm = Some(Norm::L2);
        let vectorizer = TfidfVectorizer::from_artifact(spec).unwrap();

        let matrix = vectorizer.transform(&["учител школ".to_string()]).unwrap();
        let row = matrix.row(0);

        assert_relative_eq!(row.dot(&row), 1.0, epsilon = 1e-12);
        assert_relative_eq!(row[1] / row[0], 2.0, epsilon = 1e-12);
        assert_relative_eq!(row[2], 0.0);
    }

    #[test]
    fn test_empty_document_gives_zero_row() {
        let mut spec = artifact(&["учител"]);
        spec.norm = Some(Norm::L2);
        let vectorizer = TfidfVectorizer::from_artifact(spec).unwrap();

        let matrix = vectorizer.transform(&[String::new()]).unwrap();

        assert_eq!(matrix.shape(), &[1, 1]);
        assert_relative_eq!(matrix[[0, 0]], 0.0);
    }

    #[test]
    fn test_single_letter_tokens_are_ignored() {
        let vectorizer = TfidfVectorizer::from_artifact(artifact(&["б", "класс"])).unwrap();
        let matrix = vectorizer.transform(&["б класс".to_string()]).unwrap();

        assert_relative_eq!(matrix[[0, 0]], 0.0);
        assert_relative_eq!(matrix[[0, 1]], 1.0);
    }

    #[test]
    fn test_bigrams() {
        let mut spec = artifact(&["учител", "начальн класс", "класс"]);
        spec.ngram_range = (1, 2);
        let vectorizer = TfidfVectorizer::from_artifact(spec).unwrap();

        let matrix = vectorizer
            .transform(&["учител начальн класс".to_string()])
            .unwrap();

        assert_relative_eq!(matrix[[0, 0]], 1.0);
        assert_relative_eq!(matrix[[0, 1]], 1.0);
        assert_relative_eq!(matrix[[0, 2]], 1.0);
    }

    #[test]
    fn test_sublinear_tf() {
        let mut spec = artifact(&["урок"]);
        spec.sublinear_tf = true;
        let vectorizer = TfidfVectorizer::from_artifact(spec).unwrap();

        let matrix = vectorizer.transform(&["урок урок урок".to_string()]).unwrap();

        assert_relative_eq!(matrix[[0, 0]], 1.0 + 3.0_f64.ln(), epsilon = 1e-12);
    }

    #[test]
    fn test_rejects_idf_length_mismatch() {
        let mut spec = artifact(&["учител", "школ"]);
        spec.idf = Some(vec![1.0]);

        assert!(TfidfVectorizer::from_artifact(spec).is_err());
    }

    #[test]
    fn test_rejects_gaps_in_vocabulary() {
        let mut spec = artifact(&["учител"]);
        spec.vocabulary.insert("школ".to_string(), 5);

        assert!(TfidfVectorizer::from_artifact(spec).is_err());
    }

    #[test]
    fn test_rejects_duplicate_columns() {
        let json = r#"{"vocabulary": {"школ": 0, "урок": 0, "учител": 2}}"#;
        let spec: VectorizerArtifact = serde_json::from_str(json).unwrap();

        assert!(TfidfVectorizer::from_artifact(spec).is_err());
    }

    #[test]
    fn test_rejects_bad_ngram_range() {
        let mut spec = artifact(&["учител"]);
        spec.ngram_range = (2, 1);

        assert!(TfidfVectorizer::from_artifact(spec).is_err());
    }

    #[test]
    fn test_parse_minimal_json() {
        let json = r#"{"vocabulary": {"школ": 0, "урок": 1}, "idf": [1.5, 1.2], "norm": "l2"}"#;
        let spec: VectorizerArtifact = serde_json::from_str(json).unwrap();
        let vectorizer = TfidfVectorizer::from_artifact(spec).unwrap();

        assert_eq!(vectorizer.n_features(), 2);
        assert!(vectorizer.uses_idf());
    }

    #[test]
    fn test_missing_file_is_load_failure() {
        let result = TfidfVectorizer::load(Path::new("does/not/exist.json"));

        assert!(matches!(result, Err(ClassifierError::LoadFailure { .. })));
    }
}
