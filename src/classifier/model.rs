//! Pre-trained binary probability models

use crate::classifier::vectorizer::FeatureMatrix;
use crate::error::{ClassifierError, Result};
use anyhow::{bail, ensure};
use log::info;
use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Column of the positive (teacher) class in `predict_proba` output
pub const POSITIVE_CLASS: usize = 1;

/// Produces per-class probabilities for feature rows.
///
/// The returned matrix has one row per input row and one column per class,
/// ordered (negative, positive).
pub trait ProbabilityModel: Send + Sync {
    fn predict_proba(&self, features: &FeatureMatrix) -> anyhow::Result<Array2<f64>>;

    /// Expected feature width, when the model knows it
    fn n_features(&self) -> Option<usize> {
        None
    }

    fn kind(&self) -> ModelKind;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    LogisticRegression,
    MultinomialNb,
    Custom,
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModelKind::LogisticRegression => "logistic regression",
            ModelKind::MultinomialNb => "multinomial naive Bayes",
            ModelKind::Custom => "custom",
        };
        write!(f, "{}", name)
    }
}

/// On-disk layout of a fitted model, tagged by `kind`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    LogisticRegression {
        coef: Vec<f64>,
        intercept: f64,
    },
    MultinomialNb {
        class_log_prior: Vec<f64>,
        feature_log_prob: Vec<Vec<f64>>,
    },
}

/// Binary linear model: `p(teacher) = sigmoid(x · coef + intercept)`
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    coef: Array1<f64>,
    intercept: f64,
}

impl LogisticRegression {
    pub fn new(coef: Vec<f64>, intercept: f64) -> anyhow::Result<Self> {
        ensure!(!coef.is_empty(), "logistic regression has no coefficients");
        ensure!(
            coef.iter().all(|c| c.is_finite()) && intercept.is_finite(),
            "logistic regression has non-finite parameters"
        );

        Ok(Self {
            coef: Array1::from(coef),
            intercept,
        })
    }
}

impl ProbabilityModel for LogisticRegression {
    fn predict_proba(&self, features: &FeatureMatrix) -> anyhow::Result<Array2<f64>> {
        check_width(features, self.coef.len())?;

        let positive = (features.dot(&self.coef) + self.intercept).mapv(sigmoid);
        let mut proba = Array2::zeros((features.nrows(), 2));
        for (mut row, p) in proba.rows_mut().into_iter().zip(positive.iter()) {
            row[0] = 1.0 - p;
            row[POSITIVE_CLASS] = *p;
        }
        Ok(proba)
    }

    fn n_features(&self) -> Option<usize> {
        Some(self.coef.len())
    }

    fn kind(&self) -> ModelKind {
        ModelKind::LogisticRegression
    }
}

/// Binary multinomial naive Bayes over (weighted) term counts
#[derive(Debug, Clone)]
pub struct MultinomialNb {
    class_log_prior: Array1<f64>,
    feature_log_prob: Array2<f64>,
}

impl MultinomialNb {
    pub fn new(class_log_prior: Vec<f64>, feature_log_prob: Vec<Vec<f64>>) -> anyhow::Result<Self> {
        ensure!(
            class_log_prior.len() == 2 && feature_log_prob.len() == 2,
            "naive Bayes model must have exactly two classes"
        );

        let width = feature_log_prob[0].len();
        ensure!(width > 0, "naive Bayes model has no features");
        ensure!(
            feature_log_prob[1].len() == width,
            "naive Bayes feature tables differ in width: {} vs {}",
            width,
            feature_log_prob[1].len()
        );

        let flat: Vec<f64> = feature_log_prob.into_iter().flatten().collect();
        let feature_log_prob = Array2::from_shape_vec((2, width), flat)?;

        Ok(Self {
            class_log_prior: Array1::from(class_log_prior),
            feature_log_prob,
        })
    }
}

impl ProbabilityModel for MultinomialNb {
    fn predict_proba(&self, features: &FeatureMatrix) -> anyhow::Result<Array2<f64>> {
        check_width(features, self.feature_log_prob.ncols())?;

        // joint log likelihood, one column per class
        let mut jll = features.dot(&self.feature_log_prob.t());
        for mut row in jll.rows_mut() {
            row += &self.class_log_prior;
        }

        for mut row in jll.axis_iter_mut(Axis(0)) {
            let max = row.fold(f64::NEG_INFINITY, |acc, &v| acc.max(v));
            let log_norm = max + row.mapv(|v| (v - max).exp()).sum().ln();
            row.mapv_inplace(|v| (v - log_norm).exp());
        }
        Ok(jll)
    }

    fn n_features(&self) -> Option<usize> {
        Some(self.feature_log_prob.ncols())
    }

    fn kind(&self) -> ModelKind {
        ModelKind::MultinomialNb
    }
}

/// Load a model artifact from a JSON file
pub fn load_model(path: &Path) -> Result<Box<dyn ProbabilityModel>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| ClassifierError::load_failure("model", path, e))?;
    let artifact: ModelArtifact = serde_json::from_str(&content)
        .map_err(|e| ClassifierError::load_failure("model", path, e))?;

    let model: Box<dyn ProbabilityModel> = match artifact {
        ModelArtifact::LogisticRegression { coef, intercept } => Box::new(
            LogisticRegression::new(coef, intercept)
                .map_err(|e| ClassifierError::load_failure("model", path, e))?,
        ),
        ModelArtifact::MultinomialNb {
            class_log_prior,
            feature_log_prob,
        } => Box::new(
            MultinomialNb::new(class_log_prior, feature_log_prob)
                .map_err(|e| ClassifierError::load_failure("model", path, e))?,
        ),
    };

    info!(
        "Loaded {} model from {} ({} features)",
        model.kind(),
        path.display(),
        model.n_features().unwrap_or(0)
    );
    Ok(model)
}

fn check_width(features: &FeatureMatrix, expected: usize) -> anyhow::Result<()> {
    if features.ncols() != expected {
        bail!(
            "feature width mismatch: model expects {} columns, got {}",
            expected,
            features.ncols()
        );
    }
    Ok(())
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_logistic_zero_input_gives_half() {
        let model = LogisticRegression::new(vec![2.0, -1.0], 0.0).unwrap();
        let proba = model.predict_proba(&array![[0.0, 0.0]]).unwrap();

        assert_relative_eq!(proba[[0, 0]], 0.5);
        assert_relative_eq!(proba[[0, POSITIVE_CLASS]], 0.5);
    }

    #[test]
    fn test_logistic_direction() {
        let model = LogisticRegression::new(vec![3.0, -3.0], 0.0).unwrap();
        let proba = model
            .predict_proba(&array![[1.0, 0.0], [0.0, 1.0]])
            .unwrap();

        assert!(proba[[0, POSITIVE_CLASS]] > 0.9);
        assert!(proba[[1, POSITIVE_CLASS]] < 0.1);
        for row in proba.rows() {
            assert_relative_eq!(row.sum(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_logistic_extreme_logits_stay_in_range() {
        let model = LogisticRegression::new(vec![1.0], 0.0).unwrap();
        let proba = model.predict_proba(&array![[1000.0], [-1000.0]]).unwrap();

        assert_relative_eq!(proba[[0, POSITIVE_CLASS]], 1.0);
        assert_relative_eq!(proba[[1, POSITIVE_CLASS]], 0.0);
        assert!(proba.iter().all(|p| p.is_finite()));
    }

    #[test]
    fn test_width_mismatch_is_error() {
        let model = LogisticRegression::new(vec![1.0, 1.0, 1.0], 0.0).unwrap();

        let err = model.predict_proba(&array![[1.0, 0.0]]).unwrap_err();
        assert!(err.to_string().contains("width mismatch"));
    }

    #[test]
    fn test_naive_bayes_probabilities() {
        let model = MultinomialNb::new(
            vec![0.5_f64.ln(), 0.5_f64.ln()],
            vec![vec![0.8_f64.ln(), 0.2_f64.ln()], vec![0.2_f64.ln(), 0.8_f64.ln()]],
        )
        .unwrap();

        let proba = model.predict_proba(&array![[0.0, 1.0], [0.0, 0.0]]).unwrap();

        assert_relative_eq!(proba[[0, POSITIVE_CLASS]], 0.8, epsilon = 1e-12);
        assert_relative_eq!(proba[[1, POSITIVE_CLASS]], 0.5, epsilon = 1e-12);
        assert_relative_eq!(proba.row(0).sum(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_naive_bayes_rejects_ragged_tables() {
        let result = MultinomialNb::new(vec![0.0, 0.0], vec![vec![0.0, 0.0], vec![0.0]]);

        assert!(result.is_err());
    }

    #[test]
    fn test_parse_tagged_artifact() {
        let json = r#"{"kind": "logistic_regression", "coef": [0.5, -0.5], "intercept": 0.1}"#;
        let artifact: ModelArtifact = serde_json::from_str(json).unwrap();

        assert!(matches!(
            artifact,
            ModelArtifact::LogisticRegression { ref coef, .. } if coef.len() == 2
        ));
    }

    #[test]
    fn test_unknown_kind_is_load_failure() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, br#"{"kind": "random_forest"}"#).unwrap();

        let result = load_model(file.path());

        assert!(matches!(result, Err(ClassifierError::LoadFailure { .. })));
    }
}
