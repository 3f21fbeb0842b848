//! Classifier adapter: normalizer + vectorizer + model behind one `score` call

use crate::classifier::model::{load_model, ModelKind, ProbabilityModel, POSITIVE_CLASS};
use crate::classifier::vectorizer::{TfidfVectorizer, Vectorizer};
use crate::classifier::verdict::Verdict;
use crate::config::Config;
use crate::error::{ClassifierError, Result};
use crate::processing::normalizer::TextNormalizer;
use anyhow::anyhow;
use log::{debug, info, warn};
use serde::Serialize;
use std::path::Path;

/// Scores raw text with pre-trained artifacts.
///
/// Starts out Unready; loading artifacts moves it to Ready exactly once and
/// there is no way back. Scoring while Unready fails with
/// [`ClassifierError::NotReady`].
pub struct ClassifierAdapter {
    normalizer: TextNormalizer,
    state: AdapterState,
}

enum AdapterState {
    Unready,
    Ready(Artifacts),
}

struct Artifacts {
    vectorizer: Box<dyn Vectorizer>,
    model: Box<dyn ProbabilityModel>,
}

/// Outcome of one analysis call
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub probability: f64,
    pub verdict: Verdict,
    pub normalized: String,
    pub token_count: usize,
}

impl Analysis {
    pub fn percentage(&self) -> f64 {
        self.probability * 100.0
    }
}

/// Summary of the loaded artifacts
#[derive(Debug, Clone, Serialize)]
pub struct ArtifactInfo {
    pub vectorizer_features: usize,
    pub model_kind: ModelKind,
    pub model_features: Option<usize>,
    pub stopwords: usize,
}

impl ClassifierAdapter {
    /// Create an adapter in the Unready state
    pub fn new(normalizer: TextNormalizer) -> Self {
        Self {
            normalizer,
            state: AdapterState::Unready,
        }
    }

    /// Create an adapter that is Ready from the start
    pub fn with_artifacts(
        normalizer: TextNormalizer,
        vectorizer: Box<dyn Vectorizer>,
        model: Box<dyn ProbabilityModel>,
    ) -> Self {
        let mut adapter = Self::new(normalizer);
        adapter.state = AdapterState::Ready(Artifacts::new(vectorizer, model));
        adapter
    }

    /// Build language resources and load both artifacts named by the config.
    /// Any missing resource is a [`ClassifierError::LoadFailure`].
    pub fn from_config(config: &Config) -> Result<Self> {
        let normalizer = TextNormalizer::for_language(
            config.language.language,
            config.language.stopwords_path.as_deref(),
        )?;

        let mut adapter = Self::new(normalizer);
        adapter.load_from_paths(&config.vectorizer_path(), &config.model_path())?;
        Ok(adapter)
    }

    /// Transition Unready → Ready with the given artifacts
    pub fn load(
        &mut self,
        vectorizer: Box<dyn Vectorizer>,
        model: Box<dyn ProbabilityModel>,
    ) -> Result<()> {
        if self.is_ready() {
            return Err(ClassifierError::AlreadyLoaded);
        }

        self.state = AdapterState::Ready(Artifacts::new(vectorizer, model));
        Ok(())
    }

    /// Load JSON artifacts from disk. On failure the adapter stays Unready.
    pub fn load_from_paths(&mut self, vectorizer_path: &Path, model_path: &Path) -> Result<()> {
        if self.is_ready() {
            return Err(ClassifierError::AlreadyLoaded);
        }

        let vectorizer = TfidfVectorizer::load(vectorizer_path)?;
        let model = load_model(model_path)?;
        self.load(Box::new(vectorizer), model)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, AdapterState::Ready(_))
    }

    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    /// Probability in [0, 1] that `text` is a teacher's resume.
    ///
    /// Empty normalized text is scored like any other; rejecting empty input
    /// is the job of [`analyze`](Self::analyze).
    pub fn score(&self, text: &str) -> Result<f64> {
        let artifacts = self.artifacts()?;
        let normalized = self.normalizer.normalize(text);
        artifacts.score_normalized(normalized)
    }

    /// Reject empty input, then score
    pub fn analyze(&self, raw_text: &str) -> Result<f64> {
        Ok(self.analyze_detailed(raw_text)?.probability)
    }

    /// Like [`analyze`](Self::analyze), keeping the normalized text and verdict
    pub fn analyze_detailed(&self, raw_text: &str) -> Result<Analysis> {
        if raw_text.trim().is_empty() {
            return Err(ClassifierError::EmptyInput);
        }

        let artifacts = self.artifacts()?;
        let tokens = self.normalizer.tokens(raw_text);
        let token_count = tokens.len();
        let normalized = tokens.join(" ");
        debug!("Normalized input to {} tokens", token_count);

        let probability = artifacts.score_normalized(normalized.clone())?;

        Ok(Analysis {
            probability,
            verdict: Verdict::from_probability(probability),
            normalized,
            token_count,
        })
    }

    pub fn artifact_info(&self) -> Option<ArtifactInfo> {
        match &self.state {
            AdapterState::Ready(artifacts) => Some(ArtifactInfo {
                vectorizer_features: artifacts.vectorizer.n_features(),
                model_kind: artifacts.model.kind(),
                model_features: artifacts.model.n_features(),
                stopwords: self.normalizer.stopwords().len(),
            }),
            AdapterState::Unready => None,
        }
    }

    fn artifacts(&self) -> Result<&Artifacts> {
        match &self.state {
            AdapterState::Ready(artifacts) => Ok(artifacts),
            AdapterState::Unready => Err(ClassifierError::NotReady),
        }
    }
}

impl Artifacts {
    fn new(vectorizer: Box<dyn Vectorizer>, model: Box<dyn ProbabilityModel>) -> Self {
        if let Some(expected) = model.n_features() {
            if expected != vectorizer.n_features() {
                warn!(
                    "Model expects {} features but vectorizer produces {}; scoring will fail",
                    expected,
                    vectorizer.n_features()
                );
            }
        }
        info!("Classifier ready ({} model)", model.kind());

        Self { vectorizer, model }
    }

    fn score_normalized(&self, normalized: String) -> Result<f64> {
        let features = self
            .vectorizer
            .transform(&[normalized])
            .map_err(ClassifierError::scoring)?;
        let proba = self
            .model
            .predict_proba(&features)
            .map_err(ClassifierError::scoring)?;

        let probability = proba
            .get((0, POSITIVE_CLASS))
            .copied()
            .ok_or_else(|| {
                ClassifierError::scoring(anyhow!(
                    "model returned {:?} probabilities, expected at least 1x2",
                    proba.shape()
                ))
            })?;

        if probability.is_nan() {
            return Err(ClassifierError::scoring(anyhow!(
                "model returned NaN probability"
            )));
        }
        if !(0.0..=1.0).contains(&probability) {
            warn!("Model probability {} outside [0, 1], clamping", probability);
        }

        Ok(probability.clamp(0.0, 1.0))
    }
}
