//! Error handling for the teacher resume classifier

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input text is empty")]
    EmptyInput,

    #[error("Failed to load {artifact} from '{}': {reason}", .path.display())]
    LoadFailure {
        artifact: String,
        path: PathBuf,
        reason: String,
    },

    #[error("Scoring failed: {source}")]
    ScoringFailure {
        #[source]
        source: anyhow::Error,
    },

    #[error("Classifier is not ready: artifacts have not been loaded")]
    NotReady,

    #[error("Classifier artifacts are already loaded")]
    AlreadyLoaded,

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, ClassifierError>;

impl ClassifierError {
    pub fn load_failure(
        artifact: impl Into<String>,
        path: impl Into<PathBuf>,
        reason: impl ToString,
    ) -> Self {
        ClassifierError::LoadFailure {
            artifact: artifact.into(),
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Wrap a vectorizer or model failure raised while scoring
    pub fn scoring(source: anyhow::Error) -> Self {
        ClassifierError::ScoringFailure { source }
    }

    /// True for failures that make the analysis feature unusable
    pub fn is_fatal(&self) -> bool {
        matches!(self, ClassifierError::LoadFailure { .. } | ClassifierError::NotReady)
    }
}
