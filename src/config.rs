//! Configuration management for the teacher resume classifier

use crate::error::{ClassifierError, Result};
use crate::processing::stemmer::Language;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub artifacts: ArtifactConfig,
    #[serde(default)]
    pub language: LanguageConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactConfig {
    pub models_dir: PathBuf,
    pub vectorizer_file: String,
    pub model_file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LanguageConfig {
    #[serde(default)]
    pub language: Language,
    /// Replaces the built-in stopword list when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stopwords_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub enable_caching: bool,
    pub preview_length: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        let models_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".teacher-resume-classifier")
            .join("models");

        Self {
            models_dir,
            vectorizer_file: "vectorizer.json".to_string(),
            model_file: "model.json".to_string(),
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            enable_caching: true,
            preview_length: 300,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            detailed: false,
            color_output: true,
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults there on first run
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::parse(&content)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| ClassifierError::Configuration(format!("Failed to parse config: {}", e)))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            ClassifierError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("teacher-resume-classifier")
            .join("config.toml")
    }

    pub fn vectorizer_path(&self) -> PathBuf {
        self.artifacts.models_dir.join(&self.artifacts.vectorizer_file)
    }

    pub fn model_path(&self) -> PathBuf {
        self.artifacts.models_dir.join(&self.artifacts.model_file)
    }

    /// Point the artifact paths at explicit files, keeping whichever is `None`
    pub fn with_artifact_overrides(
        mut self,
        vectorizer: Option<PathBuf>,
        model: Option<PathBuf>,
    ) -> Self {
        // absolute file names make `join` ignore models_dir
        if let Some(path) = vectorizer {
            self.artifacts.vectorizer_file = absolutize(path);
        }
        if let Some(path) = model {
            self.artifacts.model_file = absolutize(path);
        }
        self
    }
}

fn absolutize(path: PathBuf) -> String {
    let path = if path.is_absolute() {
        path
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(&path))
            .unwrap_or(path)
    };
    path.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_artifact_paths() {
        let config = Config::default();

        assert!(config.vectorizer_path().ends_with("models/vectorizer.json"));
        assert!(config.model_path().ends_with("models/model.json"));
        assert_eq!(config.language.language, Language::Russian);
        assert!(config.language.stopwords_path.is_none());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config = Config::parse(
            r#"
            [artifacts]
            models_dir = "/srv/models"
            vectorizer_file = "tfidf.json"
            model_file = "logreg.json"

            [output]
            format = "json"
            detailed = true
            color_output = false
            "#,
        )
        .unwrap();

        assert_eq!(config.vectorizer_path(), PathBuf::from("/srv/models/tfidf.json"));
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.input.enable_caching);
    }

    #[test]
    fn test_partial_tables_use_field_defaults() {
        let config = Config::parse(
            r#"
            [artifacts]
            models_dir = "/srv/models"

            [input]
            preview_length = 80

            [output]
            format = "markdown"
            "#,
        )
        .unwrap();

        assert_eq!(config.vectorizer_path(), PathBuf::from("/srv/models/vectorizer.json"));
        assert_eq!(config.model_path(), PathBuf::from("/srv/models/model.json"));
        assert_eq!(config.input.preview_length, 80);
        assert!(config.input.enable_caching);
        assert_eq!(config.output.format, OutputFormat::Markdown);
        assert!(config.output.color_output);
    }

    #[test]
    fn test_unknown_language_is_rejected() {
        let result = Config::parse("[language]\nlanguage = \"klingon\"\n");

        assert!(matches!(result, Err(ClassifierError::Configuration(_))));
    }

    #[test]
    fn test_artifact_overrides() {
        let config = Config::default().with_artifact_overrides(
            Some(PathBuf::from("/tmp/v.json")),
            None,
        );

        assert_eq!(config.vectorizer_path(), PathBuf::from("/tmp/v.json"));
        assert!(config.model_path().ends_with("models/model.json"));
    }

    #[test]
    fn test_first_load_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();

        assert!(path.exists());
        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.vectorizer_path(), config.vectorizer_path());
    }
}
