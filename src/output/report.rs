//! Report structures for analysed resumes

use crate::classifier::adapter::Analysis;
use crate::classifier::verdict::Verdict;
use crate::input::manager::InputSource;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// One analysed resume
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// File path, `<text>` or `<stdin>`
    pub source: String,

    /// Teacher probability in [0, 1]
    pub probability: f64,

    /// Same value as a percentage
    pub percentage: f64,

    pub verdict: Verdict,

    /// Sentence shown to the user for the verdict
    pub conclusion: String,

    /// Stems fed to the vectorizer
    pub token_count: usize,

    /// Normalized text, only kept for detailed output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalized_preview: Option<String>,

    pub processing_time_ms: u64,

    pub generated_at: DateTime<Utc>,
}

impl AnalysisReport {
    pub fn new(source: &InputSource, analysis: &Analysis, processing_time_ms: u64) -> Self {
        Self {
            source: source.to_string(),
            probability: analysis.probability,
            percentage: analysis.percentage(),
            verdict: analysis.verdict,
            conclusion: analysis.verdict.conclusion().to_string(),
            token_count: analysis.token_count,
            normalized_preview: None,
            processing_time_ms,
            generated_at: Utc::now(),
        }
    }

    pub fn with_preview(mut self, normalized: &str, max_graphemes: usize) -> Self {
        self.normalized_preview = Some(truncate_text(normalized, max_graphemes));
        self
    }
}

/// Truncate on a grapheme boundary, backing up to the last space when possible
pub fn truncate_text(text: &str, max_graphemes: usize) -> String {
    let graphemes: Vec<&str> = text.graphemes(true).collect();
    if graphemes.len() <= max_graphemes {
        return text.to_string();
    }

    let truncated = graphemes[..max_graphemes].concat();
    let cut = match truncated.rfind(' ') {
        Some(space) if space > 0 => &truncated[..space],
        _ => truncated.as_str(),
    };
    format!("{}...", cut)
}
