#![allow(dead_code)]

use std::path::PathBuf;
use teacher_resume_classifier::processing::{Language, TextNormalizer};
use teacher_resume_classifier::ClassifierAdapter;

pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn russian_normalizer() -> TextNormalizer {
    TextNormalizer::for_language(Language::Russian, None).expect("russian resources")
}

/// Adapter loaded with the fixture vectorizer and the given model file
pub fn fixture_adapter(model: &str) -> ClassifierAdapter {
    let mut adapter = ClassifierAdapter::new(russian_normalizer());
    adapter
        .load_from_paths(&fixture("vectorizer.json"), &fixture(model))
        .unwrap_or_else(|e| panic!("Failed to load fixture artifacts: {e}"));
    adapter
}
