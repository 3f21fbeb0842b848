//! Integration tests for resume input handling

mod common;

use common::fixture;
use teacher_resume_classifier::input::{InputManager, InputSource};
use teacher_resume_classifier::ClassifierError;

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let mut manager = InputManager::new();

    let input = manager.load_file(&fixture("teacher_resume.txt")).await.unwrap();

    assert_eq!(input.source, InputSource::File(fixture("teacher_resume.txt")));
    assert!(input.text.contains("Иванова Мария Петровна"));
    assert!(input.text.contains("Учитель начальных классов"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let mut manager = InputManager::new();

    let text = manager.extract_text(&fixture("teacher_resume.md")).await.unwrap();

    assert!(text.contains("Сидорова Анна"));
    assert!(text.contains("Учитель истории"));
    assert!(text.contains("Провожу уроки в школе"));
    // Should not contain markdown formatting
    assert!(!text.contains("**"));
    assert!(!text.contains('#'));
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new();
    let path = fixture("teacher_resume.txt");

    let text1 = manager.extract_text(&path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let text2 = manager.extract_text(&path).await.unwrap();
    assert_eq!(text1, text2);
    assert_eq!(manager.cache_size(), 1);
}

#[tokio::test]
async fn test_cache_can_be_disabled() {
    let mut manager = InputManager::new().with_cache(false);

    manager.extract_text(&fixture("teacher_resume.txt")).await.unwrap();

    assert_eq!(manager.cache_size(), 0);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let mut manager = InputManager::new();

    let result = manager.extract_text(&fixture("unsupported.xyz")).await;

    assert!(matches!(result, Err(ClassifierError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::new();

    let result = manager.extract_text(&fixture("nonexistent.txt")).await;

    assert!(matches!(result, Err(ClassifierError::InvalidInput(_))));
}

#[test]
fn test_inline_text_source() {
    let input = InputManager::from_text("Учитель физики");

    assert_eq!(input.source, InputSource::Text);
    assert_eq!(input.source.to_string(), "<text>");
    assert_eq!(input.text, "Учитель физики");
}
