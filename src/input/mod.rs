//! Resume input handling: file detection, text extraction and sources

pub mod file_detector;
pub mod manager;
pub mod text_extractor;

pub use manager::{InputManager, InputSource, ResumeInput};
