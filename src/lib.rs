//! Teacher resume classifier library

pub mod classifier;
pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;

pub use classifier::{ClassifierAdapter, Verdict};
pub use config::Config;
pub use error::{ClassifierError, Result};
pub use processing::TextNormalizer;
