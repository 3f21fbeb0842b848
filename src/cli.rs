//! CLI interface for the teacher resume classifier

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "teacher-resume-classifier")]
#[command(version)]
#[command(about = "Estimate how likely a resume belongs to a teacher")]
#[command(long_about = "Normalizes Russian resume text (stopwords, Snowball stemming) and scores it with a pre-trained vectorizer and model")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score one or more resumes
    Analyze {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        artifacts: ArtifactArgs,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Include token counts and the normalized text
        #[arg(short, long)]
        detailed: bool,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Print the normalized form of a resume
    Normalize {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Load the artifacts and describe them
    Inspect {
        #[command(flatten)]
        artifacts: ArtifactArgs,
    },

    /// Show or reset configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

/// Resume text sources; stdin is read when neither is given
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Resume text given inline
    #[arg(short, long, conflicts_with = "file")]
    pub text: Option<String>,

    /// Resume file (TXT, MD, PDF); may be repeated
    #[arg(short, long)]
    pub file: Vec<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ArtifactArgs {
    /// Vectorizer artifact overriding the configured one
    #[arg(long)]
    pub vectorizer: Option<PathBuf>,

    /// Model artifact overriding the configured one
    #[arg(long)]
    pub model: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the configuration file location
    Path,

    /// Reset configuration to defaults
    Reset,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown",
            format
        )),
    }
}
