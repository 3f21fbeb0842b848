//! Teacher resume classifier: scores resumes with a pre-trained text model

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use std::path::Path;
use std::process;
use std::time::Instant;
use teacher_resume_classifier::classifier::ClassifierAdapter;
use teacher_resume_classifier::cli::{self, Cli, Commands, ConfigAction, InputArgs};
use teacher_resume_classifier::input::{InputManager, ResumeInput};
use teacher_resume_classifier::output::{AnalysisReport, ReportGenerator};
use teacher_resume_classifier::processing::TextNormalizer;
use teacher_resume_classifier::{ClassifierError, Config, Result};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, &config_path).await {
        error!("Command failed: {}", e);
        process::exit(if e.is_fatal() { 2 } else { 1 });
    }
}

async fn run_command(command: Commands, config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Analyze {
            input,
            artifacts,
            output,
            detailed,
            save,
        } => {
            let format = match output {
                Some(format) => {
                    cli::parse_output_format(&format).map_err(ClassifierError::InvalidInput)?
                }
                None => config.output.format,
            };
            let detailed = detailed || config.output.detailed;
            let config = config.with_artifact_overrides(artifacts.vectorizer, artifacts.model);

            // artifacts load before any input is read: a broken model is fatal
            let adapter = ClassifierAdapter::from_config(&config)?;
            let inputs = collect_inputs(input, &config).await?;

            let progress = (inputs.len() > 1).then(|| {
                let bar = ProgressBar::new(inputs.len() as u64);
                if let Ok(style) = ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}") {
                    bar.set_style(style);
                }
                bar
            });

            let mut reports = Vec::with_capacity(inputs.len());
            for resume in &inputs {
                if let Some(bar) = &progress {
                    bar.set_message(resume.source.to_string());
                }

                let start = Instant::now();
                let analysis = adapter.analyze_detailed(&resume.text).map_err(|e| {
                    error!("{}: {}", resume.source, e);
                    e
                })?;
                let elapsed = start.elapsed().as_millis() as u64;

                let mut report = AnalysisReport::new(&resume.source, &analysis, elapsed);
                if detailed {
                    report = report.with_preview(&analysis.normalized, config.input.preview_length);
                }
                reports.push(report);

                if let Some(bar) = &progress {
                    bar.inc(1);
                }
            }
            if let Some(bar) = progress {
                bar.finish_and_clear();
            }

            let generator = ReportGenerator::new(config.output.color_output, detailed);
            let rendered = generator.generate(&reports, format)?;
            println!("{}", rendered);

            if let Some(path) = save {
                let plain = ReportGenerator::new(false, detailed).generate(&reports, format)?;
                generator.save(&plain, &path)?;
                info!("Report saved to {}", path.display());
            }
        }

        Commands::Normalize { input } => {
            let normalizer = TextNormalizer::for_language(
                config.language.language,
                config.language.stopwords_path.as_deref(),
            )?;

            for resume in collect_inputs(input, &config).await? {
                println!("{}", normalizer.normalize(&resume.text));
            }
        }

        Commands::Inspect { artifacts } => {
            let config = config.with_artifact_overrides(artifacts.vectorizer, artifacts.model);
            let adapter = ClassifierAdapter::from_config(&config)?;

            println!("teacher-resume-classifier {}", env!("CARGO_PKG_VERSION"));
            println!("Vectorizer: {}", config.vectorizer_path().display());
            println!("Model: {}", config.model_path().display());
            println!("Language: {}", config.language.language);

            if let Some(info) = adapter.artifact_info() {
                println!("Model kind: {}", info.model_kind);
                println!("Vectorizer features: {}", info.vectorizer_features);
                match info.model_features {
                    Some(n) if n == info.vectorizer_features => println!("Model features: {}", n),
                    Some(n) => println!("Model features: {} (MISMATCH)", n),
                    None => println!("Model features: unknown"),
                }
                println!("Stopwords: {}", info.stopwords);
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                let content = toml::to_string_pretty(&config).map_err(|e| {
                    ClassifierError::Configuration(format!("Failed to serialize config: {}", e))
                })?;
                println!("{}", content);
            }

            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }

            Some(ConfigAction::Reset) => {
                Config::default().save_to(config_path)?;
                println!("Configuration reset: {}", config_path.display());
            }
        },
    }

    Ok(())
}

async fn collect_inputs(args: InputArgs, config: &Config) -> Result<Vec<ResumeInput>> {
    if let Some(text) = args.text {
        return Ok(vec![InputManager::from_text(text)]);
    }

    if args.file.is_empty() {
        return Ok(vec![InputManager::from_stdin().await?]);
    }

    let mut manager = InputManager::new().with_cache(config.input.enable_caching);
    let mut inputs = Vec::with_capacity(args.file.len());
    for path in &args.file {
        inputs.push(manager.load_file(path).await?);
    }
    Ok(inputs)
}
