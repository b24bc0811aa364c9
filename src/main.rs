//! Resume screener: résumé parsing and job similarity ranking

use anyhow::{bail, Context};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use resume_screener::cli::{self, Cli, Commands, ConfigAction};
use resume_screener::config::{Config, OutputFormat};
use resume_screener::input::InputManager;
use resume_screener::matching::{ResumeDocument, SimilarityScorer};
use resume_screener::output::formatter_for;
use resume_screener::processing::{run_detached, ParseOrchestrator};
use resume_screener::ScreenerError;
use std::path::PathBuf;
use std::process;

/// Exit code for input rejected by validation.
const EXIT_VALIDATION: i32 = 1;
/// Exit code when no extraction strategy could read the document.
const EXIT_PARSE_FAILED: i32 = 2;

const RESUME_EXTENSIONS: [&str; 3] = ["pdf", "txt", "md"];

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let loaded = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    let code = match run_detached(run_command(cli.command, config, cli.config)) {
        Ok(Ok(code)) => code,
        Ok(Err(e)) => {
            error!("Command failed: {:#}", e);
            1
        }
        Err(e) => {
            error!("Failed to start async runtime: {}", e);
            1
        }
    };
    process::exit(code);
}

fn resolve_format(requested: Option<String>, config: &Config) -> anyhow::Result<OutputFormat> {
    match requested {
        Some(format) => cli::parse_output_format(&format).map_err(anyhow::Error::msg),
        None => Ok(config.output.format),
    }
}

fn progress_bar(len: usize, message: &'static str) -> ProgressBar {
    let bar = ProgressBar::new(len as u64);
    let style = ProgressStyle::with_template("{msg} [{bar:30}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    bar.set_style(style.progress_chars("=> "));
    bar.set_message(message);
    bar
}

async fn load_resumes(
    manager: &mut InputManager,
    paths: &[PathBuf],
) -> anyhow::Result<Vec<ResumeDocument>> {
    for path in paths {
        cli::validate_file_extension(path, &RESUME_EXTENSIONS)
            .map_err(|e| anyhow::anyhow!("Resume file {}: {}", path.display(), e))?;
    }

    let bar = progress_bar(paths.len(), "Loading resumes");
    let mut resumes = Vec::with_capacity(paths.len());
    for path in paths {
        let resume = manager
            .load_resume(path)
            .await
            .with_context(|| format!("Failed to load resume {}", path.display()))?;
        if resume.text.trim().is_empty() {
            warn!("{} has no readable text", path.display());
        }
        resumes.push(resume);
        bar.inc(1);
    }
    bar.finish_and_clear();
    Ok(resumes)
}

async fn run_command(
    command: Commands,
    mut config: Config,
    config_path: Option<PathBuf>,
) -> anyhow::Result<i32> {
    match command {
        Commands::Parse {
            file,
            no_ai,
            timeout,
            output,
        } => {
            if no_ai {
                config.parsing.use_ai_strategy = false;
            }
            if let Some(seconds) = timeout {
                config.parsing.ai_timeout_seconds = seconds;
            }
            config.validate()?;
            let format = resolve_format(output, &config)?;
            let formatter = formatter_for(format, config.output.color_output);

            let bytes = tokio::fs::read(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let filename = file.file_name().and_then(|name| name.to_str());

            info!("Parsing {}", file.display());
            let orchestrator = ParseOrchestrator::new(config.parsing.clone());
            match orchestrator.parse_with_report(&bytes, filename).await {
                Ok(report) => {
                    println!("{}", formatter.format_record(&report)?);
                    Ok(0)
                }
                Err(e) if e.is_client_error() => {
                    eprintln!("{}", e);
                    Ok(EXIT_VALIDATION)
                }
                Err(e @ ScreenerError::Parse(_)) => {
                    error!("{}", e);
                    println!("{}", formatter.format_parse_failure(&e)?);
                    Ok(EXIT_PARSE_FAILED)
                }
                Err(e) => Err(e.into()),
            }
        }

        Commands::Score {
            job,
            resumes,
            top_k,
            weight,
            output,
        } => {
            let weight = weight.unwrap_or(config.scoring.semantic_weight);
            if !(0.0..=1.0).contains(&weight) {
                bail!("Semantic weight must be within [0, 1], got {}", weight);
            }
            let format = resolve_format(output, &config)?;
            let formatter = formatter_for(format, config.output.color_output);

            let mut manager = InputManager::new();
            let job = manager
                .load_job(&job)
                .await
                .with_context(|| format!("Failed to load job descriptor {}", job.display()))?;
            let documents = load_resumes(&mut manager, &resumes).await?;

            let scorer = SimilarityScorer::new(weight);
            let results =
                scorer.score_against_job(&job, &documents, top_k.or(config.scoring.default_top_k));
            println!("{}", formatter.format_ranking(&job, &results)?);
            Ok(0)
        }

        Commands::Similar {
            reference,
            pool,
            top_k,
            include_self,
            output,
        } => {
            let format = resolve_format(output, &config)?;
            let formatter = formatter_for(format, config.output.color_output);

            let mut manager = InputManager::new();
            let reference_doc = load_resumes(&mut manager, std::slice::from_ref(&reference))
                .await?
                .into_iter()
                .next()
                .context("Reference resume could not be loaded")?;
            let pool_docs = load_resumes(&mut manager, &pool).await?;

            let scorer = SimilarityScorer::from_config(&config.scoring);
            let ranked = scorer.rank_candidates_by_similarity(
                &reference_doc,
                &pool_docs,
                top_k.or(config.scoring.default_top_k),
                !include_self,
            );
            println!("{}", formatter.format_similar(&reference_doc.subject_id, &ranked)?);
            Ok(0)
        }

        Commands::Config { action } => {
            let path = config_path.unwrap_or_else(Config::config_path);
            match action {
                Some(ConfigAction::Show) | None => {
                    println!("Configuration ({})\n", path.display());
                    println!("{}", toml::to_string_pretty(&config)?);
                }
                Some(ConfigAction::Reset) => {
                    Config::default().save_to(&path)?;
                    println!("Configuration reset to defaults: {}", path.display());
                }
                Some(ConfigAction::Path) => {
                    println!("{}", path.display());
                }
            }
            Ok(0)
        }
    }
}
