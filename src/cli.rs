//! CLI interface for the resume screener

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "resume-screener")]
#[command(about = "Resume parsing and job similarity ranking")]
#[command(long_about = "Extract a form-ready candidate profile from a PDF resume, and rank resumes against a job or against each other with TF-IDF similarity and skill matching")]
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
    /// Extract candidate fields from a PDF resume
    Parse {
        /// Path to the resume PDF
        file: PathBuf,

        /// Use basic extraction only
        #[arg(long)]
        no_ai: bool,

        /// Seconds to wait for layout-aware extraction before falling back
        #[arg(long)]
        timeout: Option<f64>,

        /// Output format: console, json
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Rank resumes against a job description
    Score {
        /// Job descriptor file (TOML or JSON)
        #[arg(short, long)]
        job: PathBuf,

        /// Resume files (PDF, TXT, MD)
        #[arg(required = true)]
        resumes: Vec<PathBuf>,

        /// Keep only the best N results, sorted by score
        #[arg(short = 'k', long)]
        top_k: Option<usize>,

        /// Weight of semantic similarity in the combined score (0-1)
        #[arg(short, long)]
        weight: Option<f32>,

        /// Output format: console, json
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Find resumes most similar to a reference resume
    Similar {
        /// Reference resume
        #[arg(short, long)]
        reference: PathBuf,

        /// Candidate pool
        #[arg(required = true)]
        pool: Vec<PathBuf>,

        /// Keep only the best N candidates
        #[arg(short = 'k', long)]
        top_k: Option<usize>,

        /// Keep the reference resume in the results if it is part of the pool
        #[arg(long)]
        include_self: bool,

        /// Output format: console, json
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        _ => Err(format!("Invalid output format: {}. Supported: console, json", format)),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_command_arguments() {
        let cli =
            Cli::parse_from(["resume-screener", "parse", "cv.pdf", "--no-ai", "--timeout", "2.5"]);
        match cli.command {
            Commands::Parse { file, no_ai, timeout, output } => {
                assert_eq!(file, PathBuf::from("cv.pdf"));
                assert!(no_ai);
                assert_eq!(timeout, Some(2.5));
                assert!(output.is_none());
            }
            _ => panic!("expected parse command"),
        }
    }

    #[test]
    fn test_score_requires_resumes() {
        assert!(Cli::try_parse_from(["resume-screener", "score", "--job", "job.toml"]).is_err());
        let cli = Cli::try_parse_from([
            "resume-screener", "score", "--job", "job.toml", "a.pdf", "b.txt", "-k", "1",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Score { top_k: Some(1), .. }));
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!(parse_output_format("JSON"), Ok(OutputFormat::Json));
        assert!(parse_output_format("html").is_err());
    }

    #[test]
    fn test_file_extension_validation() {
        assert!(validate_file_extension(Path::new("cv.PDF"), &["pdf", "txt", "md"]).is_ok());
        assert!(validate_file_extension(Path::new("cv.docx"), &["pdf"]).is_err());
        assert!(validate_file_extension(Path::new("cv"), &["pdf"]).is_err());
    }
}
