//! Configuration management for the resume screener

use crate::error::{Result, ScreenerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub parsing: ParsingConfig,
    pub scoring: ScoringConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsingConfig {
    /// Try the layout-aware strategy first, falling back to basic extraction.
    pub use_ai_strategy: bool,
    pub ai_timeout_seconds: f64,
    pub max_file_size_mb: f64,
    pub min_file_size_bytes: usize,
    pub allowed_extensions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Share of the combined score taken by TF-IDF similarity; the rest is keyword overlap.
    pub semantic_weight: f32,
    pub default_top_k: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            use_ai_strategy: true,
            ai_timeout_seconds: 10.0,
            max_file_size_mb: 5.0,
            min_file_size_bytes: 100,
            allowed_extensions: vec!["pdf".to_string()],
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            semantic_weight: 0.7,
            default_top_k: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            color_output: true,
        }
    }
}

impl ParsingConfig {
    /// Saturates instead of panicking for values `validate` would reject.
    pub fn ai_timeout(&self) -> Duration {
        Duration::try_from_secs_f64(self.ai_timeout_seconds.max(0.0)).unwrap_or(Duration::MAX)
    }

    pub fn max_file_size_bytes(&self) -> u64 {
        (self.max_file_size_mb * 1024.0 * 1024.0) as u64
    }

    pub fn is_extension_allowed(&self, ext: &str) -> bool {
        let ext = ext.to_lowercase();
        self.allowed_extensions
            .iter()
            .any(|allowed| allowed.trim_start_matches('.').eq_ignore_ascii_case(&ext))
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| ScreenerError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            ScreenerError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-screener")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        let parsing = &self.parsing;
        if parsing.ai_timeout_seconds <= 0.0
            || Duration::try_from_secs_f64(parsing.ai_timeout_seconds).is_err()
        {
            return Err(ScreenerError::Configuration(format!(
                "ai_timeout_seconds must be a positive, representable number of seconds, got {}",
                parsing.ai_timeout_seconds
            )));
        }
        if !parsing.max_file_size_mb.is_finite() || parsing.max_file_size_mb <= 0.0 {
            return Err(ScreenerError::Configuration(format!(
                "max_file_size_mb must be a positive number, got {}",
                parsing.max_file_size_mb
            )));
        }
        if parsing.allowed_extensions.is_empty() {
            return Err(ScreenerError::Configuration(
                "allowed_extensions must not be empty".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.scoring.semantic_weight) {
            return Err(ScreenerError::Configuration(format!(
                "semantic_weight must be within [0, 1], got {}",
                self.scoring.semantic_weight
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert!(config.parsing.use_ai_strategy);
        assert_eq!(config.scoring.semantic_weight, 0.7);
        assert_eq!(config.parsing.max_file_size_bytes(), 5 * 1024 * 1024);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            "[parsing]\nuse_ai_strategy = false\nai_timeout_seconds = 0.5\n",
        )
        .unwrap();

        assert!(!config.parsing.use_ai_strategy);
        assert_eq!(config.parsing.ai_timeout(), Duration::from_millis(500));
        assert_eq!(config.parsing.allowed_extensions, vec!["pdf".to_string()]);
        assert_eq!(config.scoring.semantic_weight, 0.7);
    }

    #[test]
    fn test_rejects_out_of_range_weight() {
        let mut config = Config::default();
        config.scoring.semantic_weight = 1.5;
        assert!(matches!(config.validate(), Err(ScreenerError::Configuration(_))));
    }

    #[test]
    fn test_rejects_non_positive_timeout() {
        let mut config = Config::default();
        config.parsing.ai_timeout_seconds = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_unrepresentable_timeout() {
        let mut config = Config::default();
        for seconds in [1e30, f64::INFINITY, f64::NAN] {
            config.parsing.ai_timeout_seconds = seconds;
            assert!(config.validate().is_err(), "{} accepted", seconds);
        }

        config.parsing.ai_timeout_seconds = 1e30;
        assert_eq!(config.parsing.ai_timeout(), Duration::MAX);
    }

    #[test]
    fn test_extension_check_is_case_insensitive() {
        let parsing = ParsingConfig::default();
        assert!(parsing.is_extension_allowed("PDF"));
        assert!(!parsing.is_extension_allowed("docx"));
    }

    #[test]
    fn test_save_and_load_roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.scoring.default_top_k = Some(5);
        config.output.format = OutputFormat::Json;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.scoring.default_top_k, Some(5));
        assert_eq!(loaded.output.format, OutputFormat::Json);
    }
}
