//! Input manager for handling different file types

use crate::error::{Result, ScreenerError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{
    MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor,
};
use crate::matching::{JobDescriptor, ResumeDocument};
use log::{info, warn};
use std::collections::HashMap;
use std::path::Path;

pub struct InputManager {
    cache: HashMap<String, String>,
    enable_cache: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    /// Text content of a pdf, txt or md file.
    ///
    /// A PDF without a usable text layer yields an empty string rather than an
    /// error, so scoring can flag it as unreadable instead of dropping it.
    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(&path_str) {
                info!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        if !path.exists() {
            return Err(ScreenerError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let text = match self.detect_file_type(path)? {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                match PdfExtractor.extract(path).await {
                    Ok(text) => text,
                    Err(ScreenerError::DocumentParse(reason)) => {
                        warn!("No text layer recovered, treating as unreadable: {}", reason);
                        String::new()
                    }
                    Err(e) => return Err(e),
                }
            }
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await?
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await?
            }
            FileType::Unknown => {
                return Err(ScreenerError::UnsupportedFormat(format!(
                    "Unsupported file type for: {}",
                    path.display()
                )));
            }
        };

        if self.enable_cache {
            self.cache.insert(path_str, text.clone());
        }

        Ok(text)
    }

    /// Résumé keyed by its file name.
    pub async fn load_resume(&mut self, path: &Path) -> Result<ResumeDocument> {
        let text = self.extract_text(path).await?;
        let subject_id = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        Ok(ResumeDocument::new(subject_id, text))
    }

    /// Job descriptor from a TOML or JSON file.
    ///
    /// A relative `description_file` is resolved against the job file's
    /// directory and only read when `description_text` is empty.
    pub async fn load_job(&mut self, path: &Path) -> Result<JobDescriptor> {
        let content = tokio::fs::read_to_string(path).await?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase);

        let mut job: JobDescriptor = match extension.as_deref() {
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") => toml::from_str(&content).map_err(|e| {
                ScreenerError::InvalidInput(format!(
                    "Invalid job file '{}': {}",
                    path.display(),
                    e
                ))
            })?,
            _ => {
                return Err(ScreenerError::UnsupportedFormat(format!(
                    "Job descriptors must be .toml or .json: {}",
                    path.display()
                )))
            }
        };

        if job.description_text.trim().is_empty() {
            if let Some(description_file) = job.description_file.clone() {
                let resolved = match path.parent() {
                    Some(dir) if description_file.is_relative() => dir.join(&description_file),
                    _ => description_file,
                };
                job.description_text = self.extract_text(&resolved).await?;
            }
        }

        Ok(job)
    }

    fn detect_file_type(&self, path: &Path) -> Result<FileType> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                ScreenerError::InvalidInput(format!("File has no extension: {}", path.display()))
            })?;

        Ok(FileType::from_extension(extension))
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
