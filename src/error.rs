//! Error handling for the resume screener

use thiserror::Error;

/// Shown to the user when no strategy could read the document.
pub const MANUAL_ENTRY_MESSAGE: &str =
    "We couldn't read your resume automatically. Please enter your details manually.";

#[derive(Error, Debug)]
pub enum ScreenerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Rejected before any extraction ran (size, extension).
    #[error("Validation error: {0}")]
    Validation(String),

    /// A single extraction strategy could not decode the document.
    #[error("Document parse error: {0}")]
    DocumentParse(String),

    /// Every strategy was exhausted after validation passed.
    #[error("Parse failed: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Processing error: {0}")]
    Processing(String),
}

pub type Result<T> = std::result::Result<T, ScreenerError>;

impl ScreenerError {
    /// True when the caller sent something we refuse to process.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ScreenerError::Validation(_)
                | ScreenerError::UnsupportedFormat(_)
                | ScreenerError::InvalidInput(_)
        )
    }

    /// Message suitable for an end user filling in the candidate form.
    pub fn user_message(&self) -> String {
        match self {
            ScreenerError::Parse(_) | ScreenerError::DocumentParse(_) => {
                MANUAL_ENTRY_MESSAGE.to_string()
            }
            other => other.to_string(),
        }
    }
}

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for ScreenerError {
    fn from(err: anyhow::Error) -> Self {
        ScreenerError::Processing(err.to_string())
    }
}

impl From<pdf_extract::OutputError> for ScreenerError {
    fn from(err: pdf_extract::OutputError) -> Self {
        ScreenerError::DocumentParse(err.to_string())
    }
}
