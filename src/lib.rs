//! Resume screener library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod matching;
pub mod output;
pub mod processing;

pub use config::Config;
pub use error::{Result, ScreenerError};
pub use matching::{JobDescriptor, ResumeDocument, SimilarityResult, SimilarityScorer};
pub use processing::{CanonicalCandidateRecord, ParseOrchestrator, ParseReport};
