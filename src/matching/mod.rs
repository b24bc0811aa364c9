//! Similarity scoring between jobs and résumés

pub mod keywords;
pub mod similarity;
pub mod text_processor;
pub mod tfidf;

pub use similarity::{
    JobDescriptor, RankedCandidate, ResumeDocument, SimilarityResult, SimilarityScorer,
};
