//! Résumé parsing pipeline: layout extraction, field heuristics, normalization

pub mod dates;
pub mod document;
pub mod fields;
pub mod layout;
pub mod normalizer;
pub mod orchestrator;
pub mod patterns;
pub mod reference_data;
pub mod strategy;

pub use document::{CanonicalCandidateRecord, LayoutDocument, RawExtraction, TextSpan};
pub use orchestrator::{
    run_detached, FallbackReason, ParseOrchestrator, ParseReport, ParseStage,
};
pub use strategy::{BasicStrategy, ExtractionStrategy, LayoutAwareStrategy, StrategyKind};
