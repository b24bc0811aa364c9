//! Extraction strategies the orchestrator can run

use crate::error::Result;
use crate::processing::document::RawExtraction;
use crate::processing::fields::{extract_fields_basic, extract_fields_layout_aware};
use crate::processing::layout::{extract_layout, LayoutMode};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    Basic,
    LayoutAware,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyKind::Basic => write!(f, "basic"),
            StrategyKind::LayoutAware => write!(f, "layout-aware"),
        }
    }
}

/// Turns document bytes into raw fields.
///
/// Implementations run on a blocking worker and may be abandoned mid-call,
/// so they must not touch shared mutable state.
pub trait ExtractionStrategy: Send + Sync {
    fn kind(&self) -> StrategyKind;
    fn extract(&self, bytes: &[u8]) -> Result<RawExtraction>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct BasicStrategy;

impl ExtractionStrategy for BasicStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Basic
    }

    fn extract(&self, bytes: &[u8]) -> Result<RawExtraction> {
        let doc = extract_layout(bytes, LayoutMode::Basic)?;
        Ok(extract_fields_basic(&doc))
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LayoutAwareStrategy;

impl ExtractionStrategy for LayoutAwareStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::LayoutAware
    }

    fn extract(&self, bytes: &[u8]) -> Result<RawExtraction> {
        let doc = extract_layout(bytes, LayoutMode::LayoutAware)?;
        Ok(extract_fields_layout_aware(&doc))
    }
}
