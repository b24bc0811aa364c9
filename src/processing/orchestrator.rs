//! Parse orchestration: validation, bounded strategy execution and fallback

use crate::config::ParsingConfig;
use crate::error::{Result, ScreenerError};
use crate::processing::document::{CanonicalCandidateRecord, RawExtraction};
use crate::processing::normalizer::normalize;
use crate::processing::strategy::{
    BasicStrategy, ExtractionStrategy, LayoutAwareStrategy, StrategyKind,
};
use log::{debug, info, warn};
use serde::Serialize;
use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinError;

/// States a parse call passes through, in the order they were visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseStage {
    Validate,
    StrategySelect,
    AiAttempt,
    LegacyAttempt,
    Normalize,
    Done,
}

/// Why the layout-aware result was discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    Timeout,
    StrategyError(String),
    WorkerPanic(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct ParseReport {
    pub record: CanonicalCandidateRecord,
    pub strategy: StrategyKind,
    pub fell_back: bool,
    pub fallback_reason: Option<FallbackReason>,
    pub stages: Vec<ParseStage>,
    pub elapsed_ms: u64,
}

pub struct ParseOrchestrator {
    config: ParsingConfig,
    ai_strategy: Arc<dyn ExtractionStrategy>,
    legacy_strategy: Arc<dyn ExtractionStrategy>,
}

type WorkerOutcome = std::result::Result<Result<RawExtraction>, JoinError>;

/// Run `future` on a fresh multi-threaded runtime and shut it down without
/// joining blocking workers.
///
/// A timed-out layout-aware attempt keeps its worker thread busy; dropping a
/// runtime normally would wait for it and undo the timeout.
pub fn run_detached<F: Future>(future: F) -> std::io::Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let output = runtime.block_on(future);
    runtime.shutdown_background();
    Ok(output)
}

async fn run_on_worker(strategy: Arc<dyn ExtractionStrategy>, bytes: Arc<[u8]>) -> WorkerOutcome {
    tokio::task::spawn_blocking(move || strategy.extract(&bytes)).await
}

impl ParseOrchestrator {
    pub fn new(config: ParsingConfig) -> Self {
        Self::with_strategies(
            config,
            Arc::new(LayoutAwareStrategy),
            Arc::new(BasicStrategy),
        )
    }

    pub fn with_strategies(
        config: ParsingConfig,
        ai_strategy: Arc<dyn ExtractionStrategy>,
        legacy_strategy: Arc<dyn ExtractionStrategy>,
    ) -> Self {
        Self {
            config,
            ai_strategy,
            legacy_strategy,
        }
    }

    /// Reject the input before any extraction runs.
    pub fn validate(&self, bytes: &[u8], filename: Option<&str>) -> Result<()> {
        let size = bytes.len() as u64;
        let max = self.config.max_file_size_bytes();
        if size > max {
            return Err(ScreenerError::Validation(format!(
                "File is {} bytes, larger than the {} MB limit",
                size, self.config.max_file_size_mb
            )));
        }

        if bytes.len() < self.config.min_file_size_bytes {
            return Err(ScreenerError::Validation(format!(
                "File is {} bytes, smaller than the {} byte minimum",
                size, self.config.min_file_size_bytes
            )));
        }

        let extension = filename
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str());
        if let Some(ext) = extension {
            if !self.config.is_extension_allowed(ext) {
                return Err(ScreenerError::Validation(format!(
                    "Unsupported file extension '.{}' (allowed: {})",
                    ext,
                    self.config.allowed_extensions.join(", ")
                )));
            }
        }

        Ok(())
    }

    pub async fn parse(
        &self,
        bytes: &[u8],
        filename: Option<&str>,
    ) -> Result<CanonicalCandidateRecord> {
        self.parse_with_report(bytes, filename)
            .await
            .map(|report| report.record)
    }

    pub async fn parse_file(&self, path: &Path) -> Result<ParseReport> {
        let bytes = tokio::fs::read(path).await?;
        let filename = path.file_name().and_then(|name| name.to_str());
        self.parse_with_report(&bytes, filename).await
    }

    pub async fn parse_with_report(
        &self,
        bytes: &[u8],
        filename: Option<&str>,
    ) -> Result<ParseReport> {
        let start = Instant::now();
        let mut stages = vec![ParseStage::Validate];
        debug!("Validating {} bytes ({:?})", bytes.len(), filename);
        self.validate(bytes, filename)?;

        let bytes: Arc<[u8]> = Arc::from(bytes);
        let mut fallback_reason = None;
        let mut raw = None;

        if self.config.use_ai_strategy {
            stages.push(ParseStage::StrategySelect);
            info!("Using {} extraction", self.ai_strategy.kind());

            stages.push(ParseStage::AiAttempt);
            match self.attempt_ai(Arc::clone(&bytes)).await {
                Ok(extracted) => raw = Some((self.ai_strategy.kind(), extracted)),
                Err(reason) => {
                    warn!(
                        "{} extraction abandoned ({:?}), falling back to {}",
                        self.ai_strategy.kind(),
                        reason,
                        self.legacy_strategy.kind()
                    );
                    fallback_reason = Some(reason);
                }
            }
        } else {
            info!("Using {} extraction", self.legacy_strategy.kind());
        }

        let (strategy, raw) = match raw {
            Some(found) => found,
            None => {
                stages.push(ParseStage::LegacyAttempt);
                let extracted = self.attempt_legacy(bytes).await?;
                (self.legacy_strategy.kind(), extracted)
            }
        };

        stages.push(ParseStage::Normalize);
        debug!("Normalizing fields from {} extraction", strategy);
        let record = normalize(&raw);

        stages.push(ParseStage::Done);
        let elapsed_ms = start.elapsed().as_millis() as u64;
        debug!(
            "Parsed with {} extraction in {}ms, {} fields filled",
            strategy,
            elapsed_ms,
            record.filled_count()
        );

        Ok(ParseReport {
            record,
            strategy,
            fell_back: fallback_reason.is_some(),
            fallback_reason,
            stages,
            elapsed_ms,
        })
    }

    /// Run the layout-aware strategy on a worker, waiting at most the configured timeout.
    ///
    /// On timeout the worker is left to finish on its own; its result is dropped.
    async fn attempt_ai(
        &self,
        bytes: Arc<[u8]>,
    ) -> std::result::Result<RawExtraction, FallbackReason> {
        let worker = run_on_worker(Arc::clone(&self.ai_strategy), bytes);

        match tokio::time::timeout(self.config.ai_timeout(), worker).await {
            Ok(Ok(Ok(raw))) => Ok(raw),
            Ok(Ok(Err(e))) => Err(FallbackReason::StrategyError(e.to_string())),
            Ok(Err(join_error)) => Err(FallbackReason::WorkerPanic(join_error.to_string())),
            Err(_) => Err(FallbackReason::Timeout),
        }
    }

    async fn attempt_legacy(&self, bytes: Arc<[u8]>) -> Result<RawExtraction> {
        match run_on_worker(Arc::clone(&self.legacy_strategy), bytes).await {
            Ok(Ok(raw)) => Ok(raw),
            Ok(Err(e)) => {
                warn!("{} extraction failed: {}", self.legacy_strategy.kind(), e);
                Err(ScreenerError::Parse(format!(
                    "No extraction strategy could read the document: {}",
                    e
                )))
            }
            Err(join_error) => Err(ScreenerError::Parse(format!(
                "{} extraction worker failed: {}",
                self.legacy_strategy.kind(),
                join_error
            ))),
        }
    }
}
