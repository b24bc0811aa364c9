//! Output formatters for parse results and rankings

use crate::config::OutputFormat;
use crate::error::{Result, ScreenerError};
use crate::matching::{JobDescriptor, RankedCandidate, SimilarityResult};
use crate::processing::document::CanonicalCandidateRecord;
use crate::processing::orchestrator::ParseReport;
use colored::{Color, Colorize};
use serde_json::json;

pub trait OutputFormatter {
    fn format_record(&self, report: &ParseReport) -> Result<String>;
    /// Empty, editable form shown when no strategy could read the document.
    fn format_parse_failure(&self, error: &ScreenerError) -> Result<String>;
    fn format_ranking(&self, job: &JobDescriptor, results: &[SimilarityResult]) -> Result<String>;
    fn format_similar(&self, reference_id: &str, ranked: &[RankedCandidate]) -> Result<String>;
}

/// Console formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
}

/// JSON formatter for API integration and structured data
pub struct JsonFormatter {
    pretty: bool,
}

pub fn formatter_for(format: OutputFormat, use_colors: bool) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Console => Box::new(ConsoleFormatter::new(use_colors)),
        OutputFormat::Json => Box::new(JsonFormatter::new(true)),
    }
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str) -> String {
        if self.use_colors {
            format!("\n{} {}\n", "█".blue().bold(), title.blue().bold())
        } else {
            format!("\n█ {}\n", title)
        }
    }

    fn format_score_badge(&self, score: f32) -> String {
        let percent = (score * 100.0).round() as u32;
        let (badge, color) = match percent {
            80..=100 => ("STRONG", Color::Green),
            60..=79 => ("GOOD", Color::BrightGreen),
            40..=59 => ("FAIR", Color::Yellow),
            20..=39 => ("WEAK", Color::BrightYellow),
            _ => ("POOR", Color::Red),
        };

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_fields(&self, record: &CanonicalCandidateRecord) -> String {
        let mut output = String::new();
        for (key, value) in record.fields() {
            let shown = if value.is_empty() {
                self.colorize("(empty)", Color::BrightBlack)
            } else {
                value.to_string()
            };
            output.push_str(&format!("  {:<10} {}\n", key, shown));
        }
        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_record(&self, report: &ParseReport) -> Result<String> {
        let mut output = self.format_header("CANDIDATE PROFILE");
        output.push_str(&format!(
            "Strategy: {} | {}ms | {}/{} fields\n",
            report.strategy,
            report.elapsed_ms,
            report.record.filled_count(),
            crate::processing::document::CANONICAL_FIELDS.len()
        ));
        if let Some(reason) = &report.fallback_reason {
            output.push_str(&self.colorize(
                &format!("Fell back to basic extraction: {:?}\n", reason),
                Color::Yellow,
            ));
        }
        output.push('\n');
        output.push_str(&self.format_fields(&report.record));
        Ok(output)
    }

    fn format_parse_failure(&self, error: &ScreenerError) -> Result<String> {
        let mut output = self.format_header("CANDIDATE PROFILE");
        output.push_str(&self.colorize(&error.user_message(), Color::Red));
        output.push_str("\n\n");
        output.push_str(&self.format_fields(&CanonicalCandidateRecord::empty()));
        Ok(output)
    }

    fn format_ranking(&self, job: &JobDescriptor, results: &[SimilarityResult]) -> Result<String> {
        let title = if job.title.is_empty() { "job" } else { job.title.as_str() };
        let mut output = self.format_header(&format!("RANKING FOR {}", title.to_uppercase()));

        if results.is_empty() {
            output.push_str("No resumes scored.\n");
            return Ok(output);
        }

        for (idx, result) in results.iter().enumerate() {
            output.push_str(&format!(
                "{:>3}. {} {:.1}% {}\n",
                idx + 1,
                self.colorize(&result.subject_id, Color::Cyan),
                result.combined_score * 100.0,
                self.format_score_badge(result.combined_score)
            ));
            output.push_str(&format!(
                "     semantic {:.3} | keywords {}",
                result.semantic_score, result.keyword_score
            ));
            if !result.matched_skills.is_empty() {
                output.push_str(&format!(" ({})", result.matched_skills.join(", ")));
            }
            output.push('\n');
            if result.is_unreadable {
                output.push_str(&format!(
                    "     {}\n",
                    self.colorize(
                        "NOT EXTRACTABLE: no readable text, likely a scanned document",
                        Color::Red
                    )
                ));
            }
        }
        Ok(output)
    }

    fn format_similar(&self, reference_id: &str, ranked: &[RankedCandidate]) -> Result<String> {
        let mut output = self.format_header(&format!("CANDIDATES SIMILAR TO {}", reference_id));
        if ranked.is_empty() {
            output.push_str("No candidates to compare.\n");
        }
        for (idx, candidate) in ranked.iter().enumerate() {
            output.push_str(&format!(
                "{:>3}. {} {:.1}%\n",
                idx + 1,
                self.colorize(&candidate.subject_id, Color::Cyan),
                candidate.score * 100.0
            ));
        }
        Ok(output)
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn render<T: serde::Serialize>(&self, value: &T) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_record(&self, report: &ParseReport) -> Result<String> {
        self.render(report)
    }

    fn format_parse_failure(&self, error: &ScreenerError) -> Result<String> {
        self.render(&json!({
            "error": error.user_message(),
            "record": CanonicalCandidateRecord::empty(),
        }))
    }

    fn format_ranking(&self, job: &JobDescriptor, results: &[SimilarityResult]) -> Result<String> {
        self.render(&json!({
            "job": job.title,
            "results": results,
        }))
    }

    fn format_similar(&self, reference_id: &str, ranked: &[RankedCandidate]) -> Result<String> {
        self.render(&json!({
            "reference": reference_id,
            "results": ranked,
        }))
    }
}
