//! PDF decoding into positioned text spans

use crate::error::{Result, ScreenerError};
use crate::processing::document::{LayoutDocument, TextSpan};
use log::debug;
use pdf_extract::{Document, MediaBox, OutputDev, OutputError, Transform};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

/// How much positional metadata the extractor keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// Font size and uppercase ratio only.
    Basic,
    /// Also records each first-page span's distance from the top of the page.
    LayoutAware,
}

#[derive(Debug)]
struct PendingSpan {
    text: String,
    font_size: f64,
    x: f64,
    y: f64,
}

#[derive(Debug)]
struct CollectedSpan {
    text: String,
    font_size: f64,
    x: f64,
    y: f64,
    page_index: usize,
}

/// Groups characters into spans of uniform font size on one line.
struct SpanCollector {
    page_index: usize,
    page_height: f64,
    current: Option<PendingSpan>,
    last_end: f64,
    spans: Vec<CollectedSpan>,
}

impl SpanCollector {
    fn new() -> Self {
        Self {
            page_index: 0,
            page_height: 0.0,
            current: None,
            last_end: 0.0,
            spans: Vec::new(),
        }
    }

    fn flush(&mut self) {
        if let Some(pending) = self.current.take() {
            let text = pending.text.trim();
            if !text.is_empty() {
                self.spans.push(CollectedSpan {
                    text: text.to_string(),
                    font_size: pending.font_size,
                    x: pending.x,
                    y: pending.y,
                    page_index: self.page_index,
                });
            }
        }
    }
}

impl OutputDev for SpanCollector {
    fn begin_page(
        &mut self,
        page_num: u32,
        media_box: &MediaBox,
        _art_box: Option<(f64, f64, f64, f64)>,
    ) -> std::result::Result<(), OutputError> {
        self.flush();
        self.page_index = page_num.saturating_sub(1) as usize;
        self.page_height = media_box.ury - media_box.lly;
        self.last_end = 0.0;
        Ok(())
    }

    fn end_page(&mut self) -> std::result::Result<(), OutputError> {
        self.flush();
        Ok(())
    }

    fn output_character(
        &mut self,
        trm: &Transform,
        width: f64,
        _spacing: f64,
        font_size: f64,
        char: &str,
    ) -> std::result::Result<(), OutputError> {
        // Flip into top-left origin coordinates.
        let x = trm.m31;
        let y = self.page_height - trm.m32;

        let vx = font_size * (trm.m11 + trm.m21);
        let vy = font_size * (trm.m12 + trm.m22);
        let size = (vx * vy).abs().sqrt();

        let breaks_span = match &self.current {
            Some(pending) => {
                (y - pending.y).abs() > size * 0.5
                    || (size - pending.font_size).abs() > 0.5
                    || x + size < self.last_end
            }
            None => false,
        };
        if breaks_span {
            self.flush();
        }

        match self.current.as_mut() {
            Some(pending) => {
                if x > self.last_end + size * 0.1 && !pending.text.ends_with(' ') {
                    pending.text.push(' ');
                }
                pending.text.push_str(char);
            }
            None => {
                self.current = Some(PendingSpan {
                    text: char.to_string(),
                    font_size: size,
                    x,
                    y,
                });
            }
        }

        self.last_end = x + width * size;
        Ok(())
    }

    fn begin_word(&mut self) -> std::result::Result<(), OutputError> {
        Ok(())
    }

    fn end_word(&mut self) -> std::result::Result<(), OutputError> {
        Ok(())
    }

    fn end_line(&mut self) -> std::result::Result<(), OutputError> {
        Ok(())
    }
}

/// Decode `bytes` into full text and spans in reading order.
///
/// The PDF library can panic on malformed input; those panics surface as
/// [`ScreenerError::DocumentParse`] like any other decode failure.
pub fn extract_layout(bytes: &[u8], mode: LayoutMode) -> Result<LayoutDocument> {
    match panic::catch_unwind(AssertUnwindSafe(|| collect_spans(bytes))) {
        Ok(result) => result.map(|spans| build_document(spans, mode)),
        Err(payload) => Err(ScreenerError::DocumentParse(format!(
            "PDF decoder panicked: {}",
            panic_message(payload.as_ref())
        ))),
    }
}

fn collect_spans(bytes: &[u8]) -> Result<Vec<CollectedSpan>> {
    let mut doc = Document::load_mem(bytes)
        .map_err(|e| ScreenerError::DocumentParse(format!("Failed to load PDF: {}", e)))?;

    if doc.is_encrypted() {
        doc.decrypt("").map_err(|e| {
            ScreenerError::DocumentParse(format!("Encrypted PDF could not be opened: {}", e))
        })?;
    }

    let mut collector = SpanCollector::new();
    pdf_extract::output_doc(&doc, &mut collector)?;
    collector.flush();

    debug!("Collected {} text spans", collector.spans.len());
    Ok(collector.spans)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Assign each span a line number so that spans on the same baseline sort by x.
fn order_spans(mut spans: Vec<CollectedSpan>) -> Vec<(usize, CollectedSpan)> {
    spans.sort_by(|a, b| {
        a.page_index
            .cmp(&b.page_index)
            .then(a.y.total_cmp(&b.y))
            .then(a.x.total_cmp(&b.x))
    });

    let mut lines: Vec<(usize, CollectedSpan)> = Vec::with_capacity(spans.len());
    let mut line = 0usize;
    let mut anchor: Option<(usize, f64)> = None;

    for span in spans {
        let tolerance = (span.font_size * 0.5).max(2.0);
        match anchor {
            Some((page, y)) if page == span.page_index && (span.y - y).abs() <= tolerance => {}
            Some(_) => {
                line += 1;
                anchor = Some((span.page_index, span.y));
            }
            None => anchor = Some((span.page_index, span.y)),
        }
        lines.push((line, span));
    }

    lines.sort_by(|(line_a, a), (line_b, b)| line_a.cmp(line_b).then(a.x.total_cmp(&b.x)));
    lines
}

fn build_document(spans: Vec<CollectedSpan>, mode: LayoutMode) -> LayoutDocument {
    let ordered = order_spans(spans);

    let mut full_text = String::new();
    let mut text_spans = Vec::with_capacity(ordered.len());
    let mut previous: Option<(usize, usize)> = None;

    for (line, span) in ordered {
        match previous {
            Some((page, _)) if page != span.page_index => full_text.push_str("\n\n"),
            Some((_, prev_line)) if prev_line != line => full_text.push('\n'),
            Some(_) => full_text.push(' '),
            None => {}
        }
        full_text.push_str(&span.text);
        previous = Some((span.page_index, line));

        let mut text_span = TextSpan::new(span.text, span.font_size as f32, span.page_index);
        text_span.x_position = span.x as f32;
        if mode == LayoutMode::LayoutAware && span.page_index == 0 {
            text_span.vertical_position = Some(span.y as f32);
        }
        text_spans.push(text_span);
    }

    LayoutDocument {
        full_text,
        spans: text_spans,
    }
}
