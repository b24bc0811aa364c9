//! End-to-end parsing of generated PDF resumes

use printpdf::{BuiltinFont, Mm, PdfDocument};
use resume_screener::config::ParsingConfig;
use resume_screener::error::ScreenerError;
use resume_screener::processing::document::CANONICAL_FIELDS;
use resume_screener::processing::layout::{extract_layout, LayoutMode};
use resume_screener::processing::{ParseOrchestrator, StrategyKind};

/// One text line per entry: (text, font size in pt, baseline height in mm from the page bottom).
fn build_pdf(lines: &[(&str, f32, f32)]) -> Vec<u8> {
    let (doc, page, layer) = PdfDocument::new("resume", Mm(210.0), Mm(297.0), "Layer 1");
    let font = doc.add_builtin_font(BuiltinFont::Helvetica).unwrap();
    let layer = doc.get_page(page).get_layer(layer);

    for (text, size, y) in lines {
        layer.use_text(*text, *size, Mm(20.0), Mm(*y), &font);
    }

    doc.save_to_bytes().unwrap()
}

fn jane_doe_pdf() -> Vec<u8> {
    build_pdf(&[
        ("JANE DOE", 18.0, 280.0),
        ("jane.doe@example.com", 11.0, 270.0),
        ("+1 555 000 1234", 11.0, 264.0),
        ("Bangalore, Karnataka, India", 11.0, 258.0),
        ("Experience", 13.0, 240.0),
        ("Backend engineer building Python and SQL services.", 11.0, 232.0),
    ])
}

#[test]
fn test_layout_extraction_keeps_reading_order_and_positions() {
    let doc = extract_layout(&jane_doe_pdf(), LayoutMode::LayoutAware).unwrap();

    assert!(doc.full_text.starts_with("JANE DOE"));
    assert!(doc.full_text.contains("Bangalore, Karnataka, India"));

    let name = &doc.spans[0];
    assert_eq!(name.text, "JANE DOE");
    assert_eq!(doc.max_font_size(), Some(name.font_size));
    assert!(name.vertical_position.is_some_and(|y| y < 200.0));

    let basic = extract_layout(&jane_doe_pdf(), LayoutMode::Basic).unwrap();
    assert!(basic.spans.iter().all(|s| s.vertical_position.is_none()));
    assert_eq!(basic.full_text, doc.full_text);
}

#[tokio::test]
async fn test_layout_aware_parse_of_generated_resume() {
    let orchestrator = ParseOrchestrator::new(ParsingConfig::default());

    let report = orchestrator
        .parse_with_report(&jane_doe_pdf(), Some("jane_doe.pdf"))
        .await
        .unwrap();
    let record = &report.record;

    assert_eq!(report.strategy, StrategyKind::LayoutAware);
    assert!(!report.fell_back);
    assert!(record.full_name.starts_with("JANE DOE"));
    assert_eq!(record.email, "jane.doe@example.com");
    assert!(record.phone.chars().filter(|c| c.is_ascii_digit()).count() >= 10);
    assert_eq!(record.country, "India");
    assert_eq!(record.state, "Karnataka");
    assert_eq!(record.city, "Bangalore");
}

#[tokio::test]
async fn test_basic_parse_returns_every_canonical_key() {
    let config = ParsingConfig {
        use_ai_strategy: false,
        ..ParsingConfig::default()
    };
    let orchestrator = ParseOrchestrator::new(config);

    let record = orchestrator.parse(&jane_doe_pdf(), None).await.unwrap();
    let form = record.to_form_map();

    assert_eq!(form.len(), CANONICAL_FIELDS.len());
    assert_eq!(form["full_name"], "JANE DOE");
    assert_eq!(form["city"], "");
    assert_eq!(form["email"], "jane.doe@example.com");
}

#[tokio::test]
async fn test_corrupt_pdf_is_a_parse_error_not_a_validation_error() {
    let orchestrator = ParseOrchestrator::new(ParsingConfig::default());
    let mut bytes = b"%PDF-1.4\n".to_vec();
    bytes.extend(std::iter::repeat(b'#').take(400));

    let err = orchestrator.parse(&bytes, Some("broken.pdf")).await.unwrap_err();

    assert!(matches!(err, ScreenerError::Parse(_)));
    assert!(!err.is_client_error());
}

#[tokio::test]
async fn test_validation_runs_before_decoding() {
    let orchestrator = ParseOrchestrator::new(ParsingConfig::default());

    let tiny = orchestrator.parse(b"%PDF-1.4", Some("tiny.pdf")).await;
    assert!(matches!(tiny, Err(ScreenerError::Validation(_))));

    let wrong_type = orchestrator.parse(&jane_doe_pdf(), Some("resume.docx")).await;
    assert!(matches!(wrong_type, Err(ScreenerError::Validation(_))));
}

#[tokio::test]
async fn test_parse_file_reads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jane.pdf");
    std::fs::write(&path, jane_doe_pdf()).unwrap();

    let report = ParseOrchestrator::new(ParsingConfig::default())
        .parse_file(&path)
        .await
        .unwrap();
    assert_eq!(report.record.email, "jane.doe@example.com");
}
