//! Tests for the diagnostic mapper

use super::*;
use crate::parser::{parse_output, OutputFormat};

// ============================================================================
// Helper Functions
// ============================================================================

fn finding(identifier: &str, line: u32, column: Option<u32>) -> Finding {
    Finding::new(identifier, line, column, "message")
}

fn findings(count: u32) -> Vec<Finding> {
    (0..count).map(|i| finding("TOO_MANY_ARGS", i, Some(1))).collect()
}

fn settings(show_errors: ErrorDisplayMode, max_errors: Option<usize>) -> Settings {
    Settings {
        show_errors,
        max_errors,
        ..Settings::default()
    }
}

// ============================================================================
// Filtering
// ============================================================================

#[test]
fn test_one_mode_keeps_first_finding() {
    let records = map_findings(findings(5), &settings(ErrorDisplayMode::One, None));
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].range.start.line, 0);
}

#[test]
fn test_one_mode_with_no_findings() {
    let records = map_findings(Vec::new(), &settings(ErrorDisplayMode::One, None));
    assert!(records.is_empty());
}

#[test]
fn test_one_mode_ignores_max() {
    let records = map_findings(findings(5), &settings(ErrorDisplayMode::One, Some(3)));
    assert_eq!(records.len(), 1);
}

#[test]
fn test_all_mode_unbounded() {
    let records = map_findings(findings(40), &settings(ErrorDisplayMode::All, None));
    assert_eq!(records.len(), 40);
}

#[test]
fn test_all_mode_respects_max() {
    for (count, max, expected) in [(5, 3, 3), (2, 3, 2), (4, 0, 0), (3, 3, 3)] {
        let records = map_findings(findings(count), &settings(ErrorDisplayMode::All, Some(max)));
        assert_eq!(records.len(), expected, "count={} max={}", count, max);
    }
}

#[test]
fn test_all_mode_keeps_parser_order() {
    let input = vec![finding("B_RULE", 9, Some(1)), finding("A_RULE", 1, Some(1))];
    let records = map_findings(input, &Settings::default());

    let codes: Vec<_> = records.iter().map(|r| r.code.clone().unwrap_or_default()).collect();
    assert_eq!(codes, vec!["B_RULE", "A_RULE"]);
}

// ============================================================================
// Record Shape
// ============================================================================

#[test]
fn test_record_is_point_range() {
    let records = map_findings(vec![finding("SPACE_REPLACE_TAB", 4, Some(3))], &Settings::default());

    let record = &records[0];
    assert_eq!(record.range, Range::point(4, 3));
    assert_eq!(record.range.start, record.range.end);
    assert_eq!(record.source, "norminette");
    assert_eq!(record.code.as_deref(), Some("SPACE_REPLACE_TAB"));
    assert_eq!(record.severity, Severity::Error);
}

#[test]
fn test_missing_column_degrades_to_line_start() {
    let records = map_findings(vec![finding("", 6, None)], &Settings::default());

    assert_eq!(records[0].range, Range::point(6, 0));
    assert_eq!(records[0].code, None);
}

#[test]
fn test_configured_severity() {
    let settings = Settings {
        severity: Severity::Warning,
        ..Settings::default()
    };
    let records = map_findings(findings(2), &settings);
    assert!(records.iter().all(|r| r.severity == Severity::Warning));
}

#[test]
fn test_known_identifier_links_to_docs() {
    let records = map_findings(vec![finding("TOO_MANY_ARGS", 0, Some(1))], &Settings::default());
    assert_eq!(
        records[0].related_href,
        format!("{}/docs/errors/too-many-args", docs::DEFAULT_DOCS_URL)
    );
}

#[test]
fn test_unknown_identifier_uses_fallback() {
    let records = map_findings(
        vec![finding("MADE_UP_CODE", 0, Some(1)), finding("", 0, None)],
        &Settings::default(),
    );
    assert!(records.iter().all(|r| r.related_href == docs::FALLBACK_URL));
}

// ============================================================================
// Parser To Mapper
// ============================================================================

#[test]
fn test_report_to_records() {
    let output = "ft_putnbr.c: KO!\n\
                  \tSPACE_REPLACE_TAB (line: 5, col: 3):\tUse spaces\n\
                  \tMADE_UP_CODE (line: 9, col: 12):\tsomething new\n";

    let records = map_findings(parse_output(OutputFormat::Tabbed, output), &Settings::default());

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].message, "Use spaces");
    assert_eq!(records[1].range, Range::point(8, 12));
    assert_eq!(records[1].message, "Something new");
    assert_eq!(records[1].related_href, docs::FALLBACK_URL);
}

#[test]
fn test_record_serializes_camel_case() {
    let records = map_findings(findings(1), &Settings::default());
    let value = serde_json::to_value(&records[0]).expect("record serializes");
    assert!(value.get("relatedHref").is_some());
    assert_eq!(value["severity"], "error");
}
