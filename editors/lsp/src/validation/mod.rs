//! Conversion from core diagnostic records to LSP diagnostics.

use norminette_core::diagnostics::{DiagnosticRecord, Position, Range, Severity};
use tower_lsp::lsp_types::{
    self, CodeDescription, DiagnosticRelatedInformation, DiagnosticSeverity, Location,
    NumberOrString, Url,
};

fn to_lsp_position(position: Position) -> lsp_types::Position {
    lsp_types::Position {
        line: position.line,
        character: position.character,
    }
}

fn to_lsp_range(range: Range) -> lsp_types::Range {
    lsp_types::Range {
        start: to_lsp_position(range.start),
        end: to_lsp_position(range.end),
    }
}

pub fn to_lsp_severity(severity: Severity) -> DiagnosticSeverity {
    match severity {
        Severity::Error => DiagnosticSeverity::ERROR,
        Severity::Warning => DiagnosticSeverity::WARNING,
    }
}

/// Convert a record to LSP Diagnostic type
///
/// `related` is the document's URI when the client accepts related
/// information; the entry points back at the diagnostic's own range.
pub fn to_lsp_diagnostic(record: &DiagnosticRecord, related: Option<&Url>) -> lsp_types::Diagnostic {
    let range = to_lsp_range(record.range);

    let related_information = related.map(|uri| {
        vec![DiagnosticRelatedInformation {
            location: Location {
                uri: uri.clone(),
                range,
            },
            message: record.message.clone(),
        }]
    });

    lsp_types::Diagnostic {
        range,
        severity: Some(to_lsp_severity(record.severity)),
        code: record.code.clone().map(NumberOrString::String),
        code_description: Url::parse(&record.related_href)
            .ok()
            .map(|href| CodeDescription { href }),
        source: Some(record.source.clone()),
        message: record.message.clone(),
        related_information,
        ..Default::default()
    }
}
