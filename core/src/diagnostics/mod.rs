//! Diagnostic Mapper
//!
//! Turns parsed [`Finding`]s into editor-agnostic [`DiagnosticRecord`]s.
//!
//! # Pipeline
//!
//! 1. **Filtering** - `showErrors = "one"` keeps the first finding, `"all"`
//!    keeps every finding up to `maxErrors`
//! 2. **Positioning** - every record is a point range; a finding without a
//!    column is placed at the start of its line
//! 3. **Linking** - documented identifiers link to their documentation page,
//!    everything else to a fallback page
//!
//! The returned set is complete: publishing it replaces whatever was shown
//! for the document before.

pub mod docs;
pub mod known_errors;

use serde::{Deserialize, Serialize};

use crate::finding::Finding;
use crate::settings::{ErrorDisplayMode, Settings};

/// Label attached to every record.
pub const SOURCE: &str = "norminette";

/// Severity levels for diagnostics
///
/// Every record produced by one run shares the configured severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Ok(Severity::Error),
            "warning" => Ok(Severity::Warning),
            other => Err(format!("unknown severity '{}'", other)),
        }
    }
}

/// Zero-based position in a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    /// Zero-width range at `line`/`character`.
    pub fn point(line: u32, character: u32) -> Self {
        let position = Position { line, character };
        Self {
            start: position,
            end: position,
        }
    }
}

/// A diagnostic ready to be published.
///
/// This mirrors LSP's Diagnostic but stays independent of any editor
/// protocol so the CLI can print the same records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticRecord {
    pub range: Range,
    pub severity: Severity,
    pub source: String,
    /// Rule identifier; `None` when the output format carries none.
    pub code: Option<String>,
    pub message: String,
    /// Documentation page for `code`, or the fallback page.
    pub related_href: String,
}

impl DiagnosticRecord {
    pub fn from_finding(finding: Finding, settings: &Settings) -> Self {
        let related_href = docs::documentation_url(&finding.identifier, &settings.docs_url);
        let code = (!finding.identifier.is_empty()).then_some(finding.identifier);

        Self {
            range: Range::point(finding.line, finding.column.unwrap_or(0)),
            severity: settings.severity,
            source: SOURCE.to_string(),
            code,
            message: finding.message,
            related_href,
        }
    }
}

/// Number of findings that may become diagnostics under `settings`.
pub fn display_limit(settings: &Settings) -> usize {
    match settings.show_errors {
        ErrorDisplayMode::One => 1,
        ErrorDisplayMode::All => settings.max_errors.unwrap_or(usize::MAX),
    }
}

/// Map findings, in parser order, to the records to publish.
///
/// Findings past the display limit are dropped.
pub fn map_findings<I>(findings: I, settings: &Settings) -> Vec<DiagnosticRecord>
where
    I: IntoIterator<Item = Finding>,
{
    findings
        .into_iter()
        .take(display_limit(settings))
        .map(|finding| DiagnosticRecord::from_finding(finding, settings))
        .collect()
}

#[cfg(test)]
mod tests;
