//! Output parser for the linter's textual report.
//!
//! The linter prints one finding per line. Two layouts are supported and the
//! caller picks one explicitly through [`OutputFormat`]:
//!
//! ```text
//! Tabbed:  \tSPACE_REPLACE_TAB (line: 5, col: 3):\tFound space when expecting tab
//!          Error: TOO_MANY_ARGS    (line:  12, col:   1):\tFunction has more than 4 arguments
//! Colon:   Error (line 12, col 4): Space before function name
//! ```
//!
//! Any line that does not fit the selected layout is an ignorable line
//! (banners, `file.c: OK!` summaries, blank lines) and yields no finding.
//! In the colon layout a finding without a line number (such as
//! `Error: 42 header not at top of the file`) is kept and lands on line 0.

use std::str::Lines;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::finding::{normalize_line, Finding};


/// Layout of the linter's report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Indented lines carrying an identifier, line and column.
    #[default]
    Tabbed,
    /// `<location>: <message>` lines without an identifier.
    Colon,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tabbed" => Ok(OutputFormat::Tabbed),
            "colon" => Ok(OutputFormat::Colon),
            other => Err(format!("unknown output format '{}'", other)),
        }
    }
}

/// Outcome of matching one line of output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    Finding(Finding),
    /// Summary, banner or any other line outside the grammar.
    Ignorable,
}

fn tabbed_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^(?:\t|Error:\s*)([A-Z]+(?:_[A-Z]+)*)\s+\(line:\s*([0-9]+),\s*col:\s*([0-9]+)\):[\t ]*(.*)$",
        )
        .expect("tabbed finding pattern is valid")
    })
}

/// Match a single line against the grammar of `format`.
pub fn parse_line(format: OutputFormat, line: &str) -> ParsedLine {
    let parsed = match format {
        OutputFormat::Tabbed => parse_tabbed(line),
        OutputFormat::Colon => parse_colon(line),
    };
    parsed.map_or(ParsedLine::Ignorable, ParsedLine::Finding)
}

fn parse_tabbed(line: &str) -> Option<Finding> {
    let caps = tabbed_pattern().captures(line)?;
    Some(Finding::new(
        &caps[1],
        normalize_line(&caps[2]),
        caps[3].parse().ok(),
        &caps[4],
    ))
}

/// Per-file banner printed before the colon layout's findings.
const COLON_BANNER: &str = "Norme:";

/// Per-file verdicts printed after a file name in the colon layout.
const COLON_VERDICTS: &[&str] = &["OK!", "KO!", "Error!"];

fn parse_colon(line: &str) -> Option<Finding> {
    if line.starts_with(COLON_BANNER) {
        return None;
    }
    let (location, message) = line.split_once(':')?;
    if COLON_VERDICTS.contains(&message.trim()) {
        return None;
    }

    let mut numbers = location
        .split(|c: char| !c.is_ascii_digit())
        .filter(|run| !run.is_empty());

    // No digits in the location: the finding is about the file as a whole.
    let line_no = numbers.next().map_or(0, normalize_line);
    let column = numbers.next().and_then(|run| run.parse().ok());

    Some(Finding::new(String::new(), line_no, column, message))
}

/// Lazy sequence of findings over one captured report.
///
/// Cloning the iterator restarts it from the same position; no state is
/// shared between calls to [`parse_output`].
#[derive(Debug, Clone)]
pub struct Findings<'a> {
    format: OutputFormat,
    lines: Lines<'a>,
}

impl Iterator for Findings<'_> {
    type Item = Finding;

    fn next(&mut self) -> Option<Finding> {
        for line in self.lines.by_ref() {
            if let ParsedLine::Finding(finding) = parse_line(self.format, line) {
                return Some(finding);
            }
        }
        None
    }
}

/// Parse the linter's captured stdout into findings, preserving output order.
pub fn parse_output(format: OutputFormat, text: &str) -> Findings<'_> {
    Findings {
        format,
        lines: text.lines(),
    }
}
