//! A single issue reported by the linter.

use serde::{Deserialize, Serialize};

/// One parsed issue from the linter's raw output.
///
/// Findings are built fresh for every parse and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Rule identifier, e.g. `SPACE_REPLACE_TAB`. Empty when the output format has none.
    pub identifier: String,
    /// Zero-based line.
    pub line: u32,
    /// Column as printed by the linter; `None` when the line carried no column.
    pub column: Option<u32>,
    /// Normalized message text.
    pub message: String,
}

impl Finding {
    pub fn new(
        identifier: impl Into<String>,
        line: u32,
        column: Option<u32>,
        message: &str,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            line,
            column,
            message: normalize_message(message),
        }
    }
}

/// Convert a one-based line as printed by the linter into a zero-based line.
///
/// Zero, negative, overflowing or otherwise unparsable input gives 0.
pub fn normalize_line(raw: &str) -> u32 {
    raw.trim()
        .parse::<i64>()
        .ok()
        .and_then(|n| u32::try_from(n.saturating_sub(1)).ok())
        .unwrap_or(0)
}

/// Trim leading whitespace and upper-case the first character.
pub fn normalize_message(raw: &str) -> String {
    let trimmed = raw.trim_start();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_line_is_zero_based() {
        assert_eq!(normalize_line("5"), 4);
        assert_eq!(normalize_line("1"), 0);
    }

    #[test]
    fn test_normalize_line_floors_at_zero() {
        assert_eq!(normalize_line("0"), 0);
        assert_eq!(normalize_line("-3"), 0);
        assert_eq!(normalize_line("abc"), 0);
        assert_eq!(normalize_line(""), 0);
        assert_eq!(normalize_line("99999999999999999999999"), 0);
    }

    #[test]
    fn test_normalize_message() {
        assert_eq!(normalize_message("\t  use spaces"), "Use spaces");
        assert_eq!(normalize_message("Already upper"), "Already upper");
        assert_eq!(normalize_message("   "), "");
        assert_eq!(normalize_message("éclair"), "Éclair");
    }

    #[test]
    fn test_new_normalizes_message() {
        let finding = Finding::new("TOO_MANY_ARGS", 3, Some(1), " function has more than 4 arguments");
        assert_eq!(finding.message, "Function has more than 4 arguments");
        assert_eq!(finding.identifier, "TOO_MANY_ARGS");
    }
}
