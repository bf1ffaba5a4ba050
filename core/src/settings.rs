//! Per-document settings as exposed to the editor.
//!
//! The editor sends these under the [`SECTION`] configuration section using
//! camelCase keys (`command`, `showErrors`, `maxErrors`, ...).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::diagnostics::docs::DEFAULT_DOCS_URL;
use crate::diagnostics::Severity;
use crate::parser::OutputFormat;

/// Configuration section requested from the client.
pub const SECTION: &str = "42norminette";

pub const DEFAULT_COMMAND: &str = "norminette";

/// Whether only the first finding or every finding becomes a diagnostic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorDisplayMode {
    One,
    #[default]
    All,
}

impl std::str::FromStr for ErrorDisplayMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "one" => Ok(ErrorDisplayMode::One),
            "all" => Ok(ErrorDisplayMode::All),
            other => Err(format!("unknown display mode '{}', expected 'one' or 'all'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Linter invocation; the file path is appended as the last argument.
    /// Quote a program path that contains spaces.
    pub command: String,
    pub show_errors: ErrorDisplayMode,
    /// Upper bound on published diagnostics in `all` mode.
    pub max_errors: Option<usize>,
    pub output_format: OutputFormat,
    pub severity: Severity,
    /// Root of the documentation site used for `codeDescription` links.
    pub docs_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            command: DEFAULT_COMMAND.to_string(),
            show_errors: ErrorDisplayMode::All,
            max_errors: None,
            output_format: OutputFormat::Tabbed,
            severity: Severity::Error,
            docs_url: DEFAULT_DOCS_URL.to_string(),
        }
    }
}

impl Settings {
    /// Overlay a client-provided settings object on top of `fallback`.
    ///
    /// Missing or `null` keys keep the fallback value. Anything that does
    /// not deserialize yields `fallback` unchanged.
    pub fn from_value(value: &Value, fallback: &Settings) -> Settings {
        let Value::Object(overrides) = value else {
            return fallback.clone();
        };

        let mut merged = match serde_json::to_value(fallback) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        };
        for (key, v) in overrides {
            if !v.is_null() {
                merged.insert(key.clone(), v.clone());
            }
        }

        match serde_json::from_value(Value::Object(merged)) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Ignoring malformed {} settings: {}", SECTION, e);
                fallback.clone()
            }
        }
    }
}
