//! Server-wide configuration.
//!
//! Provides the default [`Settings`] used when the editor cannot answer
//! `workspace/configuration`, and as the base that editor settings are
//! overlaid on. Sources, later ones winning:
//!
//! 1. Built-in defaults
//! 2. `norminette-lsp.toml` in the working directory, or the file named by
//!    `NORMINETTE_CONFIG_PATH`
//! 3. `NORMINETTE_*` environment variables (`.env` is loaded first)
//!
//! ```toml
//! command = "norminette"
//! show_errors = "all"
//! max_errors = 20
//! output_format = "tabbed"
//! severity = "error"
//! ```

use std::str::FromStr;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::ConfigError;
use crate::settings::Settings;

pub const CONFIG_PATH_ENV: &str = "NORMINETTE_CONFIG_PATH";
const DEFAULT_CONFIG_NAME: &str = "norminette-lsp";
const ENV_PREFIX: &str = "NORMINETTE";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerConfig {
    pub defaults: Settings,
}

/// Shape of the file / environment layer. Every key is optional.
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    command: Option<String>,
    show_errors: Option<String>,
    max_errors: Option<usize>,
    output_format: Option<String>,
    severity: Option<String>,
    docs_url: Option<String>,
}

impl ServerConfig {
    /// Load using `NORMINETTE_CONFIG_PATH` or the default file name.
    pub fn load() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        let path = std::env::var(CONFIG_PATH_ENV).ok();
        Self::load_from(path.as_deref())
    }

    /// Load from an explicit file. A missing explicit file is an error; a
    /// missing default file is not.
    pub fn load_from(path: Option<&str>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => File::with_name(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        let raw: RawConfig = Config::builder()
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        let config = Self::from_raw(raw)?;
        tracing::debug!(?config, "Loaded server configuration");
        Ok(config)
    }

    fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        let mut defaults = Settings::default();

        if let Some(command) = raw.command {
            defaults.command = command;
        }
        if let Some(mode) = raw.show_errors {
            defaults.show_errors = parse_value("show_errors", &mode)?;
        }
        if let Some(max) = raw.max_errors {
            defaults.max_errors = Some(max);
        }
        if let Some(format) = raw.output_format {
            defaults.output_format = parse_value("output_format", &format)?;
        }
        if let Some(severity) = raw.severity {
            defaults.severity = parse_value("severity", &severity)?;
        }
        if let Some(url) = raw.docs_url {
            defaults.docs_url = url;
        }

        Ok(Self { defaults })
    }
}

fn parse_value<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr<Err = String>,
{
    value
        .parse()
        .map_err(|message| ConfigError::Invalid { key, message })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Severity;
    use crate::parser::OutputFormat;
    use crate::settings::ErrorDisplayMode;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp config");
        file.write_all(contents.as_bytes()).expect("write config");
        file
    }

    #[test]
    fn test_from_raw_defaults() {
        let config = ServerConfig::from_raw(RawConfig::default()).expect("defaults are valid");
        assert_eq!(config.defaults, Settings::default());
    }

    #[test]
    fn test_from_raw_overrides() {
        let raw = RawConfig {
            command: Some("python3 -m norminette".to_string()),
            show_errors: Some("one".to_string()),
            max_errors: Some(10),
            output_format: Some("colon".to_string()),
            severity: Some("warning".to_string()),
            docs_url: None,
        };

        let defaults = ServerConfig::from_raw(raw).expect("valid").defaults;
        assert_eq!(defaults.command, "python3 -m norminette");
        assert_eq!(defaults.show_errors, ErrorDisplayMode::One);
        assert_eq!(defaults.max_errors, Some(10));
        assert_eq!(defaults.output_format, OutputFormat::Colon);
        assert_eq!(defaults.severity, Severity::Warning);
    }

    #[test]
    fn test_from_raw_rejects_bad_enum() {
        let raw = RawConfig {
            show_errors: Some("several".to_string()),
            ..RawConfig::default()
        };

        let err = ServerConfig::from_raw(raw).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "show_errors", .. }));
    }

    #[test]
    fn test_load_from_file() {
        let file = write_config(
            r#"
command = "/usr/local/bin/norminette"
show_errors = "one"
max_errors = 5
"#,
        );
        let path = file.path().to_str().expect("utf-8 temp path");

        let config = ServerConfig::load_from(Some(path)).expect("config loads");
        assert_eq!(config.defaults.command, "/usr/local/bin/norminette");
        assert_eq!(config.defaults.show_errors, ErrorDisplayMode::One);
        assert_eq!(config.defaults.max_errors, Some(5));
    }

    #[test]
    fn test_load_from_missing_explicit_file_fails() {
        let result = ServerConfig::load_from(Some("/nonexistent/norminette-lsp.toml"));
        assert!(matches!(result, Err(ConfigError::Load(_))));
    }
}
