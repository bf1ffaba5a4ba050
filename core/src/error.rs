//! Error types for norminette-core.

use thiserror::Error;

/// The linter could not be run, or finished without producing a report.
///
/// This is surfaced to the user as a notification, never as diagnostics.
#[derive(Debug, Error)]
pub enum LinterInvocationError {
    #[error("No norminette command configured")]
    EmptyCommand,

    #[error("Unterminated quote in norminette command: {0}")]
    UnbalancedQuote(String),

    #[error("Failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command failed: {} exited with {}: {}", .program, describe_code(.code), .message)]
    Failed {
        program: String,
        code: Option<i32>,
        message: String,
    },
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "no status (terminated by signal)".to_string(),
    }
}

/// Server configuration could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}
