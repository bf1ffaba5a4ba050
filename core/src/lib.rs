//! norminette-core
//!
//! Runs the norminette style checker on a file and turns its textual report
//! into positioned diagnostics:
//!
//! ```text
//! LinterCommand::run ──stdout──▶ parse_output ──Finding──▶ map_findings ──▶ DiagnosticRecord
//! ```
//!
//! Parsing and mapping are pure; only the subprocess can fail.

pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod finding;
pub mod parser;
pub mod runner;
pub mod session;
pub mod settings;

use std::path::Path;

pub use diagnostics::{map_findings, DiagnosticRecord, Severity};
pub use error::{ConfigError, LinterInvocationError};
pub use finding::Finding;
pub use parser::{parse_output, OutputFormat};
pub use runner::LinterCommand;
pub use session::{RunToken, Session};
pub use settings::{ErrorDisplayMode, Settings};

/// Run the linter on `path` and map its report with `settings`.
pub async fn check_file(
    path: &Path,
    settings: &Settings,
) -> Result<Vec<DiagnosticRecord>, LinterInvocationError> {
    let command = LinterCommand::new(&settings.command, path)?;
    let stdout = command.run().await?;
    Ok(map_findings(parse_output(settings.output_format, &stdout), settings))
}
