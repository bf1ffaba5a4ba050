use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::config::ServerConfig;
use crate::diagnostics::docs::documentation_url;
use crate::diagnostics::known_errors::KNOWN_ERRORS;
use crate::diagnostics::{DiagnosticRecord, Severity};
use crate::parser::OutputFormat;
use crate::settings::{ErrorDisplayMode, Settings};

/// Exit status when every file is clean.
pub const EXIT_CLEAN: i32 = 0;
/// Exit status when at least one diagnostic was reported.
pub const EXIT_DIAGNOSTICS: i32 = 1;
/// Exit status when the linter could not be run for some file.
pub const EXIT_INVOCATION_FAILED: i32 = 2;

#[derive(Parser)]
#[command(name = "norminette-diag")]
#[command(about = "Run norminette and print its findings as diagnostics", long_about = None)]
pub struct Cli {
    /// Path to config file (overrides default search)
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Lint files and print diagnostics
    Check {
        /// Files to check
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Linter command (the file path is appended)
        #[arg(long)]
        command: Option<String>,

        /// Show only the first finding per file, or all of them
        #[arg(long)]
        show_errors: Option<ErrorDisplayMode>,

        /// Maximum diagnostics per file
        #[arg(long)]
        max_errors: Option<usize>,

        /// Layout of the linter's report: tabbed, colon
        #[arg(long)]
        format: Option<OutputFormat>,

        /// Severity reported for every finding: error, warning
        #[arg(long)]
        severity: Option<Severity>,

        /// Print JSON instead of one line per diagnostic
        #[arg(long)]
        json: bool,
    },

    /// List documented error identifiers and their pages
    Errors {
        /// Documentation root (defaults to the configured one)
        #[arg(long)]
        docs_url: Option<String>,
    },
}

#[derive(Serialize)]
struct FileReport {
    path: PathBuf,
    diagnostics: Vec<DiagnosticRecord>,
}

/// Run the CLI by parsing process arguments. Returns the exit status.
pub async fn run_cli() -> Result<i32> {
    let cli = Cli::parse();
    run_cli_with_args(cli).await
}

/// Run the CLI with provided arguments
pub async fn run_cli_from_args(args: Vec<String>) -> Result<i32> {
    let cli = Cli::parse_from(args);
    run_cli_with_args(cli).await
}

async fn run_cli_with_args(cli: Cli) -> Result<i32> {
    let config = match &cli.config {
        Some(path) => ServerConfig::load_from(Some(path.as_str())),
        None => ServerConfig::load(),
    }
    .context("Failed to load configuration")?;

    match cli.command {
        Commands::Check {
            files,
            command,
            show_errors,
            max_errors,
            format,
            severity,
            json,
        } => {
            let mut settings = config.defaults;
            if let Some(command) = command {
                settings.command = command;
            }
            if let Some(mode) = show_errors {
                settings.show_errors = mode;
            }
            if max_errors.is_some() {
                settings.max_errors = max_errors;
            }
            if let Some(format) = format {
                settings.output_format = format;
            }
            if let Some(severity) = severity {
                settings.severity = severity;
            }

            check(&files, &settings, json).await
        }

        Commands::Errors { docs_url } => {
            let docs_url = docs_url.unwrap_or(config.defaults.docs_url);
            for id in KNOWN_ERRORS {
                println!("{:<24} {}", id, documentation_url(id, &docs_url));
            }
            Ok(EXIT_CLEAN)
        }
    }
}

async fn check(files: &[PathBuf], settings: &Settings, json: bool) -> Result<i32> {
    let mut reports = Vec::with_capacity(files.len());
    let mut failed = false;

    for file in files {
        let path = std::path::absolute(file)
            .with_context(|| format!("Cannot resolve {}", file.display()))?;

        match crate::check_file(&path, settings).await {
            Ok(diagnostics) => reports.push(FileReport { path, diagnostics }),
            Err(e) => {
                tracing::error!(file = %file.display(), "{}", e);
                eprintln!("{}: {}", file.display(), e);
                failed = true;
            }
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            for diagnostic in &report.diagnostics {
                println!("{}", format_diagnostic(&report.path, diagnostic));
            }
        }
    }

    let found = reports.iter().any(|r| !r.diagnostics.is_empty());
    Ok(if failed {
        EXIT_INVOCATION_FAILED
    } else if found {
        EXIT_DIAGNOSTICS
    } else {
        EXIT_CLEAN
    })
}

/// `path:line:col: severity[CODE]: message`, with a one-based line.
pub fn format_diagnostic(path: &Path, diagnostic: &DiagnosticRecord) -> String {
    let code = diagnostic
        .code
        .as_deref()
        .map(|c| format!("[{}]", c))
        .unwrap_or_default();

    format!(
        "{}:{}:{}: {}{}: {}",
        path.display(),
        diagnostic.range.start.line + 1,
        diagnostic.range.start.character,
        diagnostic.severity.as_str(),
        code,
        diagnostic.message
    )
}
