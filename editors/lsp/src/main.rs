//! Norminette Language Server
//!
//! Runs the norminette style checker on C sources and reports its findings
//! as LSP diagnostics, with quick fixes pointing at the documentation.
//!
//! # Usage
//!
//! ```bash
//! norminette-lsp --stdio
//! ```
//!
//! The server communicates over stdin/stdout using the LSP protocol.
//! Server-wide defaults come from `norminette-lsp.toml` and `NORMINETTE_*`
//! environment variables; editors override them per document through the
//! `42norminette` settings section.

use norminette_core::config::ServerConfig;
use tower_lsp::{LspService, Server};
use tracing_subscriber::EnvFilter;

mod backend;
mod capabilities;
mod quickfix;
mod validation;


use backend::NorminetteBackend;

#[tokio::main]
async fn main() {
    // Set up logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let use_stdio = args.iter().any(|a| a == "--stdio");

    if !use_stdio {
        eprintln!("Norminette Language Server");
        eprintln!("Usage: norminette-lsp --stdio");
        eprintln!();
        eprintln!("Options:");
        eprintln!("  --stdio    Use stdin/stdout for communication (required)");
        std::process::exit(1);
    }

    let config = ServerConfig::load().unwrap_or_else(|e| {
        tracing::warn!("{}; falling back to built-in defaults", e);
        ServerConfig::default()
    });
    tracing::info!(command = %config.defaults.command, "Starting norminette language server");

    // Create the LSP service
    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(|client| NorminetteBackend::new(client, config));

    Server::new(stdin, stdout, socket).serve(service).await;
}
