/// norminette-diag
///
/// Runs norminette over the given files and prints its findings the way the
/// language server would publish them. Handy for CI and for checking a
/// `norminette-lsp.toml` without an editor.
use norminette_core::cli;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli::run_cli().await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(cli::EXIT_INVOCATION_FAILED);
        }
    }
}
