use anyhow::Context;
use clap::Parser;
use tla_lsp::config::ServerConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tla-lsp")]
#[command(about = "TLA+ completion language server (speaks LSP over stdio)", long_about = None)]
struct Cli {
    /// Log filter, e.g. "debug" or "tla_completion=trace" (overrides RUST_LOG)
    #[arg(long)]
    log_level: Option<String>,

    /// Disable ANSI colors in log output
    #[arg(long)]
    no_color: bool,

    /// Insert Unicode glyphs instead of ASCII operators until the client
    /// says otherwise
    #[arg(long)]
    prefer_unicode: bool,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let config = ServerConfig {
        prefer_unicode: cli.prefer_unicode,
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start the async runtime")?;
    runtime.block_on(tla_lsp::run_server(config));

    Ok(())
}

/// Logs go to stderr; stdout carries the protocol.
fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let filter = match &cli.log_level {
        Some(level) => EnvFilter::try_new(level)
            .with_context(|| format!("invalid log filter {:?}", level))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!cli.no_color)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install the log subscriber: {}", e))
}
