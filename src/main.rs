use anyhow::Context;
use clap::Parser;
use configuration::{ServeArgs, init_tracing, load_config};

/// The main entry point for the overnight dashboard server.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is not an error.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let args = ServeArgs::parse();

    let mut config = load_config(&args.config)
        .with_context(|| format!("failed to load configuration from {}", args.config.display()))?;
    config.apply_overrides(&args);
    config.validate()?;

    // Keep the guard alive so buffered file logs are flushed on exit.
    let _log_guard = init_tracing(&config.logging)?;
    tracing::info!(
        config = %args.config.display(),
        data_dir = %config.data.directory.display(),
        session_open = %config.session.open,
        "Starting overnight dashboard."
    );

    web_server::run_server(config).await
}
