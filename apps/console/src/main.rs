//! Relay Console entry point.
//!
//! Usage: `relay-console [PAGE_URL]`. The optional argument overrides
//! `page_url` from the configuration file.

mod app;
mod config;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging. Diagnostics go to stderr so they never
    // interleave with the log view on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "starting Relay Console"
    );

    // Load configuration.
    let mut console_config = match config::ConsoleConfig::load() {
        Ok(c) => {
            tracing::info!(page_url = %c.page_url, "configuration loaded");
            c
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to load config, using defaults");
            config::ConsoleConfig::default()
        }
    };

    if let Some(page_url) = std::env::args().nth(1) {
        console_config.page_url = page_url;
    }

    app::run(console_config).await
}
