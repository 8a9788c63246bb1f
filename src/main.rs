//! Pulse: a single-endpoint health check service.
//!
//! This is the application entry point. It initializes tracing, loads `PORT`
//! and `SERVICE` from the environment, prints the startup line and serves the
//! health route until the process is killed.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pulse::config::{Config, CONFIG_ERROR_EXIT_CODE, DEFAULT_LOG_FILTER, SERVER_ERROR_PREFIX};
use pulse::{create_router, start_server};

/// Pulse: answers `OK` on /health
#[derive(Parser, Debug)]
#[command(name = "pulse", version, about)]
struct Args {
    /// Log level filter (e.g., "pulse=debug")
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize tracing with priority: CLI > env > default.
    // Diagnostics go to stderr; stdout carries only the three plain lines.
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&log_filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            println!("{err}");
            std::process::exit(CONFIG_ERROR_EXIT_CODE);
        }
    };

    tracing::info!(service = %config.service, port = %config.port, "Loaded configuration");
    println!("{}", config.startup_message());

    // Start server. A listener failure is reported but the process still
    // exits with status 0.
    if let Err(err) = start_server(create_router(), &config).await {
        tracing::error!(error = %err, "Server stopped");
        println!("{SERVER_ERROR_PREFIX}{err}");
    }
}
