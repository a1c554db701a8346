//! Living Atlas MCP server entry point.
//!
//! Loads configuration, initializes logging and runs the configured transport.
//! Passing `--http` forces the HTTP transport regardless of `MCP_TRANSPORT`.

use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use living_atlas_mcp::core::{Config, McpServer, TransportService};

#[tokio::main]
async fn main() -> Result<()> {
    let mut config = Config::from_env();

    init_logging(&config.logging.level);

    if std::env::args().skip(1).any(|arg| arg == "--http") {
        #[cfg(feature = "http")]
        {
            config.transport = config.transport.force_http();
        }
        #[cfg(not(feature = "http"))]
        tracing::warn!("--http given but this build has no HTTP transport");
    }

    info!("Starting {} v{}", config.server.name, config.server.version);
    info!("Transport: {}", config.transport.description());

    let transport = TransportService::new(config.transport.clone());
    let server = McpServer::new(config);

    transport.run(server).await?;

    info!("Server shutting down");

    Ok(())
}

/// Logs go to stderr; stdout belongs to the STDIO transport.
fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
