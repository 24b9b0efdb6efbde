//! NASA MCP Server Entry Point
//!
//! Initializes logging, loads configuration from the environment and starts
//! the server on the configured transport.

use anyhow::Result;
use tracing::{Level, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use nasa_mcp_server::core::config::DEMO_API_KEY;
use nasa_mcp_server::core::{Config, McpServer, TransportService};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();

    // Config loading does not log; report the key source once the subscriber is up.
    init_logging(&config.logging.level);

    info!("Starting {} v{}", config.server.name, config.server.version);
    if config.credentials.uses_demo_key() {
        warn!(
            "Using {} for the NASA API. For higher rate limits, \
             set NASA_API_KEY (get your key at https://api.nasa.gov/)",
            DEMO_API_KEY
        );
    } else {
        info!("NASA API key loaded from environment");
    }

    let server = McpServer::new(config.clone());

    let transport = TransportService::new(config.transport);
    transport.run(server).await?;

    info!("Server shutting down");

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Logs go to stderr so they never interleave with STDIO protocol frames.
fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" | "warning" => Level::WARN,
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
