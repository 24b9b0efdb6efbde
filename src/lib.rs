//! NASA MCP Server Library
//!
//! This crate exposes two of NASA's public APIs as Model Context Protocol
//! tools:
//!
//! - `get_apod_data`: the Astronomy Picture of the Day, optionally for a date
//! - `search_images_data`: a keyword search of the NASA Image and Video Library
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the MCP server and transports
//! - **domains**: business logic
//!   - **tools**: the NASA HTTP helper, fetchers and MCP tool definitions
//!
//! # Example
//!
//! ```rust,no_run
//! use nasa_mcp_server::{core::McpServer, core::Config, core::TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let transport = TransportService::new(config.transport.clone());
//!     transport.run(McpServer::new(config)).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

pub use core::{Config, Error, McpServer, Result};
