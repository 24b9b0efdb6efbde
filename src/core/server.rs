//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating tool calls to the tools domain.
//!
//! ## Tool Architecture
//!
//! Tools are defined in `domains/tools/definitions/` with one file per tool.
//! Each tool defines:
//! - Parameters struct (for rmcp)
//! - `execute()` method (core logic)
//! - `http_handler()` method (called via ToolRegistry for HTTP transport)
//!
//! The ToolRouter is built in `domains/tools/router.rs`.

use rmcp::{ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler};
use std::sync::Arc;

use super::config::Config;
use crate::domains::tools::build_tool_router;

#[cfg(feature = "http")]
use crate::domains::tools::ToolRegistry;

/// Instructions sent to clients on initialization.
pub const SERVER_INSTRUCTIONS: &str = "This server exposes NASA's public APIs. \
     Use get_apod_data for the Astronomy Picture of the Day and \
     search_images_data to search the NASA Image and Video Library.";

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    pub fn new(config: Config) -> Self {
        let config = Arc::new(config);

        Self {
            tool_router: build_tool_router::<Self>(config.clone()),
            config,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    ///
    /// The NASA requests are blocking, so dispatch happens on the blocking
    /// thread pool.
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, String> {
        let registry = ToolRegistry::new(self.config.clone());
        let name = name.to_string();
        tokio::task::spawn_blocking(move || registry.call_tool(&name, arguments))
            .await
            .map_err(|e| format!("Tool task failed: {}", e))?
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_lists_nasa_tools() {
        let server = McpServer::new(Config::default());
        let tools = server.list_tools();
        let names: Vec<_> = tools.iter().filter_map(|t| t["name"].as_str()).collect();
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"get_apod_data"));
        assert!(names.contains(&"search_images_data"));
    }

    #[test]
    fn test_server_info_advertises_tools_only() {
        let server = McpServer::new(Config::default());
        let info = server.get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_none());
        assert!(info.capabilities.prompts.is_none());
        assert!(info.instructions.unwrap().contains("get_apod_data"));
    }

    #[test]
    fn test_server_name_and_version() {
        let server = McpServer::new(Config::default());
        assert_eq!(server.name(), "nasa-mcp-server");
        assert_eq!(server.version(), env!("CARGO_PKG_VERSION"));
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_call_unknown_tool() {
        let server = McpServer::new(Config::default());
        let result = server.call_tool("get_mars_weather", serde_json::json!({})).await;
        assert!(result.is_err());
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_call_tool_runs_fetch_off_the_executor() {
        use httpmock::prelude::*;

        let nasa = MockServer::start_async().await;
        let mock = nasa
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/planetary/apod")
                    .query_param("date", "2024-01-15");
                then.status(200).json_body(serde_json::json!({"title": "X"}));
            })
            .await;

        let mut config = Config::default();
        config.nasa.apod_url = nasa.url("/planetary/apod");
        let server = McpServer::new(config);

        let response = server
            .call_tool("get_apod_data", serde_json::json!({"date": "2024-01-15"}))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response["isError"], serde_json::json!(false));
        assert_eq!(response["structuredContent"]["title"], "X");
    }
}
