//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - A registry of all available tools
//! - HTTP dispatch for tool calls (when http feature is enabled)
//! - Tool names for listing

use std::sync::Arc;
#[cfg(feature = "http")]
use tracing::warn;

use crate::core::config::Config;

use super::definitions::{GetApodDataTool, SearchImagesDataTool};
#[cfg(feature = "http")]
use super::error::ToolError;

/// Tool registry - manages all available tools.
pub struct ToolRegistry {
    #[cfg_attr(not(feature = "http"), allow(dead_code))]
    config: Arc<Config>,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![GetApodDataTool::NAME, SearchImagesDataTool::NAME]
    }

    /// Dispatch an HTTP tool call to the appropriate handler.
    ///
    /// Blocks until the NASA request finishes; callers on an async executor
    /// should go through `spawn_blocking`.
    #[cfg(feature = "http")]
    pub fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, String> {
        match name {
            GetApodDataTool::NAME => GetApodDataTool::http_handler(arguments, &self.config),
            SearchImagesDataTool::NAME => SearchImagesDataTool::http_handler(arguments, &self.config),
            _ => {
                warn!("Unknown tool requested: {}", name);
                Err(ToolError::not_found(name).to_string())
            }
        }
    }
}
