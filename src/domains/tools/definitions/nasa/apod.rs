//! Astronomy Picture of the Day tool.
//!
//! Fetches the APOD entry for a given date (or today) from api.nasa.gov.

use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use tracing::{error, info, instrument};

use super::client;
use super::common::{QueryParams, error_payload_result, has_content, payload_result};
use crate::core::config::Config;
use crate::domains::tools::{FetchError, ToolError};

// ============================================================================
// Fetcher
// ============================================================================

/// Build the query for the APOD endpoint.
///
/// `date` is only sent when it is present and non-empty.
pub fn apod_params(api_key: &str, date: Option<&str>) -> QueryParams {
    let params = QueryParams::new().with("api_key", api_key);
    match date.filter(|d| !d.is_empty()) {
        Some(date) => params.with("date", date),
        None => params,
    }
}

/// Client for the APOD endpoint with its API key injected up front.
#[derive(Debug, Clone)]
pub struct ApodFetcher {
    api_key: String,
    endpoint: String,
    timeout: Duration,
}

impl ApodFetcher {
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.credentials.nasa_api_key.clone(),
            config.nasa.apod_url.clone(),
            Duration::from_secs(config.nasa.apod_timeout_secs),
        )
    }

    pub fn params(&self, date: Option<&str>) -> QueryParams {
        apod_params(&self.api_key, date)
    }

    /// Fetch the picture of the day; `None` if the request failed.
    pub fn get_apod(&self, date: Option<&str>) -> Option<Value> {
        info!(
            "Requesting NASA APOD for date: {}...",
            date.filter(|d| !d.is_empty()).unwrap_or("today")
        );

        let apod_data = client::request(&self.endpoint, &self.params(date), self.timeout);

        match apod_data {
            Some(_) => info!("Successfully retrieved NASA APOD data."),
            None => error!("Failed to retrieve NASA APOD data."),
        }

        apod_data
    }

    /// Like [`get_apod`](Self::get_apod) but keeps the failure cause.
    pub fn try_get_apod(&self, date: Option<&str>) -> Result<Value, FetchError> {
        client::fetch(&self.endpoint, &self.params(date), self.timeout)
    }
}

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the APOD tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct GetApodDataParams {
    /// Date of the picture; today's picture when omitted.
    #[serde(default)]
    #[schemars(description = "Date in YYYY-MM-DD format (leave blank for today)")]
    pub date: Option<String>,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// APOD tool - returns the raw APOD payload as JSON text.
pub struct GetApodDataTool;

impl GetApodDataTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_apod_data";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Fetch NASA's Astronomy Picture of the Day (APOD) data for a specific date. Provide the date in 'YYYY-MM-DD' format or leave blank for today's data.";

    /// Error message returned when nothing could be fetched.
    pub const FAILURE_MESSAGE: &'static str = "Failed to retrieve APOD data";

    /// Execute the tool logic. Blocks on the network call.
    #[instrument(skip_all, fields(date = ?params.date))]
    pub fn execute(params: &GetApodDataParams, config: &Config) -> CallToolResult {
        let fetcher = ApodFetcher::from_config(config);

        match fetcher.get_apod(params.date.as_deref()) {
            Some(data) if has_content(&data) => payload_result(data),
            _ => error_payload_result(Self::FAILURE_MESSAGE),
        }
    }

    /// HTTP handler for this tool (for HTTP transport).
    ///
    /// Blocks on the network call; the HTTP transport runs it on the
    /// blocking thread pool.
    #[cfg(feature = "http")]
    pub fn http_handler(
        arguments: serde_json::Value,
        config: &Config,
    ) -> Result<serde_json::Value, String> {
        let params: GetApodDataParams = serde_json::from_value(arguments)
            .map_err(|e| ToolError::invalid_arguments(e.to_string()).to_string())?;

        Ok(super::common::http_response(Self::execute(&params, config)))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GetApodDataParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for STDIO/TCP transport.
    pub fn create_route<S>(config: Arc<Config>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let config = config.clone();
            async move {
                let params: GetApodDataParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::from(ToolError::invalid_arguments(e.to_string())))?;

                let result = tokio::task::spawn_blocking(move || Self::execute(&params, &config))
                    .await
                    .map_err(|e| {
                        McpError::from(ToolError::internal(format!("Task execution failed: {}", e)))
                    })?;

                Ok(result)
            }
            .boxed()
        })
    }
}
