//! NASA Image and Video Library search tool.

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
use tracing::instrument;

use super::client;
use super::common::{QueryParams, error_payload_result, has_content, payload_result};
use crate::core::config::Config;
use crate::domains::tools::{FetchError, ToolError};

/// Results per page when the caller does not ask for a size.
pub const DEFAULT_PAGE_SIZE: i64 = 3;

/// Only the first page is ever requested.
const FIRST_PAGE: i64 = 1;

/// Build the query for the image search endpoint.
///
/// `page_size` is forwarded as-is, even when zero or negative.
pub fn image_search_params(query: &str, page_size: i64) -> QueryParams {
    QueryParams::new()
        .with("q", query)
        .with("media_type", "image")
        .with("page", FIRST_PAGE)
        .with("page_size", page_size)
}

/// Client for the image search endpoint.
#[derive(Debug, Clone)]
pub struct ImageSearchFetcher {
    endpoint: String,
    timeout: Duration,
}

impl ImageSearchFetcher {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.nasa.image_search_url.clone(),
            Duration::from_secs(config.nasa.image_search_timeout_secs),
        )
    }

    /// Search for images; `None` if the request failed.
    pub fn search_images(&self, query: &str, page_size: i64) -> Option<Value> {
        client::request(
            &self.endpoint,
            &image_search_params(query, page_size),
            self.timeout,
        )
    }

    /// Like [`search_images`](Self::search_images) but keeps the failure cause.
    pub fn try_search_images(&self, query: &str, page_size: i64) -> Result<Value, FetchError> {
        client::fetch(
            &self.endpoint,
            &image_search_params(query, page_size),
            self.timeout,
        )
    }
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

/// Parameters for the image search tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchImagesDataParams {
    /// Search term.
    #[schemars(description = "Search term (e.g., 'Mars', 'Moon Landing')")]
    pub q: String,

    #[serde(default = "default_page_size")]
    #[schemars(description = "Number of results to return (default: 3)")]
    pub page_size: i64,
}

/// Image search tool.
pub struct SearchImagesDataTool;

impl SearchImagesDataTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "search_images_data";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Search NASA's image library using a query string. Provide a search term (e.g., 'Mars', 'Moon Landing').";

    pub const FAILURE_MESSAGE: &'static str = "Failed to search for images";

    #[instrument(skip_all, fields(q = %params.q, page_size = params.page_size))]
    pub fn execute(params: &SearchImagesDataParams, config: &Config) -> CallToolResult {
        let fetcher = ImageSearchFetcher::from_config(config);

        match fetcher.search_images(&params.q, params.page_size) {
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
        let params: SearchImagesDataParams = serde_json::from_value(arguments)
            .map_err(|e| ToolError::invalid_arguments(e.to_string()).to_string())?;

        Ok(super::common::http_response(Self::execute(&params, config)))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<SearchImagesDataParams>(),
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
                let params: SearchImagesDataParams =
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::nasa::common::QueryValue;
    use httpmock::prelude::*;
    use rmcp::model::RawContent;
    use serde_json::json;

    fn config_for(server: &MockServer) -> Config {
        let mut config = Config::default();
        config.nasa.image_search_url = server.url("/search");
        config.nasa.image_search_timeout_secs = 5;
        config
    }

    fn text_of(result: &CallToolResult) -> String {
        match &result.content[0].raw {
            RawContent::Text(text) => text.text.clone(),
            other => panic!("expected text content, got {:?}", other),
        }
    }

    #[test]
    fn test_search_params() {
        let params = image_search_params("Mars rover", 5);
        assert_eq!(
            params,
            QueryParams::new()
                .with("q", "Mars rover")
                .with("media_type", "image")
                .with("page", 1)
                .with("page_size", 5)
        );
    }

    #[test]
    fn test_search_params_pass_degenerate_sizes_through() {
        for size in [0, -1, 10_000] {
            let params = image_search_params("Mars rover", size);
            assert_eq!(params.get("page_size"), Some(&QueryValue::Number(size)));
            assert_eq!(params.get("page"), Some(&QueryValue::Number(1)));
        }
    }

    #[test]
    fn test_params_default_page_size() {
        let params: SearchImagesDataParams = serde_json::from_str(r#"{"q": "Mars"}"#).unwrap();
        assert_eq!(params.page_size, 3);
    }

    #[test]
    fn test_params_require_query() {
        let result = serde_json::from_str::<SearchImagesDataParams>(r#"{"page_size": 3}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_search_returns_collection() {
        let server = MockServer::start();
        let body = json!({
            "collection": {
                "items": [{
                    "data": [{"title": "Curiosity Selfie", "nasa_id": "PIA19808"}],
                    "links": [{"href": "https://images-assets.nasa.gov/image/PIA19808/PIA19808~thumb.jpg"}]
                }]
            }
        });
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/search")
                .query_param("q", "Mars rover")
                .query_param("media_type", "image")
                .query_param("page", "1")
                .query_param("page_size", "5");
            then.status(200).json_body(body.clone());
        });

        let fetcher = ImageSearchFetcher::from_config(&config_for(&server));
        let data = fetcher.search_images("Mars rover", 5);

        mock.assert();
        assert_eq!(data, Some(body));
    }

    #[test]
    fn test_empty_query_is_forwarded() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/search").query_param("q", "");
            then.status(400).json_body(json!({"reason": "Expected 'q' text search parameter"}));
        });

        let params = SearchImagesDataParams {
            q: String::new(),
            page_size: DEFAULT_PAGE_SIZE,
        };
        let result = SearchImagesDataTool::execute(&params, &config_for(&server));

        mock.assert();
        let parsed: Value = serde_json::from_str(&text_of(&result)).unwrap();
        assert_eq!(parsed, json!({"error": "Failed to search for images"}));
    }

    #[test]
    fn test_execute_success_serializes_payload() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/search");
            then.status(200).json_body(json!({"collection": {"items": []}}));
        });

        let params = SearchImagesDataParams {
            q: "Moon Landing".to_string(),
            page_size: 3,
        };
        let result = SearchImagesDataTool::execute(&params, &config_for(&server));

        assert_eq!(result.is_error, Some(false));
        let text = text_of(&result);
        assert!(text.starts_with("{\n    \"collection\""));
    }

    #[test]
    fn test_try_search_reports_invalid_json() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/search");
            then.status(200).body("not json");
        });

        let fetcher = ImageSearchFetcher::from_config(&config_for(&server));
        let err = fetcher.try_search_images("Mars", 3).unwrap_err();
        assert_eq!(err.kind(), "invalid_json");
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_http_handler_missing_query() {
        let result = SearchImagesDataTool::http_handler(json!({}), &Config::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_execute_zero_like_payload_is_failure() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/search");
            then.status(200).body("\"\"");
        });

        let params: SearchImagesDataParams = serde_json::from_value(json!({"q": "Mars"})).unwrap();
        let result = SearchImagesDataTool::execute(&params, &config_for(&server));
        assert_eq!(result.is_error, Some(true));
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_http_handler_returns_payload() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/search").query_param("q", "Apollo 11");
            then.status(200).json_body(json!({"collection": {"items": [{"href": "x"}]}}));
        });

        let response =
            SearchImagesDataTool::http_handler(json!({"q": "Apollo 11"}), &config_for(&server))
                .unwrap();
        assert_eq!(response["isError"], json!(false));
        assert_eq!(response["structuredContent"]["collection"]["items"][0]["href"], "x");
    }

    #[ignore]
    #[test]
    fn test_real_search() {
        let fetcher = ImageSearchFetcher::from_config(&Config::default());
        let data = fetcher.search_images("Moon Landing", 2).expect("search failed");
        assert!(data["collection"]["items"].is_array());
    }
}
