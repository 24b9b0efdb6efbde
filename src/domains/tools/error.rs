//! Tool-specific error types.

use thiserror::Error;

/// Errors that can occur while dispatching a tool call.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool was not found.
    #[error("Unknown tool: {0}")]
    NotFound(String),

    /// Invalid arguments were provided to the tool.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The blocking worker running the tool died.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl From<ToolError> for rmcp::ErrorData {
    fn from(err: ToolError) -> Self {
        match err {
            ToolError::NotFound(_) | ToolError::InvalidArguments(_) => {
                Self::invalid_params(err.to_string(), None)
            }
            ToolError::Internal(_) => Self::internal_error(err.to_string(), None),
        }
    }
}

/// Why a request to a NASA endpoint produced no result.
///
/// Every variant is logged by the request helper and then collapsed into the
/// same "no result" value; callers of the fetchers never see it unless they
/// use the `fetch` entry points directly.
#[derive(Debug, Error)]
pub enum FetchError {
    /// No response arrived before the deadline.
    #[error("Request timed out after {timeout_secs} seconds: {url}")]
    Timeout { url: String, timeout_secs: f64 },

    /// The endpoint answered with a 4xx or 5xx status.
    #[error("HTTP error occurred: {status} - URL: {url}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Connection, DNS, TLS or malformed-request failure.
    #[error("Request exception occurred: {source} - URL: {url}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The body of a successful response was not valid JSON.
    #[error("Invalid JSON in response from {url}: {source}")]
    InvalidJson {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// Anything else, such as failing to set up the HTTP client.
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl FetchError {
    /// Short machine-readable name of the failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Timeout { .. } => "timeout",
            Self::HttpStatus { .. } => "http_status",
            Self::Transport { .. } => "transport",
            Self::InvalidJson { .. } => "invalid_json",
            Self::Unexpected(_) => "unexpected",
        }
    }

    /// HTTP status of the response, when the failure came from one.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_error_messages() {
        assert_eq!(
            ToolError::not_found("get_mars_weather").to_string(),
            "Unknown tool: get_mars_weather"
        );
        assert_eq!(
            ToolError::internal("worker panicked").to_string(),
            "Internal error: worker panicked"
        );
    }

    #[test]
    fn test_fetch_error_kinds() {
        let timeout = FetchError::Timeout {
            url: "https://api.nasa.gov/planetary/apod".to_string(),
            timeout_secs: 30.0,
        };
        assert_eq!(timeout.kind(), "timeout");
        assert_eq!(
            timeout.to_string(),
            "Request timed out after 30 seconds: https://api.nasa.gov/planetary/apod"
        );
        assert!(timeout.status().is_none());

        let status = FetchError::HttpStatus {
            url: "https://images-api.nasa.gov/search".to_string(),
            status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
        };
        assert_eq!(status.kind(), "http_status");
        assert_eq!(status.status(), Some(reqwest::StatusCode::SERVICE_UNAVAILABLE));
        assert!(status.to_string().contains("503"));

        let unexpected = FetchError::Unexpected("client setup failed".to_string());
        assert_eq!(unexpected.kind(), "unexpected");
    }

    #[test]
    fn test_invalid_json_kind() {
        let source = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let err = FetchError::InvalidJson {
            url: "https://api.nasa.gov/planetary/apod".to_string(),
            source,
        };
        assert_eq!(err.kind(), "invalid_json");
        assert!(err.to_string().starts_with("Invalid JSON in response from"));
    }
}
