//! Common utilities shared across NASA tools.
//!
//! Query parameter containers, response formatting and the glue used by the
//! HTTP transport to return tool results.

use rmcp::model::{CallToolResult, Content};
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

/// Value of a single query parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum QueryValue {
    Text(String),
    Number(i64),
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for QueryValue {
    fn from(value: i32) -> Self {
        Self::Number(i64::from(value))
    }
}

/// Ordered query parameters for one request.
///
/// Keys are only ever added with a concrete value; optional parameters are
/// left out instead of being sent empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QueryParams(Vec<(&'static str, QueryValue)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter, keeping insertion order.
    pub fn with(mut self, key: &'static str, value: impl Into<QueryValue>) -> Self {
        self.0.push((key, value.into()));
        self
    }

    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.0.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> Vec<&'static str> {
        self.0.iter().map(|(k, _)| *k).collect()
    }

    /// Copy of these parameters with the API key masked, for logging.
    pub fn redacted(&self) -> Self {
        Self(
            self.0
                .iter()
                .map(|(k, v)| match *k {
                    "api_key" => (*k, QueryValue::from("REDACTED")),
                    _ => (*k, v.clone()),
                })
                .collect(),
        )
    }

    /// Render `url?query` with the API key masked.
    pub fn display_url(&self, url: &str) -> String {
        match serde_urlencoded::to_string(self.redacted()) {
            Ok(query) if !query.is_empty() => format!("{}?{}", url, query),
            _ => url.to_string(),
        }
    }
}

/// Whether a payload counts as a result worth returning to the client.
///
/// Empty or zero-like payloads (`null`, `false`, `0`, `""`, `{}`, `[]`) are
/// treated the same as a failed request.
pub fn has_content(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Object(map) => !map.is_empty(),
        Value::Array(items) => !items.is_empty(),
    }
}

/// Serialize a payload as JSON text indented by four spaces.
pub fn to_indented_json(value: &Value) -> String {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    match value.serialize(&mut serializer) {
        Ok(()) => String::from_utf8(buf).unwrap_or_else(|_| value.to_string()),
        Err(e) => {
            warn!("Failed to pretty-print payload: {}", e);
            value.to_string()
        }
    }
}

/// Successful tool result carrying the NASA payload.
pub fn payload_result(value: Value) -> CallToolResult {
    let text = to_indented_json(&value);
    CallToolResult {
        content: vec![Content::text(text)],
        structured_content: value.is_object().then_some(value),
        is_error: Some(false),
        meta: None,
    }
}

/// Failed tool result shaped as `{"error": message}`.
///
/// The body is the same object a client would parse on success; `is_error`
/// is set as well so MCP clients can branch without inspecting it.
pub fn error_payload_result(message: &str) -> CallToolResult {
    let body = serde_json::json!({ "error": message });
    CallToolResult {
        content: vec![Content::text(body.to_string())],
        structured_content: Some(body),
        is_error: Some(true),
        meta: None,
    }
}

/// Convert a tool result into the JSON shape returned over HTTP.
#[cfg(feature = "http")]
pub fn http_response(result: CallToolResult) -> Value {
    let mut response = serde_json::json!({
        "content": result.content,
        "isError": result.is_error.unwrap_or(false)
    });

    if let (Some(structured), Some(obj)) = (result.structured_content, response.as_object_mut()) {
        obj.insert("structuredContent".to_string(), structured);
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::RawContent;
    use serde_json::json;

    fn text_of(result: &CallToolResult) -> String {
        match &result.content[0].raw {
            RawContent::Text(text) => text.text.clone(),
            other => panic!("expected text content, got {:?}", other),
        }
    }

    #[test]
    fn test_params_keep_insertion_order() {
        let params = QueryParams::new()
            .with("q", "Moon Landing")
            .with("media_type", "image")
            .with("page", 1)
            .with("page_size", 3);
        assert_eq!(params.keys(), vec!["q", "media_type", "page", "page_size"]);
        assert_eq!(params.get("page"), Some(&QueryValue::Number(1)));
        assert!(!params.contains_key("date"));
    }

    #[test]
    fn test_display_url_redacts_api_key() {
        let params = QueryParams::new()
            .with("api_key", "secret-key")
            .with("date", "2024-01-15");
        let url = params.display_url("https://api.nasa.gov/planetary/apod");
        assert_eq!(
            url,
            "https://api.nasa.gov/planetary/apod?api_key=REDACTED&date=2024-01-15"
        );
        assert!(!url.contains("secret-key"));
    }

    #[test]
    fn test_display_url_encodes_values() {
        let params = QueryParams::new().with("q", "Mars rover").with("page", 1);
        assert_eq!(
            params.display_url("https://images-api.nasa.gov/search"),
            "https://images-api.nasa.gov/search?q=Mars+rover&page=1"
        );
        assert_eq!(
            QueryParams::new().display_url("https://images-api.nasa.gov/search"),
            "https://images-api.nasa.gov/search"
        );
    }

    #[test]
    fn test_has_content() {
        assert!(has_content(&json!({"title": "X"})));
        assert!(has_content(&json!([1])));
        assert!(has_content(&json!("text")));
        assert!(!has_content(&json!(null)));
        assert!(!has_content(&json!({})));
        assert!(!has_content(&json!([])));
    }

    #[test]
    fn test_has_content_rejects_zero_like_scalars() {
        assert!(!has_content(&json!(false)));
        assert!(!has_content(&json!(0)));
        assert!(!has_content(&json!(0.0)));
        assert!(!has_content(&json!("")));
        assert!(has_content(&json!(true)));
        assert!(has_content(&json!(-1)));
    }

    #[test]
    fn test_indented_json_uses_four_spaces() {
        let text = to_indented_json(&json!({"title": "X"}));
        assert_eq!(text, "{\n    \"title\": \"X\"\n}");
    }

    #[test]
    fn test_payload_result() {
        let result = payload_result(json!({"title": "X"}));
        assert_eq!(result.is_error, Some(false));
        let parsed: Value = serde_json::from_str(&text_of(&result)).unwrap();
        assert_eq!(parsed, json!({"title": "X"}));
        assert_eq!(result.structured_content, Some(json!({"title": "X"})));
    }

    #[test]
    fn test_payload_result_array_has_no_structured_content() {
        let result = payload_result(json!([{"title": "X"}]));
        assert!(result.structured_content.is_none());
    }

    #[test]
    fn test_error_payload_result() {
        let result = error_payload_result("Failed to search for images");
        assert_eq!(result.is_error, Some(true));
        let parsed: Value = serde_json::from_str(&text_of(&result)).unwrap();
        assert_eq!(parsed, json!({"error": "Failed to search for images"}));
    }
}
