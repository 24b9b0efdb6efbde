//! Blocking HTTP helper for the NASA APIs.
//!
//! Every failure is logged with its cause and then turned into `None`, so the
//! fetchers built on top of [`request`] never have to deal with errors.

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, error};

use super::common::QueryParams;
use crate::domains::tools::FetchError;

/// GET `url` with `params` and return the parsed JSON body.
///
/// Returns `None` on timeout, 4xx/5xx status, transport failure, invalid JSON
/// or any other error. The cause is only reported through the log.
pub fn request(url: &str, params: &QueryParams, timeout: Duration) -> Option<Value> {
    match fetch(url, params, timeout) {
        Ok(value) => Some(value),
        Err(e) => {
            log_failure(&e);
            None
        }
    }
}

/// GET `url` with `params`, keeping the reason for a failure.
///
/// Must be called from a blocking context (a plain thread or
/// `spawn_blocking`), never directly on an async executor.
pub fn fetch(url: &str, params: &QueryParams, timeout: Duration) -> Result<Value, FetchError> {
    let display_url = params.display_url(url);

    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| FetchError::Unexpected(format!("Failed to create HTTP client: {}", e)))?;

    let response = client
        .get(url)
        .query(params)
        .send()
        .map_err(|e| classify(e, &display_url, timeout))?;

    let status = response.status();
    if status.is_client_error() || status.is_server_error() {
        return Err(FetchError::HttpStatus {
            url: display_url,
            status,
        });
    }

    let body = response
        .bytes()
        .map_err(|e| classify(e, &display_url, timeout))?;

    let value = serde_json::from_slice(&body).map_err(|source| FetchError::InvalidJson {
        url: display_url.clone(),
        source,
    })?;

    debug!("Received {} bytes from {}", body.len(), display_url);
    Ok(value)
}

/// Split reqwest failures into timeouts and everything else.
fn classify(err: reqwest::Error, display_url: &str, timeout: Duration) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout {
            url: display_url.to_string(),
            timeout_secs: timeout.as_secs_f64(),
        }
    } else {
        // The URL carries the API key; the redacted copy is kept instead.
        FetchError::Transport {
            url: display_url.to_string(),
            source: err.without_url(),
        }
    }
}

fn log_failure(err: &FetchError) {
    error!(kind = err.kind(), "{}", err);
}
