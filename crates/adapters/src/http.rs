//! Shared HTTP plumbing for adapters.
//!
//! One reqwest client per registry, with the per-call timeout baked in.
//! Response status classification is the single place vendor HTTP
//! semantics become [`AdapterError`] variants.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode};

use crate::error::AdapterError;

/// Default per-call timeout for adapter requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Build the shared adapter HTTP client.
pub fn build_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .build()
        .expect("Failed to build reqwest HTTP client")
}

/// Send a prepared request and parse the JSON response body.
///
/// Timeouts and connection failures become [`AdapterError::Transport`];
/// non-2xx statuses are classified by [`classify_status`].
pub async fn send_json(request: RequestBuilder) -> Result<serde_json::Value, AdapterError> {
    let response = request.send().await.map_err(from_reqwest)?;

    let status = response.status();
    if !status.is_success() {
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());
        return Err(classify_status(status, retry_after));
    }

    response
        .json::<serde_json::Value>()
        .await
        .map_err(|e| AdapterError::Transport(format!("Invalid JSON response: {e}")))
}

/// Map a non-success HTTP status to the adapter error taxonomy.
pub fn classify_status(status: StatusCode, retry_after_secs: Option<u64>) -> AdapterError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            AdapterError::Auth(format!("Platform returned HTTP {}", status.as_u16()))
        }
        StatusCode::NOT_FOUND => {
            AdapterError::NotFound(format!("Platform returned HTTP {}", status.as_u16()))
        }
        StatusCode::TOO_MANY_REQUESTS => AdapterError::RateLimit { retry_after_secs },
        _ => AdapterError::Transport(format!("Platform returned HTTP {}", status.as_u16())),
    }
}

/// Map a reqwest error. Per-call timeout expiry is a transport fault.
fn from_reqwest(err: reqwest::Error) -> AdapterError {
    if err.is_timeout() {
        AdapterError::Transport("Request timed out".to_string())
    } else {
        AdapterError::Transport(err.to_string())
    }
}
