use std::time::Duration;

use crate::error::AppError;

use super::request::BridgeRequest;
use super::response::BridgeResponse;

/// Total request timeout when no override is given.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Browser whose TLS and HTTP/2 fingerprint the client presents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Browser {
    Chrome,
    Firefox,
    Safari,
    Edge,
}

/// Transport settings for a single request.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub timeout: Duration,
    pub browser: Browser,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            browser: Browser::Chrome,
        }
    }
}

#[cfg(feature = "emulation")]
impl Browser {
    fn emulation(self) -> rquest_util::Emulation {
        match self {
            Self::Chrome => rquest_util::Emulation::Chrome133,
            Self::Firefox => rquest_util::Emulation::Firefox135,
            Self::Safari => rquest_util::Emulation::Safari18,
            Self::Edge => rquest_util::Emulation::Edge131,
        }
    }
}

/// Issues one request with the emulated client and shapes the result.
///
/// The transport is opaque: whatever it reports (invalid URL or method,
/// DNS, connect, TLS, timeout, decode failures) is forwarded as the error
/// message, joined with its source chain.
///
/// # Errors
///
/// Returns [`AppError::Request`] for any client-construction or transport
/// failure.
#[cfg(feature = "emulation")]
pub async fn execute(
    request: &BridgeRequest,
    options: &FetchOptions,
) -> Result<BridgeResponse, AppError> {
    let client = rquest::Client::builder()
        .emulation(options.browser.emulation())
        .timeout(options.timeout)
        .build()
        .map_err(|e| AppError::Request(error_chain(&e)))?;

    let method = rquest::Method::from_bytes(request.method.as_bytes())
        .map_err(|e| AppError::Request(e.to_string()))?;

    let mut builder = client.request(method, request.url.as_str());
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    if let Some(body) = &request.body {
        builder = builder.body(body.clone());
    }

    let response = builder
        .send()
        .await
        .map_err(|e| AppError::Request(error_chain(&e)))?;

    let status = response.status();
    let status_text = status.canonical_reason().unwrap_or_default().to_owned();
    let headers: Vec<(String, String)> = response
        .headers()
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_owned(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();
    let body = response
        .text()
        .await
        .map_err(|e| AppError::Request(error_chain(&e)))?;

    Ok(BridgeResponse::new(
        status.as_u16(),
        status_text,
        headers,
        body,
    ))
}

/// Stand-in when the emulation transport is compiled out.
///
/// # Errors
///
/// Always returns [`AppError::MissingCapability`] with the rebuild
/// instruction.
#[cfg(not(feature = "emulation"))]
#[allow(clippy::unused_async)]
pub async fn execute(
    _request: &BridgeRequest,
    _options: &FetchOptions,
) -> Result<BridgeResponse, AppError> {
    Err(AppError::MissingCapability)
}

/// Joins an error with its source chain. The top-level transport error is
/// often just "error sending request"; the chain carries the actual cause.
#[cfg(feature = "emulation")]
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(&format!(": {cause}"));
        source = cause.source();
    }
    message
}
