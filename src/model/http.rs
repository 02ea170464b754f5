/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 17/10/26
******************************************************************************/

//! Request options, parsed responses and wire-log rendering

use crate::constants::SENSITIVE_BODY_PATHS;
use crate::error::AppError;
use crate::utils::redact::{redact, redact_cookies, redact_headers};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;

/// Per-request options passed to [`crate::application::client::HttpClient::request`]
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Extra headers; the client always adds its own `User-Agent`, `Accept`
    /// and version headers on top of these
    pub headers: HeaderMap,
    /// Cookies sent as a single `Cookie` header
    pub cookies: BTreeMap<String, String>,
    /// JSON body; sets `Content-Type: application/json` when present
    pub body: Option<Value>,
}

impl RequestOptions {
    /// Empty options
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options carrying `body` serialized as JSON
    pub fn json<B: Serialize + ?Sized>(body: &B) -> Result<Self, AppError> {
        Ok(Self {
            body: Some(serde_json::to_value(body)?),
            ..Self::default()
        })
    }

    /// Sets the JSON body
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Adds a cookie
    #[must_use]
    pub fn with_cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.insert(name.into(), value.into());
        self
    }

    /// Adds a header
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self, AppError> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| AppError::InvalidHeader(e.to_string()))?;
        self.headers.insert(name, HeaderValue::from_str(value)?);
        Ok(self)
    }

    /// Renders the cookies as the value of a `Cookie` header
    #[must_use]
    pub fn cookie_header(&self) -> Option<String> {
        if self.cookies.is_empty() {
            return None;
        }
        Some(
            self.cookies
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}

/// A successful API answer
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// Status code (always below 400)
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body; `None` for an empty or non-JSON body
    pub body: Option<Value>,
    /// Correlation id returned by the registry
    pub request_id: Option<String>,
}

impl ApiResponse {
    /// Deserializes the body into `T`, reading an absent body as JSON `null`
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, AppError> {
        Ok(serde_json::from_value(
            self.body.clone().unwrap_or(Value::Null),
        )?)
    }

    /// Consuming variant of [`ApiResponse::json`]
    pub fn into_json<T: DeserializeOwned>(self) -> Result<T, AppError> {
        Ok(serde_json::from_value(self.body.unwrap_or(Value::Null))?)
    }
}

/// Parses a response body, treating empty or invalid JSON as no body
#[must_use]
pub fn parse_body(text: &str) -> Option<Value> {
    if text.trim().is_empty() {
        return None;
    }
    serde_json::from_str(text).ok()
}

/// Copy of `body` with password fields redacted
#[must_use]
pub fn redact_body(body: &Value, text: Option<&str>) -> Value {
    let mut body = body.clone();
    for path in SENSITIVE_BODY_PATHS {
        redact(&mut body, path, text);
    }
    body
}

/// Renders an outgoing request as a `curl` command line for the debug log
///
/// Header names are sorted; secrets in headers, cookies and the body are
/// redacted with `redact_text` or a SHA1 digest.
#[must_use]
pub fn format_request_log(
    method: &Method,
    url: &str,
    headers: &HeaderMap,
    cookies: &BTreeMap<String, String>,
    body: Option<&Value>,
    redact_text: Option<&str>,
) -> String {
    let mut parts = vec![
        "curl -g -i".to_string(),
        format!(" '{url}'"),
        format!(" -X {method}"),
    ];

    for (name, value) in redact_headers(headers, redact_text) {
        parts.push(format!(" -H \"{name}: {value}\""));
    }
    for (name, value) in redact_cookies(cookies, redact_text) {
        parts.push(format!(" -b \"{name}: {value}\""));
    }
    if let Some(body) = body {
        parts.push(format!(" -d '{}'", redact_body(body, redact_text)));
    }

    format!("REQ: {}", parts.concat())
}

/// Renders a response for the debug log
///
/// The body of a 400 answer is not shown.
#[must_use]
pub fn format_response_log(
    status: StatusCode,
    headers: &HeaderMap,
    body: Option<&Value>,
    redact_text: Option<&str>,
) -> String {
    let shown = match body {
        Some(body) if status != StatusCode::BAD_REQUEST => redact_body(body, redact_text),
        _ => Value::Null,
    };
    format!(
        "RESP: [{}] {:?}\nRESP BODY: {}\n",
        status.as_u16(),
        redact_headers(headers, redact_text),
        shown
    )
}
