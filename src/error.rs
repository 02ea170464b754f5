/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 17/10/26
******************************************************************************/

//! Error types for the Harbor client
//!
//! Every fallible operation in the crate returns [`AppError`]. HTTP failures
//! with a status of 400 or above are classified into an [`ApiError`] whose
//! [`ApiErrorKind`] is derived from the status code.

use reqwest::{Method, StatusCode};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Main error type for the library
#[derive(Debug, Error)]
pub enum AppError {
    /// A credential or the endpoint required to log in is missing
    #[error("authorization failure: {0}")]
    AuthorizationFailure(String),
    /// The registry could not be reached
    #[error("connection refused: {0}")]
    ConnectionRefused(String),
    /// The requested API version cannot be served by this client
    #[error("unsupported version: {0}")]
    UnsupportedVersion(String),
    /// The registry answered with an error status
    #[error(transparent)]
    Api(#[from] ApiError),
    /// A header name or value could not be encoded
    #[error("invalid header: {0}")]
    InvalidHeader(String),
    /// Transport failure reported by the HTTP client
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    /// A request body could not be serialized or a response could not be decoded
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Returns `true` when the error is an HTTP 401 answer from the registry
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AppError::Api(e) if e.kind == ApiErrorKind::Unauthorized)
    }

    /// Status code of the failed exchange, if the registry answered at all
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            AppError::Api(e) => Some(e.status),
            AppError::Network(e) => e.status(),
            _ => None,
        }
    }
}

impl From<reqwest::header::InvalidHeaderValue> for AppError {
    fn from(err: reqwest::header::InvalidHeaderValue) -> Self {
        AppError::InvalidHeader(err.to_string())
    }
}

/// Class of an HTTP error answer, derived from its status code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// 400
    BadRequest,
    /// 401
    Unauthorized,
    /// 403
    Forbidden,
    /// 404
    NotFound,
    /// 405
    MethodNotAllowed,
    /// 406
    NotAcceptable,
    /// 409
    Conflict,
    /// 413
    OverLimit,
    /// 429
    RateLimit,
    /// 501
    NotImplemented,
    /// Any other status of 400 or above
    Other,
}

impl From<StatusCode> for ApiErrorKind {
    fn from(status: StatusCode) -> Self {
        match status.as_u16() {
            400 => ApiErrorKind::BadRequest,
            401 => ApiErrorKind::Unauthorized,
            403 => ApiErrorKind::Forbidden,
            404 => ApiErrorKind::NotFound,
            405 => ApiErrorKind::MethodNotAllowed,
            406 => ApiErrorKind::NotAcceptable,
            409 => ApiErrorKind::Conflict,
            413 => ApiErrorKind::OverLimit,
            429 => ApiErrorKind::RateLimit,
            501 => ApiErrorKind::NotImplemented,
            _ => ApiErrorKind::Other,
        }
    }
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ApiErrorKind::BadRequest => "bad request",
            ApiErrorKind::Unauthorized => "unauthorized",
            ApiErrorKind::Forbidden => "forbidden",
            ApiErrorKind::NotFound => "not found",
            ApiErrorKind::MethodNotAllowed => "method not allowed",
            ApiErrorKind::NotAcceptable => "not acceptable",
            ApiErrorKind::Conflict => "conflict",
            ApiErrorKind::OverLimit => "over limit",
            ApiErrorKind::RateLimit => "rate limit",
            ApiErrorKind::NotImplemented => "not implemented",
            ApiErrorKind::Other => "http error",
        };
        write!(f, "{name}")
    }
}

/// Classified HTTP error answer
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    /// Status code returned by the registry
    pub status: StatusCode,
    /// Class derived from the status code
    pub kind: ApiErrorKind,
    /// Human readable message, taken from the body when it carries one
    pub message: String,
    /// Optional extra details from the body
    pub details: Option<String>,
    /// Correlation id returned by the registry
    pub request_id: Option<String>,
    /// Full URL of the failed request
    pub url: String,
    /// HTTP method of the failed request
    pub method: Method,
}

impl ApiError {
    /// Builds a classified error from a failed exchange
    ///
    /// The message and details are looked up in the parsed body, which may be
    /// `{"message": .., "details": ..}`, a single-key wrapper such as
    /// `{"badRequest": {"message": ..}}`, or an array of `{"message": ..}`
    /// objects. Without a usable body the canonical reason phrase is used.
    pub fn from_response(
        status: StatusCode,
        body: Option<&Value>,
        url: &str,
        method: &Method,
        request_id: Option<String>,
    ) -> Self {
        let (message, details) = body
            .and_then(extract_message)
            .unwrap_or_else(|| (default_message(status), None));

        Self {
            status,
            kind: ApiErrorKind::from(status),
            message,
            details,
            request_id,
            url: url.to_string(),
            method: method.clone(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (HTTP {}) {} {}: {}",
            self.kind,
            self.status.as_u16(),
            self.method,
            self.url,
            self.message
        )?;
        if let Some(request_id) = &self.request_id {
            write!(f, " (Request-ID: {request_id})")?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

fn default_message(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(String::from)
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}

fn message_and_details(obj: &serde_json::Map<String, Value>) -> Option<(String, Option<String>)> {
    let message = obj.get("message")?.as_str()?.to_string();
    let details = obj.get("details").and_then(|d| match d {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    });
    Some((message, details))
}

fn extract_message(body: &Value) -> Option<(String, Option<String>)> {
    match body {
        Value::Object(obj) => message_and_details(obj).or_else(|| {
            if obj.len() == 1 {
                obj.values()
                    .next()
                    .and_then(Value::as_object)
                    .and_then(message_and_details)
            } else {
                None
            }
        }),
        Value::Array(items) => {
            let messages: Vec<String> = items
                .iter()
                .filter_map(|item| item.get("message").and_then(Value::as_str))
                .map(String::from)
                .collect();
            if messages.is_empty() {
                None
            } else {
                Some((messages.join("; "), None))
            }
        }
        Value::String(s) if !s.is_empty() => Some((s.clone(), None)),
        _ => None,
    }
}
