/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 17/10/26
******************************************************************************/

//! Redaction of secrets before they reach the logs
//!
//! A redacted value is either replaced by a caller supplied text or by the
//! SHA1 digest of the value, rendered as `{SHA1}<hex>`. The digest keeps two
//! log lines comparable (same session, same digest) without exposing the
//! secret itself.

use crate::constants::{SENSITIVE_COOKIES, SENSITIVE_HEADERS, SHA1_TAG};
use reqwest::header::HeaderMap;
use serde_json::Value;
use sha1::{Digest, Sha1};
use std::collections::BTreeMap;

/// Returns the redacted form of `value`
///
/// # Examples
/// ```
/// use harbor_client::utils::redact::redact_value;
///
/// assert_eq!(
///     redact_value("hello world", None),
///     "{SHA1}2aae6c35c94fcfb415dbe95f408b9ce91ee846ed"
/// );
/// assert_eq!(redact_value("hello world", Some("***")), "***");
/// ```
#[must_use]
pub fn redact_value(value: &str, text: Option<&str>) -> String {
    match text {
        Some(text) => text.to_string(),
        None => {
            let mut hasher = Sha1::new();
            hasher.update(value.as_bytes());
            format!("{}{:x}", SHA1_TAG, hasher.finalize())
        }
    }
}

/// Replaces the value found at `path` inside a JSON object, in place
///
/// The last element of `path` is the key that gets replaced, the ones before
/// it are navigated first. A missing intermediate key leaves `target`
/// untouched, and so does a `null` leaf unless an override `text` is given.
/// Non-string leaves are digested through their JSON rendering.
pub fn redact(target: &mut Value, path: &[&str], text: Option<&str>) {
    let Some((key, parents)) = path.split_last() else {
        return;
    };

    let mut current = target;
    for p in parents {
        current = match current.get_mut(*p) {
            Some(next) => next,
            None => return,
        };
    }

    let Some(leaf) = current.as_object_mut().and_then(|obj| obj.get_mut(*key)) else {
        return;
    };

    if let Some(text) = text {
        *leaf = Value::String(text.to_string());
    } else if !leaf.is_null() {
        let raw = match &*leaf {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        *leaf = Value::String(redact_value(&raw, None));
    }
}

/// Returns `true` if a header with this name carries a secret
#[must_use]
pub fn is_sensitive_header(name: &str) -> bool {
    SENSITIVE_HEADERS
        .iter()
        .any(|h| h.eq_ignore_ascii_case(name))
}

/// Renders a header map as a sorted name → value map with secrets redacted
///
/// Repeated headers are joined with `, `; values that are not valid UTF-8
/// are shown as `<binary>`.
#[must_use]
pub fn redact_headers(headers: &HeaderMap, text: Option<&str>) -> BTreeMap<String, String> {
    let mut rendered: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in headers {
        let raw = value.to_str().unwrap_or("<binary>");
        let shown = if is_sensitive_header(name.as_str()) {
            redact_value(raw, text)
        } else {
            raw.to_string()
        };
        rendered
            .entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&shown);
            })
            .or_insert(shown);
    }
    rendered
}

/// Returns a copy of `cookies` with session cookies redacted
#[must_use]
pub fn redact_cookies(
    cookies: &BTreeMap<String, String>,
    text: Option<&str>,
) -> BTreeMap<String, String> {
    cookies
        .iter()
        .map(|(name, value)| {
            let shown = if SENSITIVE_COOKIES.contains(&name.as_str()) {
                redact_value(value, text)
            } else {
                value.clone()
            };
            (name.clone(), shown)
        })
        .collect()
}
