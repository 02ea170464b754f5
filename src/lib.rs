//! # harbor-client
//!
//! A thin asynchronous client for the Harbor container registry REST API.
//!
//! The crate takes care of the session plumbing around every call:
//!
//! - login with the registry credentials and `beegosessionID` session cookie
//! - a single re-login and retry when a call is answered with 401
//! - the `x-harbor-api-version` header for the negotiated API version
//! - optional per-request timings
//! - optional `curl`-style wire logs with secrets replaced by SHA1 digests
//!
//! Endpoint wrappers (projects, repositories, users, ...) are left to the
//! caller and are built on top of the verb methods.
//!
//! ## Usage
//!
//! ```ignore
//! use harbor_client::prelude::*;
//!
//! let config = Config::with_credentials("https://registry.example.com", "admin", "Harbor12345");
//! let client = create_client("2.0", config)?;
//! let projects = client.get("/projects").await?;
//! ```
//!
//! ## Configuration
//!
//! [`application::config::Config::new`] reads `HARBOR_URL`, `HARBOR_USERNAME`,
//! `HARBOR_PASSWORD`, `HARBOR_API_VERSION`, `HARBOR_TIMEOUT`,
//! `HARBOR_TIMINGS`, `HARBOR_HTTP_LOG_DEBUG` and `HARBOR_REDACT_TEXT` from the
//! environment or a `.env` file.

/// Client, configuration and version resolution
pub mod application;
/// Global constants
pub mod constants;
/// Error types
pub mod error;
/// Request, response, timing and version models
pub mod model;
/// Convenience re-exports
pub mod prelude;
/// Environment, logging and redaction helpers
pub mod utils;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the crate version
#[must_use]
pub fn version() -> &'static str {
    VERSION
}
