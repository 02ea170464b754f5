use crate::constants::{DEFAULT_API_VERSION, DEFAULT_BASE_URL};
use crate::utils::config::{get_env_flag, get_env_or_default, get_env_or_none};
use dotenv::dotenv;
use pretty_simple_display::{DebugPretty, DisplaySimple};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone, Default)]
/// Login credentials for the registry
pub struct Credentials {
    /// Registry user name, sent as `principal` on login
    pub username: String,
    /// Registry password; never serialized, so it stays out of logs
    #[serde(skip_serializing, default)]
    pub password: String,
}

impl Credentials {
    /// Creates a credentials pair
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone)]
/// Configuration for the REST API
pub struct RestApiConfig {
    /// Base URL of the registry, e.g. `https://registry.example.com`
    pub base_url: String,
    /// Timeout in seconds applied to every request; `None` means no bound
    pub timeout: Option<f64>,
}

impl RestApiConfig {
    /// Timeout as a [`Duration`], ignoring non-positive or non-finite values
    #[must_use]
    pub fn timeout_duration(&self) -> Option<Duration> {
        self.timeout
            .filter(|t| t.is_finite() && *t > 0.0)
            .map(Duration::from_secs_f64)
    }
}

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone, Default)]
/// Diagnostics switches of the HTTP client
pub struct DiagnosticsConfig {
    /// Record a [`crate::model::timing::TimingRecord`] per request
    pub timings: bool,
    /// Emit request and response wire logs at `DEBUG` level
    pub http_log_debug: bool,
    /// Fixed text replacing secrets in wire logs instead of their SHA1 digest
    pub redact_text: Option<String>,
}

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone)]
/// Main configuration for the Harbor client
pub struct Config {
    /// Login credentials
    pub credentials: Credentials,
    /// REST API configuration
    pub rest_api: RestApiConfig,
    /// Diagnostics switches
    pub diagnostics: DiagnosticsConfig,
    /// Requested API version, e.g. `"2.0"`; resolved when the client is built
    pub api_version: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Builds the configuration from the environment
    ///
    /// A `.env` file is loaded first if present. Recognised variables:
    /// `HARBOR_URL`, `HARBOR_USERNAME`, `HARBOR_PASSWORD`,
    /// `HARBOR_API_VERSION` (default `2.0`), `HARBOR_TIMEOUT` (seconds),
    /// `HARBOR_TIMINGS`, `HARBOR_HTTP_LOG_DEBUG` and `HARBOR_REDACT_TEXT`.
    pub fn new() -> Self {
        match dotenv() {
            Ok(_) => debug!("Successfully loaded .env file"),
            Err(e) => debug!("Failed to load .env file: {e}"),
        }

        let username: String = get_env_or_default("HARBOR_USERNAME", String::new());
        let password: String = get_env_or_default("HARBOR_PASSWORD", String::new());

        if username.is_empty() {
            warn!("HARBOR_USERNAME not found in environment variables or .env file");
        }
        if password.is_empty() {
            warn!("HARBOR_PASSWORD not found in environment variables or .env file");
        }

        Config {
            credentials: Credentials { username, password },
            rest_api: RestApiConfig {
                base_url: get_env_or_default("HARBOR_URL", String::from(DEFAULT_BASE_URL)),
                timeout: get_env_or_none("HARBOR_TIMEOUT"),
            },
            diagnostics: DiagnosticsConfig {
                timings: get_env_flag("HARBOR_TIMINGS", false),
                http_log_debug: get_env_flag("HARBOR_HTTP_LOG_DEBUG", false),
                redact_text: get_env_or_none("HARBOR_REDACT_TEXT"),
            },
            api_version: get_env_or_default(
                "HARBOR_API_VERSION",
                String::from(DEFAULT_API_VERSION),
            ),
        }
    }

    /// Builds a configuration from explicit values, without reading the
    /// environment
    pub fn with_credentials(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Config {
            credentials: Credentials::new(username, password),
            rest_api: RestApiConfig {
                base_url: base_url.into(),
                timeout: None,
            },
            diagnostics: DiagnosticsConfig::default(),
            api_version: String::from(DEFAULT_API_VERSION),
        }
    }
}
