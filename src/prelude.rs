/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 17/10/26
******************************************************************************/

//! # Harbor Client Prelude
//!
//! Brings the commonly used types of the crate into scope.
//!
//! ```rust
//! use harbor_client::prelude::*;
//!
//! let config = Config::with_credentials("https://registry.example.com", "admin", "secret");
//! let client = HttpClient::new(config).unwrap();
//! assert_eq!(client.api_version().to_string(), "2.0");
//! ```

// ============================================================================
// CORE CONFIGURATION AND SETUP
// ============================================================================

/// Configuration for the Harbor client
pub use crate::application::config::{Config, Credentials, DiagnosticsConfig, RestApiConfig};

/// Library version information
pub use crate::{VERSION, version};

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// Error types of the library
pub use crate::error::{ApiError, ApiErrorKind, AppError};

// ============================================================================
// CLIENTS
// ============================================================================

/// Session-authenticated HTTP client
pub use crate::application::client::HttpClient;

/// Version-specific clients
pub use crate::application::versioned::{
    RegistryApi, V2Client, VersionedClient, create_client, create_client_from_config,
    resolve_version,
};

// ============================================================================
// MODELS
// ============================================================================

/// Request and response models
pub use crate::model::http::{ApiResponse, RequestOptions};

/// Timing records
pub use crate::model::timing::TimingRecord;

/// API versions
pub use crate::model::version::{ApiVersion, get_api_version};

// ============================================================================
// UTILITIES
// ============================================================================

/// Logging utilities
pub use crate::utils::logger::setup_logger;

/// Redaction helpers
pub use crate::utils::redact::{redact, redact_value};

// ============================================================================
// RE-EXPORTS FROM EXTERNAL CRATES
// ============================================================================

/// Re-export commonly used external types
pub use async_trait::async_trait;
pub use reqwest::{Method, StatusCode};
pub use serde::{Deserialize, Serialize};
pub use serde_json::{Value, json};
pub use tracing::{debug, error, info, warn};
