/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 17/10/26
******************************************************************************/

//! Version-specific clients
//!
//! The requested API version is resolved once by [`create_client`], which
//! picks the matching [`VersionedClient`] variant. Every variant exposes the
//! same [`RegistryApi`] surface.

use crate::application::client::HttpClient;
use crate::application::config::Config;
use crate::error::AppError;
use crate::model::version::{ApiVersion, check_major_version, get_api_version};
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

/// Operations shared by the clients of every API version
#[async_trait]
pub trait RegistryApi: Send + Sync {
    /// Negotiated API version
    fn api_version(&self) -> ApiVersion;

    /// Underlying authenticated HTTP client
    fn http(&self) -> &HttpClient;

    /// GET `path`, returning the parsed body (`null` when empty)
    async fn get(&self, path: &str) -> Result<Value, AppError> {
        self.http().get(path).await
    }

    /// POST `body` to `path`
    async fn post(&self, path: &str, body: &Value) -> Result<Value, AppError> {
        self.http().post(path, body).await
    }

    /// PUT `body` to `path`
    async fn put(&self, path: &str, body: &Value) -> Result<Value, AppError> {
        self.http().put(path, body).await
    }

    /// DELETE `path`
    async fn delete(&self, path: &str) -> Result<Value, AppError> {
        self.http().delete(path).await
    }
}

/// Client for the 2.x API family
pub struct V2Client {
    http: HttpClient,
}

impl V2Client {
    /// Wraps a pipeline already configured for a 2.x version
    #[must_use]
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl RegistryApi for V2Client {
    fn api_version(&self) -> ApiVersion {
        self.http.api_version()
    }

    fn http(&self) -> &HttpClient {
        &self.http
    }
}

/// Closed set of clients, one variant per supported major version
pub enum VersionedClient {
    /// 2.x
    V2(V2Client),
}

#[async_trait]
impl RegistryApi for VersionedClient {
    fn api_version(&self) -> ApiVersion {
        match self {
            VersionedClient::V2(client) => client.api_version(),
        }
    }

    fn http(&self) -> &HttpClient {
        match self {
            VersionedClient::V2(client) => client.http(),
        }
    }
}

/// Resolves a requested version into an explicit [`ApiVersion`]
///
/// Fails with [`AppError::UnsupportedVersion`] for malformed or unsupported
/// versions and for the "latest" marker.
pub fn resolve_version(requested: &str) -> Result<ApiVersion, AppError> {
    let version = get_api_version(requested)?;
    check_major_version(&version)?;
    if version.is_latest() {
        return Err(AppError::UnsupportedVersion(
            "The version should be explicit, not latest.".to_string(),
        ));
    }
    Ok(version)
}

/// Builds the client matching `version`
///
/// # Example
/// ```ignore
/// use harbor_client::application::config::Config;
/// use harbor_client::application::versioned::{RegistryApi, create_client};
///
/// let client = create_client("2.0", Config::new())?;
/// let projects = client.get("/projects").await?;
/// ```
pub fn create_client(version: &str, config: Config) -> Result<VersionedClient, AppError> {
    let api_version = resolve_version(version)?;
    debug!("Creating client for API version {}", api_version);

    match api_version.major() {
        2 => Ok(VersionedClient::V2(V2Client::new(
            HttpClient::with_api_version(config, api_version)?,
        ))),
        other => Err(AppError::UnsupportedVersion(format!(
            "no client available for major version {other}"
        ))),
    }
}

/// Builds the client for the version named in `config.api_version`
pub fn create_client_from_config(config: Config) -> Result<VersionedClient, AppError> {
    let version = config.api_version.clone();
    create_client(&version, config)
}
