/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 17/10/26
******************************************************************************/

//! Session-authenticated HTTP client for the Harbor REST API
//!
//! [`HttpClient`] handles:
//! - Lazy login with a form-encoded `POST /login` and the `beegosessionID` cookie
//! - One re-login and retry when a call is answered with 401
//! - Version header injection on every API call
//! - Optional per-request timings and redacted wire logs
//!
//! # Example
//! ```ignore
//! use harbor_client::application::client::HttpClient;
//! use harbor_client::application::config::Config;
//!
//! let client = HttpClient::new(Config::new())?;
//! let projects: serde_json::Value = client.get("/projects").await?;
//! ```

use crate::application::config::Config;
use crate::constants::{
    API_PREFIX, CONNECTION_REFUSED_MARKERS, LOGIN_PATH, LOGOUT_PATH, REQUEST_ID_HEADER,
    SESSION_COOKIE, USER_AGENT,
};
use crate::error::{ApiError, AppError};
use crate::model::http::{
    ApiResponse, RequestOptions, format_request_log, format_response_log, parse_body,
};
use crate::model::timing::{TimingGuard, TimingRecord, Timings};
use crate::model::version::{ApiVersion, update_headers};
use crate::utils::redact::redact_value;
use reqwest::Client as HttpInternalClient;
use reqwest::header::{ACCEPT, CONTENT_TYPE, COOKIE, HeaderValue, USER_AGENT as USER_AGENT_HEADER};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{Mutex as AsyncMutex, RwLock};
use tracing::{debug, info, warn};

/// HTTP client for one Harbor registry with automatic session handling
///
/// The session cookie, the timing log and the last request id are owned by
/// the instance. Logins are serialized and a session renewed by one caller
/// is reused by the others, so a shared instance re-logs in once per
/// expired session.
pub struct HttpClient {
    config: Arc<Config>,
    http_client: HttpInternalClient,
    base_url: String,
    api_version: ApiVersion,
    timeout: Option<Duration>,
    session: Arc<RwLock<Option<String>>>,
    reauth_lock: AsyncMutex<()>,
    times: Timings,
    last_request_id: Arc<Mutex<Option<String>>>,
}

impl HttpClient {
    /// Creates a client for the version named in `config.api_version`
    ///
    /// No network call is made; login happens on the first request.
    pub fn new(config: Config) -> Result<Self, AppError> {
        let api_version: ApiVersion = config.api_version.parse()?;
        Self::with_api_version(config, api_version)
    }

    /// Creates a client speaking an already resolved API version
    pub fn with_api_version(config: Config, api_version: ApiVersion) -> Result<Self, AppError> {
        let http_client = HttpInternalClient::builder()
            .user_agent(USER_AGENT)
            .build()?;

        let base_url = config.rest_api.base_url.trim_end_matches('/').to_string();
        let timeout = config.rest_api.timeout_duration();

        Ok(Self {
            config: Arc::new(config),
            http_client,
            base_url,
            api_version,
            timeout,
            session: Arc::new(RwLock::new(None)),
            reauth_lock: AsyncMutex::new(()),
            times: Arc::default(),
            last_request_id: Arc::default(),
        })
    }

    /// Logs in and stores the session cookie
    ///
    /// Fails with [`AppError::AuthorizationFailure`] before any network call
    /// if the base URL, username or password is empty. A login answered with
    /// anything but 200 is only logged: check [`HttpClient::has_session`] for
    /// a strict outcome.
    pub async fn authenticate(&self) -> Result<(), AppError> {
        let credentials = &self.config.credentials;
        for (field, value) in [
            ("base_url", self.base_url.as_str()),
            ("username", credentials.username.as_str()),
            ("password", credentials.password.as_str()),
        ] {
            if value.is_empty() {
                return Err(AppError::AuthorizationFailure(format!(
                    "Authentication requires '{field}', which should be specified in the client configuration"
                )));
            }
        }

        let url = format!("{}{}", self.base_url, LOGIN_PATH);
        debug!("Sending login request to: {}", url);

        let mut request = self.http_client.post(&url).form(&[
            ("principal", credentials.username.as_str()),
            ("password", credentials.password.as_str()),
        ]);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request
            .send()
            .await
            .map_err(|e| transport_error(e, &url))?;
        let status = response.status();

        if status != StatusCode::OK {
            warn!("Login to {} failed with status {}", url, status);
            return Ok(());
        }

        let session_id = response
            .cookies()
            .find(|c| c.name() == SESSION_COOKIE)
            .map(|c| c.value().to_string());

        match session_id {
            Some(id) => {
                info!(
                    "✓ Login successful, session id: {}",
                    redact_value(&id, self.redact_text())
                );
                *self.session.write().await = Some(id);
            }
            None => warn!("Login succeeded but no {} cookie was set", SESSION_COOKIE),
        }
        Ok(())
    }

    /// Best-effort logout of the current session on the server
    ///
    /// Failures are logged, never returned. The in-memory session is kept;
    /// see [`HttpClient::logout`] to drop it as well.
    pub async fn unauthenticate(&self) {
        let session_id = self.session.read().await.clone();
        let url = format!("{}{}", self.base_url, LOGOUT_PATH);

        let mut request = self.http_client.get(&url);
        if let Some(id) = &session_id {
            request = request.header(COOKIE, format!("{SESSION_COOKIE}={id}"));
        }
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        match request.send().await {
            Ok(response) if response.status().is_success() => debug!("Successfully logged out"),
            Ok(response) => warn!("Logout answered with status {}", response.status()),
            Err(e) => warn!("Logout request to {} failed: {}", url, e),
        }
    }

    /// Logs out on the server and forgets the session
    pub async fn logout(&self) {
        info!("Logging out");
        self.unauthenticate().await;
        self.clear_session().await;
    }

    /// Sends one request to `<base_url>/api<path>`
    ///
    /// This is the transport primitive: it attaches no session cookie of its
    /// own (pass one in `options.cookies`) and never retries.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        options: &RequestOptions,
    ) -> Result<ApiResponse, AppError> {
        let url = format!("{}{}{}", self.base_url, API_PREFIX, path);
        let cookie_header = options.cookie_header();
        let mut headers = options.headers.clone();

        headers.insert(USER_AGENT_HEADER, HeaderValue::from_static(USER_AGENT));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let payload = match &options.body {
            Some(body) => {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
                Some(serde_json::to_string(body)?)
            }
            None => None,
        };
        update_headers(&mut headers, &self.api_version)?;

        if self.config.diagnostics.http_log_debug {
            debug!(
                "{}",
                format_request_log(
                    &method,
                    &url,
                    &headers,
                    &options.cookies,
                    options.body.as_ref(),
                    self.redact_text()
                )
            );
        }

        let mut request = self.http_client.request(method.clone(), &url).headers(headers);
        if let Some(cookie) = cookie_header {
            request = request.header(COOKIE, cookie);
        }
        if let Some(payload) = payload {
            request = request.body(payload);
        }
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request
            .send()
            .await
            .map_err(|e| transport_error(e, &url))?;
        let status = response.status();
        let response_headers = response.headers().clone();
        let request_id = response_headers
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let text = response.text().await?;
        let body = parse_body(&text);

        if self.config.diagnostics.http_log_debug {
            debug!(
                "{}",
                format_response_log(status, &response_headers, body.as_ref(), self.redact_text())
            );
        }

        // Some transports report a refused connection as a 400 answer
        if status == StatusCode::BAD_REQUEST
            && CONNECTION_REFUSED_MARKERS.iter().any(|m| text.contains(m))
        {
            return Err(AppError::ConnectionRefused(text));
        }

        self.set_last_request_id(request_id.clone());

        if status.as_u16() >= 400 {
            return Err(ApiError::from_response(status, body.as_ref(), &url, &method, request_id).into());
        }

        Ok(ApiResponse {
            status,
            headers: response_headers,
            body,
            request_id,
        })
    }

    /// [`HttpClient::request`] recorded in the timing log when timings are on
    ///
    /// The record is appended whatever the outcome of the request.
    pub async fn time_request(
        &self,
        method: Method,
        path: &str,
        options: &RequestOptions,
    ) -> Result<ApiResponse, AppError> {
        let _timing = TimingGuard::start(
            &self.times,
            self.config.diagnostics.timings,
            format!("{method} {path}"),
        );
        self.request(method, path, options).await
    }

    /// Sends one authenticated request, re-authenticating once on 401
    ///
    /// Logs in first if there is no session. When the first attempt is
    /// answered with 401 the old session is logged out and dropped, a new one
    /// is obtained and the request is retried once with it. If the retry is
    /// answered with 401 too, the error of the first attempt is returned.
    /// Other errors are returned as they are, without any retry.
    ///
    /// Logins run under a lock. A caller whose session was already replaced
    /// by a concurrent re-login retries with the new session instead of
    /// logging in again.
    pub async fn authenticated_request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<ApiResponse, AppError> {
        if !self.has_session().await {
            let _login = self.reauth_lock.lock().await;
            if !self.has_session().await {
                info!("No active session, logging in");
                self.authenticate().await?;
            }
        }

        let mut options = RequestOptions {
            body,
            ..RequestOptions::default()
        };
        let sent_session = self.attach_session(&mut options).await;
        match self.time_request(method.clone(), path, &options).await {
            Err(original) if original.is_unauthorized() => {
                let reauth = self.reauth_lock.lock().await;
                let current = self.session_id().await;
                if current.is_some() && current != sent_session {
                    debug!("{} {} answered 401, session already renewed", method, path);
                } else {
                    warn!("{} {} answered 401, re-authenticating", method, path);
                    self.unauthenticate().await;
                    self.clear_session().await;
                    self.authenticate().await?;
                }
                drop(reauth);

                self.attach_session(&mut options).await;
                match self.time_request(method.clone(), path, &options).await {
                    Err(retry) if retry.is_unauthorized() => {
                        warn!("{} {} still unauthorized after re-authentication", method, path);
                        Err(original)
                    }
                    other => other,
                }
            }
            other => other,
        }
    }

    /// Makes a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        self.get_response(path).await?.into_json()
    }

    /// Makes a POST request with a JSON body
    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        self.post_response(path, body).await?.into_json()
    }

    /// Makes a PUT request with a JSON body
    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        self.put_response(path, body).await?.into_json()
    }

    /// Makes a DELETE request
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        self.delete_response(path).await?.into_json()
    }

    /// GET returning the whole response
    pub async fn get_response(&self, path: &str) -> Result<ApiResponse, AppError> {
        self.authenticated_request(Method::GET, path, None).await
    }

    /// POST returning the whole response
    pub async fn post_response<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse, AppError> {
        let body = serde_json::to_value(body)?;
        self.authenticated_request(Method::POST, path, Some(body))
            .await
    }

    /// PUT returning the whole response
    pub async fn put_response<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse, AppError> {
        let body = serde_json::to_value(body)?;
        self.authenticated_request(Method::PUT, path, Some(body))
            .await
    }

    /// DELETE returning the whole response
    pub async fn delete_response(&self, path: &str) -> Result<ApiResponse, AppError> {
        self.authenticated_request(Method::DELETE, path, None).await
    }

    /// Copy of the timing log
    #[must_use]
    pub fn get_timings(&self) -> Vec<TimingRecord> {
        self.times
            .lock()
            .map(|times| times.clone())
            .unwrap_or_default()
    }

    /// Empties the timing log
    pub fn reset_timings(&self) {
        if let Ok(mut times) = self.times.lock() {
            times.clear();
        }
    }

    /// Correlation id of the last API answer, if the registry sent one
    #[must_use]
    pub fn last_request_id(&self) -> Option<String> {
        self.last_request_id
            .lock()
            .ok()
            .and_then(|id| id.clone())
    }

    /// Current session cookie value
    pub async fn session_id(&self) -> Option<String> {
        self.session.read().await.clone()
    }

    /// Returns `true` once a login has stored a session
    pub async fn has_session(&self) -> bool {
        self.session.read().await.is_some()
    }

    /// API version sent with every request
    #[must_use]
    pub fn api_version(&self) -> ApiVersion {
        self.api_version
    }

    /// Base URL without trailing slash
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Configuration the client was built from
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    async fn clear_session(&self) {
        *self.session.write().await = None;
    }

    /// Sets the session cookie of `options` to the current session and
    /// returns the session id it carries
    async fn attach_session(&self, options: &mut RequestOptions) -> Option<String> {
        let session = self.session.read().await.clone();
        match &session {
            Some(id) => {
                options.cookies.insert(SESSION_COOKIE.to_string(), id.clone());
            }
            None => {
                options.cookies.remove(SESSION_COOKIE);
            }
        }
        session
    }

    fn set_last_request_id(&self, request_id: Option<String>) {
        if let Ok(mut last) = self.last_request_id.lock() {
            *last = request_id;
        }
    }

    fn redact_text(&self) -> Option<&str> {
        self.config.diagnostics.redact_text.as_deref()
    }
}

/// Maps a transport failure, reporting connect failures as refused connections
fn transport_error(err: reqwest::Error, url: &str) -> AppError {
    if err.is_connect() {
        AppError::ConnectionRefused(format!("{url}: {err}"))
    } else {
        AppError::Network(err)
    }
}
