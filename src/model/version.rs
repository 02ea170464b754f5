/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 17/10/26
******************************************************************************/

//! API version negotiation
//!
//! A requested version string such as `"2"`, `"2.0"` or `"latest"` is turned
//! into an [`ApiVersion`], validated against the versions this crate can
//! serve, and finally attached to every request as the
//! `x-harbor-api-version` header.

use crate::constants::API_VERSION_HEADER;
use crate::error::AppError;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Major versions with a client implementation
pub const SUPPORTED_MAJOR_VERSIONS: [u32; 1] = [2];
/// Oldest version this client can talk to
pub const MIN_API_VERSION: ApiVersion = ApiVersion::new(2, 0);
/// Newest version this client can talk to
pub const MAX_API_VERSION: ApiVersion = ApiVersion::new(2, 0);

/// A `major.minor` API version, or the unresolved "latest" marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ApiVersion {
    major: u32,
    minor: u32,
    latest: bool,
}

impl ApiVersion {
    /// Creates an explicit version
    #[must_use]
    pub const fn new(major: u32, minor: u32) -> Self {
        Self {
            major,
            minor,
            latest: false,
        }
    }

    /// The null version, which adds no header to requests
    #[must_use]
    pub const fn null() -> Self {
        Self::new(0, 0)
    }

    /// The "latest" marker for the newest supported major version
    #[must_use]
    pub const fn latest() -> Self {
        Self {
            major: MAX_API_VERSION.major,
            minor: 0,
            latest: true,
        }
    }

    /// Major part of the version
    #[must_use]
    pub fn major(&self) -> u32 {
        self.major
    }

    /// Minor part of the version (0 for the latest marker)
    #[must_use]
    pub fn minor(&self) -> u32 {
        self.minor
    }

    /// Returns `true` for an unresolved "latest" marker
    #[must_use]
    pub fn is_latest(&self) -> bool {
        self.latest
    }

    /// Returns `true` for the null version
    #[must_use]
    pub fn is_null(&self) -> bool {
        !self.latest && self.major == 0 && self.minor == 0
    }
}

impl Default for ApiVersion {
    fn default() -> Self {
        Self::null()
    }
}

impl PartialOrd for ApiVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ApiVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        // "N.latest" sorts above every explicit N.x
        (self.major, self.latest, self.minor).cmp(&(other.major, other.latest, other.minor))
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.latest {
            write!(f, "{}.latest", self.major)
        } else {
            write!(f, "{}.{}", self.major, self.minor)
        }
    }
}

impl FromStr for ApiVersion {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("latest") {
            return Ok(Self::latest());
        }

        let invalid = || {
            AppError::UnsupportedVersion(format!(
                "'{s}' is not a valid API version, expected 'X', 'X.Y' or 'X.latest'"
            ))
        };

        let (major, minor) = match s.split_once('.') {
            Some((major, minor)) => (major, Some(minor)),
            None => (s, None),
        };
        let major: u32 = major.parse().map_err(|_| invalid())?;

        match minor {
            None => Ok(Self::new(major, 0)),
            Some(m) if m.eq_ignore_ascii_case("latest") => Ok(Self {
                major,
                minor: 0,
                latest: true,
            }),
            Some(m) => Ok(Self::new(major, m.parse().map_err(|_| invalid())?)),
        }
    }
}

impl TryFrom<String> for ApiVersion {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ApiVersion> for String {
    fn from(version: ApiVersion) -> Self {
        version.to_string()
    }
}

/// Fails with [`AppError::UnsupportedVersion`] if no client exists for the
/// major part of `version`
pub fn check_major_version(version: &ApiVersion) -> Result<(), AppError> {
    if SUPPORTED_MAJOR_VERSIONS.contains(&version.major) {
        Ok(())
    } else {
        let supported: Vec<String> = SUPPORTED_MAJOR_VERSIONS
            .iter()
            .map(u32::to_string)
            .collect();
        Err(AppError::UnsupportedVersion(format!(
            "major version {} is not supported, use one of: {}",
            version.major,
            supported.join(", ")
        )))
    }
}

/// Parses a requested version and validates it against the supported range
///
/// The "latest" marker passes through unresolved; rejecting it is up to the
/// caller that builds the client.
pub fn get_api_version(requested: &str) -> Result<ApiVersion, AppError> {
    let version: ApiVersion = requested.parse()?;
    check_major_version(&version)?;

    if !version.is_latest() && (version < MIN_API_VERSION || version > MAX_API_VERSION) {
        return Err(AppError::UnsupportedVersion(format!(
            "version {version} is outside the supported range {MIN_API_VERSION} - {MAX_API_VERSION}"
        )));
    }
    Ok(version)
}

/// Adds the version marker for `version` to `headers`
///
/// The null version adds nothing.
pub fn update_headers(headers: &mut HeaderMap, version: &ApiVersion) -> Result<(), AppError> {
    if version.is_null() {
        return Ok(());
    }
    headers.insert(
        HeaderName::from_static(API_VERSION_HEADER),
        HeaderValue::from_str(&version.to_string())?,
    );
    Ok(())
}
