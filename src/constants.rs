/// User agent string used in HTTP requests to identify this client to the registry
pub const USER_AGENT: &str = "harbor-client/0.1.0";
/// Name of the cookie carrying the registry session id
pub const SESSION_COOKIE: &str = "beegosessionID";
/// Response header holding the server-side correlation id of a request
pub const REQUEST_ID_HEADER: &str = "x-harbor-request-id";
/// Request header carrying the negotiated API version
pub const API_VERSION_HEADER: &str = "x-harbor-api-version";
/// Prefix prepended to every relative API path
pub const API_PREFIX: &str = "/api";
/// Login endpoint, relative to the base URL
pub const LOGIN_PATH: &str = "/login";
/// Logout endpoint, relative to the base URL
pub const LOGOUT_PATH: &str = "/logout";
/// Default base URL when none is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost";
/// Default API version requested when none is configured
pub const DEFAULT_API_VERSION: &str = "2.0";
/// Tag prepended to SHA1 digests of redacted values
pub const SHA1_TAG: &str = "{SHA1}";
/// Header names whose values never reach the logs in plaintext (lowercase)
pub const SENSITIVE_HEADERS: [&str; 4] = ["authorization", "cookie", "set-cookie", "x-auth-token"];
/// Cookie names whose values never reach the logs in plaintext
pub const SENSITIVE_COOKIES: [&str; 1] = [SESSION_COOKIE];
/// JSON body paths redacted before a body is logged
pub const SENSITIVE_BODY_PATHS: [&[&str]; 2] = [&["password"], &["oldPassword"]];
/// Body fragments with which some transports disguise a refused connection as HTTP 400
pub const CONNECTION_REFUSED_MARKERS: [&str; 2] = ["Connection refused", "actively refused"];
