use harbor_client::error::{ApiError, ApiErrorKind, AppError};
use reqwest::{Method, StatusCode};
use serde_json::json;

fn api_error(status: u16, body: Option<serde_json::Value>) -> ApiError {
    ApiError::from_response(
        StatusCode::from_u16(status).unwrap(),
        body.as_ref(),
        "https://registry.example.com/api/projects",
        &Method::GET,
        None,
    )
}

#[test]
fn test_app_error_display_authorization_failure() {
    let error = AppError::AuthorizationFailure("missing username".to_string());
    assert_eq!(error.to_string(), "authorization failure: missing username");
}

#[test]
fn test_app_error_display_connection_refused() {
    let error = AppError::ConnectionRefused("Connection refused".to_string());
    assert_eq!(error.to_string(), "connection refused: Connection refused");
}

#[test]
fn test_app_error_display_unsupported_version() {
    let error = AppError::UnsupportedVersion("latest".to_string());
    assert_eq!(error.to_string(), "unsupported version: latest");
}

#[test]
fn test_kind_from_status() {
    let cases = [
        (400, ApiErrorKind::BadRequest),
        (401, ApiErrorKind::Unauthorized),
        (403, ApiErrorKind::Forbidden),
        (404, ApiErrorKind::NotFound),
        (405, ApiErrorKind::MethodNotAllowed),
        (406, ApiErrorKind::NotAcceptable),
        (409, ApiErrorKind::Conflict),
        (413, ApiErrorKind::OverLimit),
        (429, ApiErrorKind::RateLimit),
        (501, ApiErrorKind::NotImplemented),
        (500, ApiErrorKind::Other),
        (418, ApiErrorKind::Other),
    ];
    for (status, kind) in cases {
        assert_eq!(api_error(status, None).kind, kind, "status {status}");
    }
}

#[test]
fn test_message_from_flat_body() {
    let error = api_error(
        404,
        Some(json!({"message": "project not found", "details": "id=7"})),
    );
    assert_eq!(error.message, "project not found");
    assert_eq!(error.details.as_deref(), Some("id=7"));
}

#[test]
fn test_message_from_wrapped_body() {
    let error = api_error(409, Some(json!({"conflict": {"message": "name taken"}})));
    assert_eq!(error.message, "name taken");
    assert_eq!(error.details, None);
}

#[test]
fn test_message_from_error_list() {
    let error = api_error(
        400,
        Some(json!([{"code": "BAD", "message": "first"}, {"message": "second"}])),
    );
    assert_eq!(error.message, "first; second");
}

#[test]
fn test_message_falls_back_to_reason() {
    assert_eq!(api_error(500, None).message, "Internal Server Error");
    assert_eq!(api_error(404, Some(json!({"unrelated": 1, "x": 2}))).message, "Not Found");
}

#[test]
fn test_api_error_display() {
    let error = ApiError::from_response(
        StatusCode::UNAUTHORIZED,
        None,
        "https://registry.example.com/api/projects",
        &Method::GET,
        Some("req-42".to_string()),
    );
    assert_eq!(
        error.to_string(),
        "unauthorized (HTTP 401) GET https://registry.example.com/api/projects: Unauthorized (Request-ID: req-42)"
    );
}

#[test]
fn test_is_unauthorized() {
    assert!(AppError::from(api_error(401, None)).is_unauthorized());
    assert!(!AppError::from(api_error(403, None)).is_unauthorized());
    assert!(!AppError::AuthorizationFailure("x".into()).is_unauthorized());
}

#[test]
fn test_status_accessor() {
    assert_eq!(
        AppError::from(api_error(409, None)).status(),
        Some(StatusCode::CONFLICT)
    );
    assert_eq!(AppError::ConnectionRefused("x".into()).status(), None);
}

#[test]
fn test_app_error_from_serde() {
    let json = r#"{"invalid": json}"#;
    let serde_error = serde_json::from_str::<serde_json::Value>(json).unwrap_err();
    let app_error: AppError = serde_error.into();

    match app_error {
        AppError::Json(_) => (),
        _ => panic!("Expected Json error"),
    }
}
