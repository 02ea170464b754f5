use harbor_client::model::http::{
    ApiResponse, RequestOptions, format_request_log, format_response_log, parse_body,
};
use harbor_client::utils::redact::redact_value;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Project {
    project_id: u64,
    name: String,
}

fn request_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("user-agent", HeaderValue::from_static("harbor-client/0.1.0"));
    headers.insert("accept", HeaderValue::from_static("application/json"));
    headers.insert("authorization", HeaderValue::from_static("Basic c2VjcmV0"));
    headers
}

#[test]
fn test_request_options_json() {
    let project = Project {
        project_id: 1,
        name: "library".to_string(),
    };
    let options = RequestOptions::json(&project).unwrap();
    let body = options.body.unwrap();
    assert_eq!(body, json!({"project_id": 1, "name": "library"}));

    let decoded: Project = serde_json::from_str(&serde_json::to_string(&body).unwrap()).unwrap();
    assert_eq!(decoded, project);
}

#[test]
fn test_cookie_header() {
    assert_eq!(RequestOptions::new().cookie_header(), None);

    let options = RequestOptions::new()
        .with_cookie("beegosessionID", "abc")
        .with_cookie("lang", "en");
    assert_eq!(
        options.cookie_header().as_deref(),
        Some("beegosessionID=abc; lang=en")
    );
}

#[test]
fn test_with_header_rejects_invalid_name() {
    assert!(RequestOptions::new().with_header("x-trace", "1").is_ok());
    assert!(RequestOptions::new().with_header("bad header", "1").is_err());
}

#[test]
fn test_request_log_redacts_secrets() {
    let options = RequestOptions::new().with_cookie("beegosessionID", "s3ss10n");
    let body = json!({"username": "dev", "password": "Harbor12345"});
    let line = format_request_log(
        &Method::POST,
        "https://registry.example.com/api/users",
        &request_headers(),
        &options.cookies,
        Some(&body),
        None,
    );

    assert!(line.starts_with("REQ: curl -g -i 'https://registry.example.com/api/users' -X POST"));
    assert!(line.contains("-H \"accept: application/json\""));
    assert!(!line.contains("s3ss10n"));
    assert!(!line.contains("c2VjcmV0"));
    assert!(!line.contains("Harbor12345"));
    assert!(line.contains(&format!("-b \"beegosessionID: {}\"", redact_value("s3ss10n", None))));
    assert!(line.contains(&redact_value("Basic c2VjcmV0", None)));
    assert!(line.contains("\"username\":\"dev\""));

    let again = format_request_log(
        &Method::POST,
        "https://registry.example.com/api/users",
        &request_headers(),
        &options.cookies,
        Some(&body),
        None,
    );
    assert_eq!(line, again);
}

#[test]
fn test_request_log_sorts_headers() {
    let line = format_request_log(
        &Method::GET,
        "https://registry.example.com/api/projects",
        &request_headers(),
        &Default::default(),
        None,
        None,
    );
    let accept = line.find("accept:").unwrap();
    let authorization = line.find("authorization:").unwrap();
    let user_agent = line.find("user-agent:").unwrap();
    assert!(accept < authorization && authorization < user_agent);
    assert!(!line.contains(" -d "));
}

#[test]
fn test_request_log_override_text() {
    let options = RequestOptions::new().with_cookie("beegosessionID", "s3ss10n");
    let line = format_request_log(
        &Method::GET,
        "https://registry.example.com/api/projects",
        &request_headers(),
        &options.cookies,
        None,
        Some("<redacted>"),
    );
    assert!(line.contains("-b \"beegosessionID: <redacted>\""));
    assert!(line.contains("-H \"authorization: <redacted>\""));
    assert!(!line.contains("{SHA1}"));
}

#[test]
fn test_response_log() {
    let mut headers = HeaderMap::new();
    headers.insert("set-cookie", HeaderValue::from_static("beegosessionID=s3ss10n"));
    let body = json!({"id": 2});

    let line = format_response_log(StatusCode::OK, &headers, Some(&body), None);
    assert!(line.starts_with("RESP: [200] "));
    assert!(line.contains("RESP BODY: {\"id\":2}"));
    assert!(!line.contains("s3ss10n"));

    let line = format_response_log(StatusCode::BAD_REQUEST, &headers, Some(&body), None);
    assert!(line.contains("RESP BODY: null"));
}

#[test]
fn test_parse_body() {
    assert_eq!(parse_body(""), None);
    assert_eq!(parse_body("   "), None);
    assert_eq!(parse_body("<html>oops</html>"), None);
    assert_eq!(parse_body("[1,2]"), Some(json!([1, 2])));
}

#[test]
fn test_api_response_json() {
    let response = ApiResponse {
        status: StatusCode::OK,
        headers: HeaderMap::new(),
        body: Some(json!([{"project_id": 1, "name": "library"}])),
        request_id: None,
    };
    let projects: Vec<Project> = response.json().unwrap();
    assert_eq!(projects[0].name, "library");

    let empty = ApiResponse {
        status: StatusCode::CREATED,
        headers: HeaderMap::new(),
        body: None,
        request_id: None,
    };
    let nothing: Option<Project> = empty.json().unwrap();
    assert!(nothing.is_none());
    empty.into_json::<()>().unwrap();
}
