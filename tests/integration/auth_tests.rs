use crate::common::{self, PASSWORD, USERNAME};
use harbor_client::prelude::*;
use mockito::{Matcher, Server};
use tokio_test::block_on;

#[tokio::test]
async fn test_authenticate_stores_session_cookie() {
    let mut server = Server::new_async().await;
    let login = common::mock_login(&mut server, "abc123").await;
    let client = common::create_test_client(&server);

    assert!(!client.has_session().await);
    client.authenticate().await.unwrap();

    assert!(client.has_session().await);
    assert_eq!(client.session_id().await.as_deref(), Some("abc123"));
    login.assert_async().await;
}

#[test]
fn test_authenticate_blocking_runtime() {
    let mut server = Server::new();
    let login = server
        .mock("POST", "/login")
        .with_status(200)
        .with_header("set-cookie", "beegosessionID=sync-session; Path=/")
        .create();

    let client = HttpClient::new(common::test_config(&server.url())).unwrap();
    block_on(client.authenticate()).unwrap();

    assert_eq!(
        block_on(client.session_id()).as_deref(),
        Some("sync-session")
    );
    login.assert();
}

#[tokio::test]
async fn test_authenticate_requires_username_without_network_call() {
    let mut server = Server::new_async().await;
    let login = server
        .mock("POST", "/login")
        .expect(0)
        .create_async()
        .await;

    let config = Config::with_credentials(server.url(), "", PASSWORD);
    let client = HttpClient::new(config).unwrap();

    match client.authenticate().await {
        Err(AppError::AuthorizationFailure(msg)) => assert!(msg.contains("'username'")),
        other => panic!("expected AuthorizationFailure, got {other:?}"),
    }
    assert!(!client.has_session().await);
    login.assert_async().await;
}

#[tokio::test]
async fn test_authenticate_requires_password_and_base_url() {
    let mut server = Server::new_async().await;
    let login = server
        .mock("POST", "/login")
        .expect(0)
        .create_async()
        .await;

    let client = HttpClient::new(Config::with_credentials(server.url(), USERNAME, "")).unwrap();
    match client.authenticate().await {
        Err(AppError::AuthorizationFailure(msg)) => assert!(msg.contains("'password'")),
        other => panic!("expected AuthorizationFailure, got {other:?}"),
    }

    let client = HttpClient::new(Config::with_credentials("", USERNAME, PASSWORD)).unwrap();
    match client.authenticate().await {
        Err(AppError::AuthorizationFailure(msg)) => assert!(msg.contains("'base_url'")),
        other => panic!("expected AuthorizationFailure, got {other:?}"),
    }
    login.assert_async().await;
}

#[tokio::test]
async fn test_verb_without_credentials_fails_before_any_call() {
    let mut server = Server::new_async().await;
    let api = server
        .mock("GET", "/api/projects")
        .expect(0)
        .create_async()
        .await;

    let client = HttpClient::new(Config::with_credentials(server.url(), USERNAME, "")).unwrap();
    let result: Result<Value, AppError> = client.get("/projects").await;

    assert!(matches!(result, Err(AppError::AuthorizationFailure(_))));
    api.assert_async().await;
}

#[tokio::test]
async fn test_failed_login_is_not_an_error() {
    let mut server = Server::new_async().await;
    let login = server
        .mock("POST", "/login")
        .with_status(401)
        .expect(1)
        .create_async()
        .await;

    let client = common::create_test_client(&server);
    client.authenticate().await.unwrap();

    assert!(!client.has_session().await);
    login.assert_async().await;
}

#[tokio::test]
async fn test_logout_sends_cookie_and_clears_session() {
    let mut server = Server::new_async().await;
    let _login = common::mock_login(&mut server, "abc123").await;
    let logout = server
        .mock("GET", "/logout")
        .match_header("cookie", common::session_cookie("abc123").as_str())
        .with_status(200)
        .expect(1)
        .create_async()
        .await;

    let client = common::create_test_client(&server);
    client.authenticate().await.unwrap();
    client.logout().await;

    assert!(!client.has_session().await);
    logout.assert_async().await;
}

#[tokio::test]
async fn test_unauthenticate_is_best_effort() {
    let mut server = Server::new_async().await;
    let _login = common::mock_login(&mut server, "abc123").await;
    let logout = server
        .mock("GET", "/logout")
        .with_status(500)
        .expect(1)
        .create_async()
        .await;

    let client = common::create_test_client(&server);
    client.authenticate().await.unwrap();
    client.unauthenticate().await;

    // the local session is only dropped by logout()
    assert_eq!(client.session_id().await.as_deref(), Some("abc123"));
    logout.assert_async().await;
}

#[tokio::test]
async fn test_unreachable_registry_is_connection_refused() {
    let client = HttpClient::new(common::test_config("http://127.0.0.1:1")).unwrap();

    let result = client.authenticate().await;
    assert!(matches!(result, Err(AppError::ConnectionRefused(_))));

    // logout never fails, even without a registry
    client.unauthenticate().await;
}

#[tokio::test]
async fn test_login_form_is_url_encoded() {
    let mut server = Server::new_async().await;
    let login = server
        .mock("POST", "/login")
        .match_body(Matcher::Regex("principal=admin".to_string()))
        .with_status(200)
        .with_header("set-cookie", "beegosessionID=s1")
        .create_async()
        .await;

    let client = common::create_test_client(&server);
    client.authenticate().await.unwrap();
    assert!(client.has_session().await);
    login.assert_async().await;
}
