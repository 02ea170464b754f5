use harbor_client::application::client::HttpClient;
use harbor_client::application::config::Config;
use harbor_client::application::versioned::{
    RegistryApi, VersionedClient, create_client, create_client_from_config, resolve_version,
};
use harbor_client::error::AppError;
use harbor_client::model::version::ApiVersion;

fn config() -> Config {
    Config::with_credentials("https://registry.example.com/", "admin", "Harbor12345")
}

#[test]
fn test_create_client_v2() {
    let client = create_client("2", config()).unwrap();
    assert!(matches!(client, VersionedClient::V2(_)));
    assert_eq!(client.api_version(), ApiVersion::new(2, 0));
    assert_eq!(client.http().base_url(), "https://registry.example.com");
}

#[test]
fn test_create_client_rejects_latest() {
    for requested in ["latest", "2.latest"] {
        match create_client(requested, config()) {
            Err(AppError::UnsupportedVersion(msg)) => {
                assert_eq!(msg, "The version should be explicit, not latest.")
            }
            _ => panic!("{requested} should be rejected"),
        }
    }
}

#[test]
fn test_create_client_rejects_unsupported() {
    for requested in ["1.1", "3", "2.9", "banana"] {
        assert!(
            matches!(
                create_client(requested, config()),
                Err(AppError::UnsupportedVersion(_))
            ),
            "{requested} should be rejected"
        );
    }
}

#[test]
fn test_create_client_from_config() {
    let mut config = config();
    config.api_version = "latest".to_string();
    assert!(create_client_from_config(config).is_err());

    let client = create_client_from_config(self::config()).unwrap();
    assert_eq!(client.api_version().to_string(), "2.0");
}

#[test]
fn test_resolve_version() {
    assert_eq!(resolve_version("2.0").unwrap(), ApiVersion::new(2, 0));
    assert!(resolve_version("latest").is_err());
}

#[test]
fn test_http_client_new_parses_config_version() {
    let client = HttpClient::new(config()).unwrap();
    assert_eq!(client.api_version(), ApiVersion::new(2, 0));

    let mut bad = config();
    bad.api_version = "two".to_string();
    assert!(matches!(
        HttpClient::new(bad),
        Err(AppError::UnsupportedVersion(_))
    ));
}

#[test]
fn test_new_client_has_empty_state() {
    let client = HttpClient::new(config()).unwrap();
    assert!(client.get_timings().is_empty());
    assert!(client.last_request_id().is_none());
    assert!(!tokio_test::block_on(client.has_session()));
}
