use harbor_client::prelude::*;

/// Lists the projects of a registry
///
/// Configure through the environment or a `.env` file:
/// - HARBOR_URL, HARBOR_USERNAME, HARBOR_PASSWORD
/// - HARBOR_API_VERSION (default: 2.0)
/// - HARBOR_TIMINGS=1 to print per-request timings
/// - HARBOR_HTTP_LOG_DEBUG=1 with LOGLEVEL=DEBUG for redacted wire logs
///
/// Run with: cargo run --bin list_projects
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_logger();

    let config = Config::new();
    info!("Connecting to {}", config.rest_api.base_url);

    let client = create_client_from_config(config)?;
    info!("Using API version {}", client.api_version());

    let projects = client.get("/projects").await?;
    match projects.as_array() {
        Some(list) => {
            for project in list {
                info!(
                    "Project {}: {}",
                    project["project_id"],
                    project["name"].as_str().unwrap_or("<unnamed>")
                );
            }
        }
        None => info!("Projects: {}", projects),
    }

    if let Some(request_id) = client.http().last_request_id() {
        info!("Last request id: {}", request_id);
    }
    for timing in client.http().get_timings() {
        info!(
            "{} took {}ms",
            timing.name,
            timing.elapsed().num_milliseconds()
        );
    }

    client.http().logout().await;
    Ok(())
}
