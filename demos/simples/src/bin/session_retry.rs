use harbor_client::prelude::*;
use serde_json::json;

/// Shows the session life cycle: explicit login, a call, a server-side
/// logout behind the client's back and the transparent re-login that follows.
///
/// Run with: cargo run --bin session_retry
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_logger();

    let client = HttpClient::new(Config::new())?;

    client.authenticate().await?;
    if !client.has_session().await {
        warn!("Login did not establish a session, check the credentials");
        return Ok(());
    }

    let info: Value = client.get("/systeminfo").await?;
    info!("System info: {}", info);

    // Invalidate the session on the server while keeping the cookie locally
    client.unauthenticate().await;

    let search: Value = client.get("/search?q=library").await?;
    info!("Search after re-login: {}", search);

    let body = json!({ "project_name": "demo", "metadata": { "public": "false" } });
    match client.post::<_, Value>("/projects", &body).await {
        Ok(_) => info!("Project created"),
        Err(e) if e.status() == Some(StatusCode::CONFLICT) => info!("Project already exists"),
        Err(e) => return Err(e.into()),
    }

    client.logout().await;
    Ok(())
}
