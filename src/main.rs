use tracing_subscriber::EnvFilter;

use task_dashboard::app::{AppState, build_router};
use task_dashboard::client::create_client;
use task_dashboard::config::ServerConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // One client per process, handed to every component that needs it
    let client = create_client();
    match &client {
        Some(client) => tracing::info!(url = client.base_url(), "Backend client configured"),
        None => tracing::error!("Backend not configured; serving configuration error only"),
    }

    let app = build_router(AppState::from_client(client));

    let server = ServerConfig::from_env();
    let addr = server.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server running on http://{}", addr);
    tracing::info!("  - Dashboard: GET http://{}/api/dashboard", addr);
    tracing::info!("  - API Docs: http://{}/api/docs", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
