use std::sync::Arc;

use firepro_assistant::config::Config;
use firepro_assistant::routes;
use firepro_assistant::state::AppState;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "firepro_assistant=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;
    if config.api_key.is_none() {
        warn!("OPENAI_API_KEY is not set; chat requests will fail until it is configured");
    }

    let addr = format!("0.0.0.0:{}", config.port);
    let app = routes::create_router(&config).with_state(Arc::new(AppState::new(config.clone())));

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("======================================");
    info!("🔥 {} server running on: {}", config.service_name, config.port);
    info!(routes = ?config.chat_routes, model = %config.model, "chat endpoints ready");
    info!("======================================");

    axum::serve(listener, app).await?;
    Ok(())
}
