use std::env;
use std::net::SocketAddr;

use anyhow::Result;
use moodlog_api::{build_app, ApiConfig};
use moodlog_observability::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing("moodlog_api");

    let bind = env::var("MOOD_BIND").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let config = ApiConfig::from_env();
    let storage = config.database_url.clone().unwrap_or_else(|| "memory".to_string());

    let app = build_app(config).await?;

    let listener = tokio::net::TcpListener::bind(&bind).await?;
    tracing::info!(bind = %bind, storage = %storage, "moodlog api started");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;
    Ok(())
}
