//! Local Library Server
//!
//! Server-rendered catalog of authors, genres, books and book copies.

use anyhow::Context;
use mongodb::{bson::doc, Client};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use local_library::{api, config::AppConfig, repository::Repository, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("local_library={},tower_http=debug", config.logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format.eq_ignore_ascii_case("json") {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!(
        "Starting Local Library v{} ({})",
        env!("CARGO_PKG_VERSION"),
        config.server.environment
    );

    let client = Client::with_uri_str(&config.database.url)
        .await
        .context("Invalid MongoDB connection string")?;
    let database = client
        .default_database()
        .unwrap_or_else(|| client.database(&config.database.name));
    database
        .run_command(doc! { "ping": 1 })
        .await
        .context("Failed to connect to database")?;

    tracing::info!("Connected to database {}", database.name());

    let addr = SocketAddr::new(
        config.server.host.parse().context("Invalid host address")?,
        config.server.port,
    );

    let state = AppState::new(config, Repository::mongo(&database));
    let app = api::router(state);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
