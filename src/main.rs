use std::sync::Arc;

use movie_search_api::{
    config::Config,
    db::InMemoryFavoritesRepository,
    middleware::cors::cors_layer,
    routes::{create_app, AppState},
    services::providers::OmdbProvider,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "movie_search_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    // Wire adapters into the use-cases
    let provider = Arc::new(OmdbProvider::new(
        config.omdb_api_key.clone(),
        config.omdb_api_url.clone(),
        config.omdb_timeout(),
    )?);
    let repository = Arc::new(InMemoryFavoritesRepository::new());
    let state = Arc::new(AppState::new(provider, repository));

    let app = create_app(state, cors_layer(&config.frontend_url)?);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(
        address = %address,
        frontend_url = %config.frontend_url,
        "Backend is running"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
