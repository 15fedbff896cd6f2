use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use campusclean::config::AppConfig;
use campusclean::db::SqliteBookingStore;
use campusclean::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    if config.business_whatsapp_number.is_none() {
        tracing::warn!("BUSINESS_WHATSAPP_NUMBER not set, confirmation links use a placeholder");
    }

    let store = SqliteBookingStore::open(config.database_path())?;
    tracing::info!("opened booking store at {}", config.database_path());

    let state = Arc::new(AppState {
        store: Box::new(store),
        config: config.clone(),
    });

    let app = campusclean::build_router(state)
        .layer(CorsLayer::very_permissive())
        .layer(TraceLayer::new_for_http());

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
