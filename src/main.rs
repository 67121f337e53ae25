use std::sync::Arc;
use tokio::net::TcpListener;
use textsummarize::{
    config::{Config, APP_NAME, APP_VERSION},
    api::routes::create_router,
    pipeline::Summarizer,
    setup_logging,
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::load()?;
    setup_logging(&config.log_level, config.is_production());

    let server_addr = config.server_addr;

    // Build the summarizer once; the model client is shared by every request
    let summarizer = Summarizer::from_config(Arc::new(config))?;
    let config = summarizer.config();
    tracing::info!(
        env = %config.env,
        cache_enabled = summarizer.cache().is_enabled(),
        cache_expiry_secs = config.cache_expiry.as_secs(),
        cache_max_entries = config.cache_max_entries,
        "{} {} starting",
        APP_NAME,
        APP_VERSION
    );
    let app = create_router(AppState::new(summarizer));

    let listener = TcpListener::bind(server_addr).await?;
    tracing::info!("Listening on {}", server_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
