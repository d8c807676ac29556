use std::sync::Arc;

use email_relay::{AppState, config, router};

#[tokio::main]
async fn main() {
    // Log setup
    tracing_subscriber::fmt::init();

    // Load config
    let cfg = config::load_config().unwrap_or_else(|e| {
        tracing::error!("Failed to load config: {e}");
        panic!("failed to locate or load config: {e}");
    });
    tracing::info!(
        "Successfully loaded email relay config (default provider {}, max retries {})",
        cfg.default_email_provider,
        cfg.max_retries
    );

    // Setup service
    let state = AppState::from_config(&cfg).unwrap_or_else(|e| {
        tracing::error!("Failed to set up providers: {e}");
        panic!("failed to set up providers: {e}");
    });

    // Setup router
    let app = router(Arc::new(state));

    // Start server
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", cfg.port))
        .await
        .expect("Failed to bind to address");

    match listener.local_addr() {
        Ok(addr) => tracing::info!("Email relay starting, listening on {}", addr),
        Err(e) => tracing::warn!("Email relay starting, local address unavailable: {e}"),
    }

    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
