use std::sync::Arc;

use bastion_api::{api, config::AppConfig};

#[tokio::main]
async fn main() {
    // Load configuration (.env + environment)
    let config = AppConfig::from_env().expect("Invalid configuration");

    // Initialize tracing
    config.init_tracing();
    tracing::info!(
        addr = %config.addr,
        production = config.production,
        ping = !config.disable_ping,
        request_id_header = %config.request_id_header,
        "Configuration loaded"
    );

    let addr = config.addr;
    let app = api::router(Arc::new(config));

    // Start server
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server failed");

    tracing::info!("Server stopped");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
