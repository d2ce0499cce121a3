//! Listener startup and shutdown

use crate::routes::build_router;
use crate::state::AppState;
use tokio::net::TcpListener;

/// Bind `addr`, kick off the upstream probe in the background and serve until shutdown
pub async fn start_server(state: AppState, addr: &str) -> anyhow::Result<()> {
    let relay = state.relay.clone();
    tokio::spawn(async move {
        relay.probe().await;
    });

    let app = build_router(state);
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Chat relay listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
