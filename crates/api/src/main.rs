use anyhow::Context;

use innkeep_api::app::{build_app, RouteOptions};
use innkeep_infra::{connect_backend, BackendConfig, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    innkeep_observability::init();

    let backend_config = BackendConfig::from_env()?;
    let server = ServerConfig::from_env()?;

    let backend = connect_backend(&backend_config)?;
    let app = build_app(
        backend,
        RouteOptions {
            rooms_public_read: server.rooms_public_read,
        },
    );

    let listener = tokio::net::TcpListener::bind(server.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", server.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
