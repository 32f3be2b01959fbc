//! HTTP server lifecycle — binds the listener and serves the patient API
//! until the process receives ctrl-c.

use std::net::SocketAddr;

use tokio::net::TcpListener;

use crate::api::router::api_router;
use crate::api::types::ApiContext;

/// Bind `addr` and serve the API router until shutdown.
pub async fn serve(ctx: ApiContext, addr: SocketAddr) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;
    tracing::info!("Servidor corriendo en http://{local}");

    axum::serve(listener, api_router(ctx))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("No se pudo instalar el manejador de ctrl-c: {e}");
        return;
    }
    tracing::info!("Apagando el servidor");
}
