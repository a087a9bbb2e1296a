//! Graceful shutdown: flip health to draining, then stop the server.

use actix_web::dev::ServerHandle;
use actix_web::web;
use tracing::{info, warn};

use ebooks::inbound::http::health::HealthState;

/// Wait for SIGTERM or Ctrl-C, report draining, then stop gracefully.
pub(super) async fn drain_on_signal(health_state: web::Data<HealthState>, server: ServerHandle) {
    shutdown_signal().await;
    health_state.mark_draining();
    info!("shutdown signal received; draining in-flight requests");
    server.stop(true).await;
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "failed to register SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
