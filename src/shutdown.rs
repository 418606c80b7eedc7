//! Graceful shutdown.
//!
//! On SIGINT/SIGTERM the service first reports "not ready" so orchestrators
//! stop routing new traffic, keeps serving for a grace period, then stops the
//! HTTP server and lets in-flight requests finish.

use crate::health::ReadinessState;
use actix_web::dev::ServerHandle;
use std::future::Future;
use std::time::Duration;

pub async fn drain_on_signal<S>(
    signal: S,
    handle: ServerHandle,
    readiness: ReadinessState,
    grace: Duration,
) where
    S: Future<Output = ()>,
{
    signal.await;

    tracing::info!(
        grace_secs = grace.as_secs(),
        "Shutdown requested, marking service as not ready"
    );
    readiness.set_ready(false);
    tokio::time::sleep(grace).await;

    handle.stop(true).await;
    tracing::info!("Server stopped");
}

/// Resolves on the first SIGINT or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
