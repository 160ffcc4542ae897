//! HTTP server lifecycle
//!
//! Binds the listener, serves until Ctrl-C or SIGTERM, then gives in-flight
//! requests a bounded grace period before failing the shutdown.

use std::future::{Future, IntoFuture};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use axum::middleware::{from_fn, from_fn_with_state};
use axum::Router;
use rktup_core::{PageTemplates, ServerConfig};
use rktup_discovery::DiscoveryResolver;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing::{error, info};

use crate::handler::{handle, AppState};
use crate::middleware::{access_log, request_timeout};

/// Build the application router
///
/// Every request goes to one handler; the access log wraps the timeout so
/// timed-out requests are logged with their 504.
pub fn router(state: AppState, timeout: Duration) -> Router {
    Router::new()
        .fallback(handle)
        .with_state(state)
        .layer(from_fn_with_state(timeout, request_timeout))
        .layer(from_fn(access_log))
}

/// Run the server until a shutdown signal arrives
pub async fn run(config: ServerConfig) -> Result<()> {
    let templates = PageTemplates::new().context("Failed to load page templates")?;
    let resolver = DiscoveryResolver::github(config.github.clone(), config.discovery.clone())
        .context("Failed to create HTTP client")?;
    let app = router(AppState::new(resolver, templates), config.request_timeout);

    let listener = TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("Failed to listen on {}", config.addr))?;
    info!("listening on {}", listener.local_addr()?);

    serve(listener, app, shutdown_signal(), config.shutdown_timeout).await
}

/// Serve `app` until `signal` completes
///
/// After the signal, new connections are refused and in-flight requests get
/// `grace` to finish. Running past it is an error.
pub async fn serve(
    listener: TcpListener,
    app: Router,
    signal: impl Future<Output = ()> + Send + 'static,
    grace: Duration,
) -> Result<()> {
    let (stopping_tx, stopping_rx) = oneshot::channel::<()>();

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            signal.await;
            info!("shutting down ...");
            let _ = stopping_tx.send(());
        })
        .into_future();

    let deadline = async move {
        match stopping_rx.await {
            Ok(()) => tokio::time::sleep(grace).await,
            // Server ended on its own
            Err(_) => std::future::pending::<()>().await,
        }
    };

    tokio::select! {
        result = server => result.context("HTTP server error"),
        _ = deadline => bail!("clean shutdown failed: requests still in flight after {:?}", grace),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
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
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
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
