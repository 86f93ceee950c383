//! Server setup and initialization
//!
//! Provides the application builder and the server runner.

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use storial_common::{AppConfig, AppError, JwtService};
use storial_db::{create_pool, run_migrations, PoolConfig};
use storial_service::{FileService, ServiceContextBuilder};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::middleware::apply_middleware;
use crate::routes::create_router;
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let config = state.config();
    let router = apply_middleware(
        create_router(),
        &config.cors,
        config.app.env.is_production(),
    );
    router.with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&PoolConfig::from(&config.database))
        .await
        .map_err(AppError::internal)?;
    info!("PostgreSQL connection established");

    if config.database.run_migrations {
        run_migrations(&pool)
            .await
            .map_err(AppError::internal)?;
    }

    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
    ));
    let file_service = Arc::new(FileService::new(&config.storage.cover_dir));

    let service_context = ServiceContextBuilder::new()
        .pool(pool)
        .jwt_service(jwt_service)
        .file_service(file_service)
        .build()
        .map_err(AppError::config)?;

    Ok(AppState::new(service_context, config))
}

/// Run the HTTP server until a shutdown signal arrives
///
/// In-flight requests get `shutdown_timeout` to finish once the signal is
/// received.
pub async fn run_server(
    app: Router,
    addr: SocketAddr,
    shutdown_timeout: Duration,
) -> Result<(), AppError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    let (drain_tx, drain_rx) = tokio::sync::oneshot::channel::<()>();
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        let _ = drain_tx.send(());
    });

    let mut server = std::pin::pin!(server.into_future());
    tokio::select! {
        result = &mut server => {
            result.map_err(|e| AppError::config(format!("Server error: {e}")))?;
        }
        _ = async {
            let _ = drain_rx.await;
            tokio::time::sleep(shutdown_timeout).await;
        } => {
            warn!(
                timeout_secs = shutdown_timeout.as_secs(),
                "Shutdown timeout reached, dropping open connections"
            );
        }
    }

    info!("Server stopped");
    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::config(format!("Invalid listen address: {e}")))?;
    let shutdown_timeout = config.api.shutdown_timeout();

    let state = create_app_state(config).await?;
    let app = create_app(state);

    run_server(app, addr, shutdown_timeout).await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received, draining connections");
}
