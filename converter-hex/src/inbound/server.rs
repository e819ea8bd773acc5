//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::trace::TraceLayer;

use converter_types::RateSource;

use super::handlers::{self, AppState};
use crate::ConverterService;

/// HTTP Server for the Converter API.
pub struct HttpServer<S: RateSource> {
    state: Arc<AppState<S>>,
}

impl<S: RateSource> HttpServer<S> {
    /// Creates a new HTTP server with the given service.
    pub fn new(service: ConverterService<S>) -> Self {
        Self {
            state: Arc::new(AppState {
                service,
                popular: exchange_rates::POPULAR_CURRENCIES.to_vec(),
            }),
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            .route("/api/state", get(handlers::display_state::<S>))
            .route("/api/refresh", post(handlers::refresh::<S>))
            .route("/api/amount", put(handlers::set_amount::<S>))
            .route("/api/from", put(handlers::set_from_currency::<S>))
            .route("/api/to", put(handlers::set_to_currency::<S>))
            .route("/api/rates", get(handlers::rates::<S>))
            .route("/api/popular", get(handlers::popular::<S>))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Starts a rate refresh without waiting for it.
    ///
    /// The server stays responsive while the fetch runs; the display state
    /// reports `loading` until it settles.
    pub fn spawn_refresh(&self) -> tokio::task::JoinHandle<()> {
        let state = self.state.clone();
        tokio::spawn(async move {
            if let Err(e) = state.service.request_rate_refresh().await {
                tracing::warn!(error = %e, "Background rate refresh failed");
            }
        })
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
