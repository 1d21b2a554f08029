//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::{get, post},
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use fx_types::{ExchangeRateProvider, HistoryStore};

use super::handlers::{self, AppState, RuntimeInfo};
use crate::ConverterService;

/// HTTP Server for the Currency Converter API.
pub struct HttpServer<P: ExchangeRateProvider, H: HistoryStore> {
    state: Arc<AppState<P, H>>,
    allowed_origins: Vec<String>,
}

impl<P: ExchangeRateProvider, H: HistoryStore> HttpServer<P, H> {
    /// Creates a new HTTP server that accepts requests from any origin.
    pub fn new(service: ConverterService<P, H>, runtime: RuntimeInfo) -> Self {
        Self {
            state: Arc::new(AppState { service, runtime }),
            allowed_origins: vec!["*".to_string()],
        }
    }

    /// Restricts CORS to the given origins. `*` allows any origin.
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.allowed_origins = origins;
        self
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/", get(handlers::root))
            .route("/api/status", get(handlers::status::<P, H>))
            .route("/api/currencies", get(handlers::list_currencies::<P, H>))
            .route("/api/convert", post(handlers::convert::<P, H>))
            .route("/api/history", get(handlers::history::<P, H>))
            .route("/api-docs/openapi.json", get(handlers::openapi_json))
            .layer(cors_layer(&self.allowed_origins))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
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

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any);

    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let list: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(list))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
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
                tracing::error!(error = %e, "failed to install SIGTERM handler");
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

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
