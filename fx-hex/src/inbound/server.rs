//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use fx_types::{ConversionRepository, FxProvider};

use super::handlers::{self, AppState};
use crate::openapi::ApiDoc;
use crate::{ConversionService, RateService};

/// HTTP Server for the currency conversion API.
pub struct HttpServer<R: ConversionRepository, P: FxProvider> {
    state: Arc<AppState<R, P>>,
}

impl<R: ConversionRepository, P: FxProvider> HttpServer<R, P> {
    /// Creates a new HTTP server with the given services.
    pub fn new(conversions: ConversionService<R, P>, rates: RateService<P>) -> Self {
        Self {
            state: Arc::new(AppState { conversions, rates }),
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            .route("/api/v1/convert", post(handlers::convert::<R, P>))
            .route(
                "/api/v1/conversions",
                get(handlers::list_conversions::<R, P>),
            )
            .route("/api/v1/rates", get(handlers::get_rate::<R, P>))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
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
