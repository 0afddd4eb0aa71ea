use crate::config::ItemConfig;
use crate::handlers;
use crate::services::{MongoConnector, StoreAccessor};
use axum::{extract::Request, middleware, routing::get, Router, ServiceExt};
use service_core::error::AppError;
use service_core::middleware::request_id_middleware;
use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: ItemConfig,
    pub store: Arc<StoreAccessor>,
}

/// Route table. Trailing slashes are trimmed before routing, so `/{id}/`
/// resolves to the same handler as `/{id}`.
pub fn build_router(state: AppState) -> NormalizePath<Router> {
    let router = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .route("/:id", get(handlers::get_item))
        .fallback(handlers::not_found)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    NormalizePathLayer::trim_trailing_slash().layer(router)
}

type ServerFuture = Pin<Box<dyn Future<Output = std::io::Result<()>> + Send>>;

pub struct Application {
    port: u16,
    server: ServerFuture,
}

impl Application {
    pub async fn build(config: ItemConfig) -> Result<Self, AppError> {
        let store = Arc::new(StoreAccessor::new(MongoConnector::new(&config.mongodb)));
        Self::build_with_store(config, store).await
    }

    /// Build around an existing accessor. The accessor is initialized before
    /// the listener is bound; with the default failure handler an unreachable
    /// store exits the process rather than returning an error.
    pub async fn build_with_store(
        config: ItemConfig,
        store: Arc<StoreAccessor>,
    ) -> Result<Self, AppError> {
        store.collection_handle().await;

        let app = build_router(AppState {
            config: config.clone(),
            store,
        });

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on port {}", port);

        let server = axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
            .with_graceful_shutdown(shutdown_signal());

        Ok(Self {
            port,
            server: Box::pin(async move { server.await }),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
