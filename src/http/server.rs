//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, logging, auth, limits)
//! - Bind server to listener
//! - Stop accepting and drain on the shutdown signal

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::get,
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::http::handlers::{
    create_product, delete_product, filter_products, get_product, list_products, product_stats,
    route_not_found, update_product, welcome,
};
use crate::http::middleware::{enforce_timeout, log_requests, require_api_key};
use crate::products::ProductStore;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ProductStore>,
    pub api_key: Arc<str>,
}

impl AppState {
    pub fn new(store: Arc<ProductStore>, api_key: impl Into<Arc<str>>) -> Self {
        Self {
            store,
            api_key: api_key.into(),
        }
    }
}

/// HTTP server for the product API.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a server backed by a freshly seeded store.
    pub fn new(config: AppConfig) -> Self {
        Self::with_store(config, Arc::new(ProductStore::seeded()))
    }

    /// Create a server backed by the given store.
    pub fn with_store(config: AppConfig, store: Arc<ProductStore>) -> Self {
        let state = AppState::new(store, config.auth.api_key.as_str());
        Self {
            router: build_router(&config, state),
        }
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// A clone of the fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

/// Build the Axum router with all middleware layers.
///
/// Layers run outermost first: request id, trace span, logging filter,
/// authentication filter, timeout, then routing. The literal `filter` and
/// `stats` routes take precedence over `{id}`. A known path hit with an
/// unsupported method is treated like an unknown path.
pub fn build_router(config: &AppConfig, state: AppState) -> Router {
    Router::new()
        .route("/", get(welcome))
        .route("/api/products", get(list_products).post(create_product))
        .route("/api/products/filter", get(filter_products))
        .route("/api/products/stats", get(product_stats))
        .route(
            "/api/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .method_not_allowed_fallback(route_not_found)
        .fallback(route_not_found)
        .layer(DefaultBodyLimit::max(config.limits.max_body_bytes))
        .layer(middleware::from_fn_with_state(
            Duration::from_secs(config.limits.request_timeout_secs),
            enforce_timeout,
        ))
        .layer(middleware::from_fn_with_state(state.clone(), require_api_key))
        .layer(middleware::from_fn(log_requests))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}
