//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (CORS, request ID, request log, timeout, body limit)
//! - Guard `{id}` routes with ID format validation
//! - Serve on a listener until shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware,
    routing::{get, post, put},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
};

use crate::config::{CorsConfig, ServiceConfig};
use crate::http::error::{render_layer_errors, route_not_found};
use crate::http::handlers::{
    create_repository, delete_repository, like_repository, list_repositories, update_repository,
};
use crate::http::middleware::{log_request, validate_id};
use crate::lifecycle::shutdown;
use crate::store::RepositoryStore;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RepositoryStore>,
}

/// HTTP server for the repositories API.
pub struct HttpServer {
    router: Router,
    store: Arc<RepositoryStore>,
}

impl HttpServer {
    /// Create a new HTTP server with an empty store.
    pub fn new(config: ServiceConfig) -> Self {
        Self::with_store(config, Arc::new(RepositoryStore::new()))
    }

    /// Create a server around an existing store.
    pub fn with_store(config: ServiceConfig, store: Arc<RepositoryStore>) -> Self {
        let state = AppState {
            store: store.clone(),
        };
        let router = Self::build_router(&config, state);
        Self { router, store }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        let id_routes = Router::new()
            .route(
                "/repositories/{id}",
                put(update_repository).delete(delete_repository),
            )
            .route("/repositories/{id}/like", post(like_repository))
            .route_layer(middleware::from_fn(validate_id));

        Router::new()
            .route(
                "/repositories",
                get(list_repositories).post(create_repository),
            )
            .merge(id_routes)
            .fallback(route_not_found)
            .with_state(state)
            // tower-http enforces the configured limit; axum's 2MB default would cap it.
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(middleware::map_response(render_layer_errors))
            .layer(middleware::from_fn(log_request))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(cors_layer(&config.cors))
    }

    /// A handle to the router, sharing this server's store.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn store(&self) -> Arc<RepositoryStore> {
        self.store.clone()
    }

    /// Serve on `listener` until `shutdown_rx` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown::wait(shutdown_rx).await;
                tracing::info!("Shutdown signal received, draining requests");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if config.allows_any_origin() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|o| HeaderValue::from_str(o).ok())
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}
