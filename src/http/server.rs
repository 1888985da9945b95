//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, limits, request ID, optional timeout)
//! - Bind server to listener
//! - Stop accepting on shutdown and drain in-flight requests

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::calculation::{CalculationProxy, DownstreamClient, DownstreamError};
use crate::config::{ServiceConfig, StatusPolicy};
use crate::http::handlers;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::storage::{FileStoreHandler, LocalStore};

/// Errors that stop the server from starting or running.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Downstream(#[from] DownstreamError),

    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub files: FileStoreHandler,
    pub calculator: CalculationProxy,
    pub status_policy: StatusPolicy,
}

impl AppState {
    pub fn new(config: &ServiceConfig) -> Result<Self, ServerError> {
        let store = Arc::new(LocalStore::new(&config.storage));
        let client = DownstreamClient::new(&config.downstream)?;

        Ok(Self {
            files: FileStoreHandler::new(store.clone()),
            calculator: CalculationProxy::new(client, store),
            status_policy: config.http.status_policy,
        })
    }
}

/// HTTP server for the validation service.
pub struct HttpServer {
    router: Router,
    config: Arc<ServiceConfig>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServiceConfig) -> Result<Self, ServerError> {
        let state = AppState::new(&config)?;
        let router = Self::build_router(&config, state);

        Ok(Self {
            router,
            config: Arc::new(config),
        })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        let router = Router::new()
            .route("/store-file", post(handlers::store_file))
            .route("/calculate", post(handlers::calculate))
            .route("/health", get(handlers::health))
            .with_state(state)
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(config.http.max_body_size));

        #[allow(deprecated)]
        let router = match config.http.request_timeout_secs {
            Some(secs) => router.layer(TimeoutLayer::new(Duration::from_secs(secs))),
            None => router,
        };

        router
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http())
            .layer(set_request_id_layer())
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ServerError> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            downstream = %self.config.downstream.url,
            storage_root = %self.config.storage.root.display(),
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

    /// The fully layered router, for driving requests without a socket.
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn server(root: &std::path::Path) -> HttpServer {
        let mut config = ServiceConfig::default();
        config.storage.root = root.to_path_buf();
        config.downstream.url = "http://127.0.0.1:9/calculate".to_string();
        config.downstream.timeout_secs = Some(2);
        HttpServer::new(config).unwrap()
    }

    fn post_json(path: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(path)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_store_file_route() {
        let dir = tempfile::tempdir().unwrap();
        let response = server(dir.path())
            .into_router()
            .oneshot(post_json("/store-file", r#"{"file":"x.csv","data":"1,2,3"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
        assert_eq!(
            json_body(response).await,
            json!({"file": "x.csv", "message": "Success."})
        );
        assert_eq!(std::fs::read(dir.path().join("x.csv")).unwrap(), b"1,2,3");
    }

    #[tokio::test]
    async fn test_malformed_json_is_invalid_input() {
        let dir = tempfile::tempdir().unwrap();
        let response = server(dir.path())
            .into_router()
            .oneshot(post_json("/store-file", "{\"file\":"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await,
            json!({"file": null, "error": "Invalid JSON input."})
        );
    }

    #[tokio::test]
    async fn test_calculate_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let response = server(dir.path())
            .into_router()
            .oneshot(post_json("/calculate", r#"{"product":"wheat"}"#))
            .await
            .unwrap();

        assert_eq!(
            json_body(response).await,
            json!({"file": null, "error": "Invalid JSON input."})
        );
    }

    #[tokio::test]
    async fn test_body_limit_enforced() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = ServiceConfig::default();
        config.storage.root = dir.path().to_path_buf();
        config.http.max_body_size = 16;
        let router = HttpServer::new(config).unwrap().into_router();

        let response = router
            .oneshot(post_json(
                "/store-file",
                r#"{"file":"x.csv","data":"this body is far too long"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert!(!dir.path().join("x.csv").exists());
    }

    #[tokio::test]
    async fn test_health() {
        let dir = tempfile::tempdir().unwrap();
        let response = server(dir.path())
            .into_router()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }
}
