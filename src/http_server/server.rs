//! # HTTP Server
//!
//! Combines the health route and the catalog API into one axum server.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use super::config::HttpServerConfig;
use super::observability_routes::health_routes;
use crate::api::{catalog_routes, CatalogState};
use crate::catalog::CatalogStore;
use crate::observability::Logger;

/// HTTP server for the boulder catalog
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server over the given catalog store
    pub fn new(config: HttpServerConfig, store: Arc<dyn CatalogStore>) -> Self {
        let router = Self::build_router(&config, store);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    fn build_router(config: &HttpServerConfig, store: Arc<dyn CatalogStore>) -> Router {
        let catalog_state = Arc::new(CatalogState::new(store));

        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .merge(health_routes())
            .merge(catalog_routes(catalog_state))
            .layer(ServiceBuilder::new().layer(cors))
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until the process stops
    pub async fn start(self) -> io::Result<()> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid socket address {}: {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        Logger::info("SERVER_START", &[("addr", &addr.to_string())]);

        axum::serve(listener, self.router).await
    }
}
