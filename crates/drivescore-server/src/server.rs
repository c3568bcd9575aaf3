use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use drivescore_geotab::GeotabClient;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{cache::DriverCache, config::AppConfig, handlers};

/// Shared state for request handlers. The cache is owned here, per process,
/// rather than living in module-level state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub geotab: Arc<GeotabClient>,
    pub drivers: Arc<DriverCache>,
}

impl AppState {
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        let geotab = GeotabClient::new(config.geotab.client_config());
        let drivers = DriverCache::new(config.cache.ttl);
        Self {
            config: Arc::new(config),
            geotab: Arc::new(geotab),
            drivers: Arc::new(drivers),
        }
    }
}

pub fn build_app(cfg: &AppConfig) -> Router {
    let state = AppState::new(cfg.clone());
    let body_limit = cfg.server.body_limit_bytes;
    Router::new()
        // Health and info endpoints
        .route("/", get(handlers::root))
        .route("/healthz", get(handlers::healthz))
        .route("/readyz", get(handlers::readyz))
        // Dashboard API
        .route("/api/login", post(handlers::login))
        .route("/api/logout", post(handlers::logout))
        .route("/api/drivers", get(handlers::drivers))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(axum::extract::DefaultBodyLimit::max(body_limit))
}

pub struct DrivescoreServer {
    addr: SocketAddr,
    app: Router,
}

pub struct ServerBuilder {
    addr: SocketAddr,
    config: AppConfig,
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerBuilder {
    #[must_use]
    pub fn new() -> Self {
        let cfg = AppConfig::default();
        Self {
            addr: cfg.addr(),
            config: cfg,
        }
    }

    #[must_use]
    pub fn with_addr(mut self, addr: SocketAddr) -> Self {
        self.addr = addr;
        self
    }

    #[must_use]
    pub fn with_config(mut self, cfg: AppConfig) -> Self {
        self.addr = cfg.addr();
        self.config = cfg;
        self
    }

    #[must_use]
    pub fn build(self) -> DrivescoreServer {
        let app = build_app(&self.config);

        DrivescoreServer {
            addr: self.addr,
            app,
        }
    }
}

impl DrivescoreServer {
    pub async fn run(self) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        tracing::info!("listening on {}", self.addr);
        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }
}

async fn shutdown_signal() {
    // Wait for Ctrl+C
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}
