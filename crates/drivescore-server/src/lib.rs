pub mod cache;
pub mod config;
pub mod error;
pub mod handlers;
pub mod observability;
pub mod server;
pub mod session;

pub use cache::DriverCache;
pub use config::{
    AppConfig, CacheConfig, GeotabSettings, LoggingConfig, ServerConfig, SessionConfig,
};
pub use error::ApiError;
pub use observability::init_tracing;
pub use server::{AppState, DrivescoreServer, ServerBuilder, build_app};
