use drivescore_server::config::loader::load_config;
use drivescore_server::{ServerBuilder, observability};

#[tokio::main]
async fn main() {
    // Load .env file if present (before anything else)
    // This allows environment variables to be set from .env for local development
    if let Err(e) = dotenvy::dotenv() {
        // Not an error if .env doesn't exist - it's optional
        if !matches!(e, dotenvy::Error::Io(ref io_err) if io_err.kind() == std::io::ErrorKind::NotFound)
        {
            eprintln!("Warning: Failed to load .env file: {e}");
        }
    }

    // Initialize tracing early with the default level
    observability::init_tracing();

    // Config path from the environment, falling back to drivescore.toml
    let config_path = std::env::var("DRIVESCORE_CONFIG").ok();

    let cfg = match load_config(config_path.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(2);
        }
    };

    observability::apply_logging_level(&cfg.logging.level);

    tracing::info!(
        geotab_server = %cfg.geotab.server,
        cache_ttl = ?cfg.cache.ttl,
        "Configuration loaded"
    );

    let server = ServerBuilder::new().with_config(cfg).build();
    if let Err(err) = server.run().await {
        eprintln!("Server error: {err}");
    }
}
