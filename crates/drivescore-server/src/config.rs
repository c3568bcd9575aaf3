use std::net::SocketAddr;
use std::time::Duration;

use drivescore_geotab::GeotabConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub geotab: GeotabSettings,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("server.port must be > 0".into());
        }
        if self.geotab.server.is_empty() {
            return Err("geotab.server must not be empty".into());
        }
        if self.geotab.request_timeout_ms == 0 {
            return Err("geotab.request_timeout_ms must be > 0".into());
        }
        if self.cache.ttl.is_zero() {
            return Err("cache.ttl must be > 0".into());
        }
        let lvl = self.logging.level.to_ascii_lowercase();
        let valid_levels = ["trace", "debug", "info", "warn", "error", "off"];
        if !valid_levels.contains(&lvl.as_str()) {
            return Err(format!("logging.level must be one of {valid_levels:?}"));
        }
        Ok(())
    }

    pub fn addr(&self) -> SocketAddr {
        use std::net::{IpAddr, Ipv4Addr};
        let host: IpAddr = self
            .server
            .host
            .parse()
            .unwrap_or(IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)));
        SocketAddr::from((host, self.server.port))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".into()
}
fn default_port() -> u16 {
    8080
}
fn default_body_limit() -> usize {
    1024 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            body_limit_bytes: default_body_limit(),
        }
    }
}

/// Remote fleet API settings.
///
/// The optional service-account triple is used as a fallback when a login
/// request omits credentials (development and kiosk deployments); it is
/// normally supplied through `GEOTAB_USERNAME`/`GEOTAB_PASSWORD`/
/// `GEOTAB_DATABASE` rather than the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeotabSettings {
    /// Server domain used for `Authenticate` calls.
    #[serde(default = "default_geotab_server")]
    pub server: String,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u32,
    /// Allow plain HTTP endpoints; testing only.
    #[serde(default)]
    pub allow_http: bool,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub database: Option<String>,
}

fn default_geotab_server() -> String {
    drivescore_geotab::DEFAULT_SERVER.into()
}
fn default_request_timeout_ms() -> u32 {
    30_000
}

impl Default for GeotabSettings {
    fn default() -> Self {
        Self {
            server: default_geotab_server(),
            request_timeout_ms: default_request_timeout_ms(),
            allow_http: false,
            username: None,
            password: None,
            database: None,
        }
    }
}

impl GeotabSettings {
    pub fn client_config(&self) -> GeotabConfig {
        GeotabConfig::default()
            .with_default_server(self.server.clone())
            .with_request_timeout(Duration::from_millis(u64::from(self.request_timeout_ms)))
            .with_allow_http(self.allow_http)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum age of the cached driver list before a refresh.
    #[serde(default = "default_ttl", with = "humantime_serde")]
    pub ttl: Duration,
}

fn default_ttl() -> Duration {
    Duration::from_secs(12 * 60 * 60)
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { ttl: default_ttl() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Whether the session cookie carries the `Secure` attribute.
    /// Disable only for local HTTP development.
    #[serde(default = "default_secure_cookies")]
    pub secure_cookies: bool,
}

fn default_secure_cookies() -> bool {
    true
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secure_cookies: default_secure_cookies(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".into()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

pub mod loader {
    use super::AppConfig;
    use config::{Config, Environment, File};
    use std::path::PathBuf;

    pub fn load_config(path: Option<&str>) -> Result<AppConfig, String> {
        let mut builder = Config::builder();
        match path {
            Some(p) => {
                let pathbuf = PathBuf::from(p);
                if pathbuf.exists() {
                    builder = builder.add_source(File::from(pathbuf));
                }
            }
            None => {
                // Try default root-level file
                let default_path = PathBuf::from("drivescore.toml");
                if default_path.exists() {
                    builder = builder.add_source(File::from(default_path));
                }
            }
        }
        // Environment variable overrides, e.g., DRIVESCORE__SERVER__PORT=9090
        builder = builder.add_source(
            Environment::with_prefix("DRIVESCORE")
                .try_parsing(true)
                .separator("__"),
        );
        let cfg = builder
            .build()
            .map_err(|e| format!("config build error: {e}"))?;
        let mut merged: AppConfig = cfg
            .try_deserialize()
            .map_err(|e| format!("config deserialize error: {e}"))?;
        apply_env_overrides(&mut merged, |key| std::env::var(key).ok());
        merged.validate()?;
        Ok(merged)
    }

    /// Applies the legacy `GEOTAB_*` environment surface on top of whatever
    /// the file and `DRIVESCORE__*` variables produced. `GEOTAB_SERVER`
    /// overrides the endpoint; the credential triple only fills gaps.
    pub(super) fn apply_env_overrides(
        cfg: &mut AppConfig,
        get: impl Fn(&str) -> Option<String>,
    ) {
        if let Some(server) = get("GEOTAB_SERVER")
            && !server.is_empty()
        {
            cfg.geotab.server = server;
        }
        if cfg.geotab.username.is_none() {
            cfg.geotab.username = get("GEOTAB_USERNAME").filter(|v| !v.is_empty());
        }
        if cfg.geotab.password.is_none() {
            cfg.geotab.password = get("GEOTAB_PASSWORD").filter(|v| !v.is_empty());
        }
        if cfg.geotab.database.is_none() {
            cfg.geotab.database = get("GEOTAB_DATABASE").filter(|v| !v.is_empty());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.geotab.server, "my.geotab.com");
        assert_eq!(cfg.cache.ttl, Duration::from_secs(43_200));
        assert!(cfg.session.secure_cookies);
        assert_eq!(cfg.logging.level, "info");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut cfg = AppConfig::default();
        cfg.server.port = 0;
        assert!(cfg.validate().unwrap_err().contains("server.port"));

        let mut cfg = AppConfig::default();
        cfg.geotab.server.clear();
        assert!(cfg.validate().unwrap_err().contains("geotab.server"));

        let mut cfg = AppConfig::default();
        cfg.cache.ttl = Duration::ZERO;
        assert!(cfg.validate().unwrap_err().contains("cache.ttl"));

        let mut cfg = AppConfig::default();
        cfg.logging.level = "verbose".into();
        assert!(cfg.validate().unwrap_err().contains("logging.level"));
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(
            file,
            r#"
[server]
port = 9090

[geotab]
server = "my47.geotab.com"
request_timeout_ms = 5000

[cache]
ttl = "30m"

[session]
secure_cookies = false

[logging]
level = "debug"
"#
        )
        .unwrap();

        let cfg = loader::load_config(Some(file.path().to_str().unwrap())).unwrap();
        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.geotab.server, "my47.geotab.com");
        assert_eq!(cfg.geotab.request_timeout_ms, 5000);
        assert_eq!(cfg.cache.ttl, Duration::from_secs(30 * 60));
        assert!(!cfg.session.secure_cookies);
        assert_eq!(cfg.logging.level, "debug");
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let cfg = loader::load_config(Some("/nonexistent/drivescore.toml")).unwrap();
        assert_eq!(cfg.server.port, 8080);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("GEOTAB_SERVER", "my12.geotab.com"),
            ("GEOTAB_USERNAME", "svc@example.com"),
            ("GEOTAB_PASSWORD", "hunter2"),
        ]);
        let get = |key: &str| env.get(key).map(|v| (*v).to_string());

        let mut cfg = AppConfig::default();
        cfg.geotab.username = Some("from-file@example.com".into());
        loader::apply_env_overrides(&mut cfg, get);

        // Endpoint is overridden; credentials only fill gaps.
        assert_eq!(cfg.geotab.server, "my12.geotab.com");
        assert_eq!(cfg.geotab.username.as_deref(), Some("from-file@example.com"));
        assert_eq!(cfg.geotab.password.as_deref(), Some("hunter2"));
        assert_eq!(cfg.geotab.database, None);
    }

    #[test]
    fn test_client_config_conversion() {
        let mut settings = GeotabSettings::default();
        settings.server = "my3.geotab.com".into();
        settings.request_timeout_ms = 1500;
        settings.allow_http = true;

        let client_cfg = settings.client_config();
        assert_eq!(client_cfg.default_server, "my3.geotab.com");
        assert_eq!(client_cfg.request_timeout, Duration::from_millis(1500));
        assert!(client_cfg.allow_http);
    }
}
