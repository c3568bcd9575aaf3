//! JSON-RPC transport for the Geotab API.

use std::time::Duration;

use serde_json::{Value, json};

use crate::error::{GeotabError, Result};

/// Default server domain used before authentication resolves a session server.
pub const DEFAULT_SERVER: &str = "my.geotab.com";

/// Configuration for the transport.
#[derive(Debug, Clone)]
pub struct GeotabConfig {
    /// Server domain for `Authenticate` calls (e.g. `my.geotab.com`).
    pub default_server: String,

    /// HTTP request timeout (default: 30 seconds).
    pub request_timeout: Duration,

    /// Whether to allow plain HTTP endpoints.
    /// This should only be enabled for testing against a local stub.
    pub allow_http: bool,
}

impl Default for GeotabConfig {
    fn default() -> Self {
        Self {
            default_server: DEFAULT_SERVER.to_string(),
            request_timeout: Duration::from_secs(30),
            allow_http: false,
        }
    }
}

impl GeotabConfig {
    /// Creates a new configuration with default values, honoring the
    /// `GEOTAB_SERVER` environment variable for the default server.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(server) = std::env::var("GEOTAB_SERVER")
            && !server.is_empty()
        {
            config.default_server = server;
        }
        config
    }

    /// Sets the default server domain.
    #[must_use]
    pub fn with_default_server(mut self, server: impl Into<String>) -> Self {
        self.default_server = server.into();
        self
    }

    /// Sets the HTTP request timeout.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Allows plain HTTP endpoints.
    ///
    /// # Warning
    ///
    /// This should only be used for testing.
    #[must_use]
    pub fn with_allow_http(mut self, allow: bool) -> Self {
        self.allow_http = allow;
        self
    }
}

/// Transport that sends JSON-RPC 2.0 calls to `https://{server}/apiv1`.
pub struct GeotabClient {
    http: reqwest::Client,
    config: GeotabConfig,
}

impl GeotabClient {
    /// Creates a new client with the specified configuration.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be created (should not happen in
    /// practice).
    #[must_use]
    pub fn new(config: GeotabConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { http, config }
    }

    /// Creates a new client with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(GeotabConfig::default())
    }

    /// The server domain used for `Authenticate` calls.
    #[must_use]
    pub fn default_server(&self) -> &str {
        &self.config.default_server
    }

    fn endpoint_url(&self, server: &str) -> String {
        let scheme = if self.config.allow_http { "http" } else { "https" };
        format!("{scheme}://{server}/apiv1")
    }

    /// Sends one JSON-RPC call and returns the decoded `result` field.
    ///
    /// # Errors
    ///
    /// - [`GeotabError::Network`] when no HTTP response was obtained
    /// - [`GeotabError::Transport`] on a non-2xx status
    /// - [`GeotabError::Decode`] when the 2xx body is not valid JSON
    /// - [`GeotabError::Api`] when the payload carries an `error` object
    pub async fn call(&self, server: &str, method: &str, params: Value) -> Result<Value> {
        let url = self.endpoint_url(server);

        tracing::debug!(
            method,
            url = %url,
            params = %redact_params(&params),
            "calling remote API"
        );

        let body = json!({
            "method": method,
            "params": params,
            "id": 1,
            "jsonrpc": "2.0",
        });

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| GeotabError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(GeotabError::Transport {
                status: status.as_u16(),
                text,
            });
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| GeotabError::Decode(e.to_string()))?;

        if let Some(error) = payload.get("error") {
            let message = error
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("remote API error")
                .to_string();
            let code = error.get("code").and_then(Value::as_i64).unwrap_or(0);
            tracing::warn!(method, code, message = %message, "remote API returned an error");
            return Err(GeotabError::Api { message, code });
        }

        Ok(payload.get("result").cloned().unwrap_or(Value::Null))
    }
}

/// Copy of the params suitable for diagnostics: session ids and passwords
/// must never reach the logs in plaintext.
pub(crate) fn redact_params(params: &Value) -> Value {
    let mut redacted = params.clone();
    if let Some(map) = redacted.as_object_mut() {
        if map.contains_key("password") {
            map.insert("password".to_string(), Value::String("***".to_string()));
        }
        if let Some(credentials) = map.get("credentials") {
            let user_name = credentials.get("userName").cloned().unwrap_or(Value::Null);
            map.insert(
                "credentials".to_string(),
                json!({ "sessionId": "***", "userName": user_name }),
            );
        }
    }
    redacted
}
