//! Session authentication against the remote API.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::client::GeotabClient;
use crate::error::{GeotabError, Result};

/// Sentinel `path` value meaning the default server stays authoritative.
///
/// This is an opaque string defined by the remote API; it is compared
/// exactly and never reinterpreted.
pub const THIS_SERVER: &str = "ThisServer";

/// Session credential issued by `Authenticate`.
///
/// Opaque to callers once obtained; attached verbatim to every subsequent
/// call and invalidated only by the remote server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub user_name: String,
    pub session_id: String,
    pub database: String,
}

/// Result of a successful login: the credential plus the server domain all
/// later calls in this session must target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub server: String,
    pub credentials: Credentials,
}

/// Exchanges a user/password/database triple for a session.
///
/// The call goes to the client's default server; if the response carries a
/// redirect `path`, the returned session points at that server instead and
/// the caller must honor it for every later request.
///
/// # Errors
///
/// Transport and API errors propagate unchanged. A 2xx response without
/// usable credentials fails with [`GeotabError::Authentication`].
pub async fn authenticate(
    client: &GeotabClient,
    username: &str,
    password: &str,
    database: &str,
) -> Result<AuthSession> {
    tracing::info!(database, user = username, "authenticating against remote API");

    let params = json!({
        "userName": username,
        "password": password,
        "database": database,
    });

    let result = client
        .call(client.default_server(), "Authenticate", params)
        .await?;

    let session = session_from_result(client.default_server(), &result)?;
    if session.server != client.default_server() {
        tracing::info!(server = %session.server, "redirected to session server");
    }
    Ok(session)
}

/// Interprets an `Authenticate` result payload.
fn session_from_result(default_server: &str, result: &Value) -> Result<AuthSession> {
    let server = match result.get("path").and_then(Value::as_str) {
        Some(path) if !path.is_empty() && path != THIS_SERVER => path.to_string(),
        _ => default_server.to_string(),
    };

    let Some(raw) = result.get("credentials") else {
        return Err(GeotabError::authentication(
            "response did not include credentials",
        ));
    };

    let credentials: Credentials = serde_json::from_value(raw.clone()).map_err(|_| {
        GeotabError::authentication("response credentials were missing required fields")
    })?;

    if credentials.session_id.is_empty() {
        return Err(GeotabError::authentication(
            "response credentials did not include a session id",
        ));
    }

    Ok(AuthSession {
        server,
        credentials,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials_json() -> Value {
        json!({
            "userName": "jane@example.com",
            "sessionId": "sess-1",
            "database": "acme",
        })
    }

    #[test]
    fn test_redirect_path_becomes_server() {
        let result = json!({
            "path": "my3.geotab.com",
            "credentials": credentials_json(),
        });

        let session = session_from_result("my.geotab.com", &result).unwrap();
        assert_eq!(session.server, "my3.geotab.com");
        assert_eq!(session.credentials.session_id, "sess-1");
    }

    #[test]
    fn test_this_server_sentinel_keeps_default() {
        let result = json!({
            "path": "ThisServer",
            "credentials": credentials_json(),
        });

        let session = session_from_result("my.geotab.com", &result).unwrap();
        assert_eq!(session.server, "my.geotab.com");
    }

    #[test]
    fn test_absent_path_keeps_default() {
        let result = json!({ "credentials": credentials_json() });

        let session = session_from_result("my.geotab.com", &result).unwrap();
        assert_eq!(session.server, "my.geotab.com");
    }

    #[test]
    fn test_empty_path_keeps_default() {
        let result = json!({ "path": "", "credentials": credentials_json() });

        let session = session_from_result("my.geotab.com", &result).unwrap();
        assert_eq!(session.server, "my.geotab.com");
    }

    #[test]
    fn test_missing_credentials_fails() {
        let result = json!({ "path": "my3.geotab.com" });

        let err = session_from_result("my.geotab.com", &result).unwrap_err();
        assert!(matches!(err, GeotabError::Authentication { .. }));
    }

    #[test]
    fn test_missing_session_id_fails() {
        let result = json!({
            "credentials": { "userName": "jane@example.com", "database": "acme" },
        });

        let err = session_from_result("my.geotab.com", &result).unwrap_err();
        assert!(matches!(err, GeotabError::Authentication { .. }));
    }

    #[test]
    fn test_empty_session_id_fails() {
        let result = json!({
            "credentials": {
                "userName": "jane@example.com",
                "sessionId": "",
                "database": "acme",
            },
        });

        let err = session_from_result("my.geotab.com", &result).unwrap_err();
        assert!(matches!(err, GeotabError::Authentication { .. }));
    }

    #[test]
    fn test_credentials_wire_shape() {
        let credentials: Credentials = serde_json::from_value(credentials_json()).unwrap();
        assert_eq!(credentials.user_name, "jane@example.com");
        assert_eq!(credentials.session_id, "sess-1");
        assert_eq!(credentials.database, "acme");

        let value = serde_json::to_value(&credentials).unwrap();
        assert_eq!(value, credentials_json());
    }
}
