//! The session shape persisted by the hosting process between requests.
//!
//! The server stores this as JSON in an HttpOnly cookie; the CLI keeps it in
//! memory for the duration of a run. The `server` field records the endpoint
//! the authentication redirect resolved to and must be used for every later
//! call in the session.

use serde::{Deserialize, Serialize};

/// Everything a caller must retain after a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub session_id: String,
    pub user_name: String,
    pub database: String,
    /// Authoritative server domain for this session.
    pub server: String,
}

impl SessionInfo {
    /// True when every field required for an authenticated call is present.
    pub fn is_complete(&self) -> bool {
        !self.session_id.is_empty()
            && !self.user_name.is_empty()
            && !self.database.is_empty()
            && !self.server.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SessionInfo {
        SessionInfo {
            session_id: "abc123".to_string(),
            user_name: "jane@example.com".to_string(),
            database: "acme".to_string(),
            server: "my3.geotab.com".to_string(),
        }
    }

    #[test]
    fn complete_session_validates() {
        assert!(sample().is_complete());
    }

    #[test]
    fn missing_any_field_is_incomplete() {
        for field in ["session_id", "user_name", "database", "server"] {
            let mut info = sample();
            match field {
                "session_id" => info.session_id.clear(),
                "user_name" => info.user_name.clear(),
                "database" => info.database.clear(),
                _ => info.server.clear(),
            }
            assert!(!info.is_complete(), "expected incomplete without {field}");
        }
    }

    #[test]
    fn uses_camel_case_keys() {
        let value = serde_json::to_value(sample()).unwrap();
        assert!(value.get("sessionId").is_some());
        assert!(value.get("userName").is_some());
        assert!(value.get("database").is_some());
        assert!(value.get("server").is_some());
    }
}
