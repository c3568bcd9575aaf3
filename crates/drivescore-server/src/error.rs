//! HTTP error mapping for the API surface.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use drivescore_geotab::GeotabError;
use serde_json::json;

use crate::session::SessionError;

/// Error response rendered as `{"error": "..."}` with the mapped status.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

/// Authentication-shaped failures ask the client to log in again; everything
/// reaching outside the process maps to an upstream-unavailable condition.
impl From<GeotabError> for ApiError {
    fn from(err: GeotabError) -> Self {
        if err.is_authentication() {
            return Self::unauthorized(err.to_string());
        }
        match err {
            GeotabError::Validation { .. } => Self::bad_request(err.to_string()),
            _ => Self::new(StatusCode::BAD_GATEWAY, err.to_string()),
        }
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Missing | SessionError::Incomplete => {
                Self::unauthorized(err.to_string())
            }
            SessionError::Malformed => Self::bad_request(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authentication_errors_map_to_401() {
        let err = ApiError::from(GeotabError::authentication("no credentials"));
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);

        let err = ApiError::from(GeotabError::Api {
            message: "InvalidUserException".to_string(),
            code: -32000,
        });
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_validation_maps_to_400() {
        let err = ApiError::from(GeotabError::validation("sessionId is missing"));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_upstream_failures_map_to_502() {
        let err = ApiError::from(GeotabError::Network("connection refused".to_string()));
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);

        let err = ApiError::from(GeotabError::Transport {
            status: 503,
            text: String::new(),
        });
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);

        let err = ApiError::from(GeotabError::Api {
            message: "InvalidQueryException".to_string(),
            code: -32602,
        });
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_session_errors() {
        assert_eq!(
            ApiError::from(SessionError::Missing).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::from(SessionError::Malformed).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(SessionError::Incomplete).status(),
            StatusCode::UNAUTHORIZED
        );
    }
}
