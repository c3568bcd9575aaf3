//! Session cookie handling.
//!
//! The login handler persists the full [`SessionInfo`] as JSON in an
//! HttpOnly cookie; nothing about the session is kept server-side. The
//! session is invalidated only by the remote API rejecting its id, which the
//! drivers handler surfaces as a 401 so the client logs in again.

use axum_extra::extract::CookieJar;
use cookie::{Cookie, SameSite};
use drivescore_core::SessionInfo;

/// Name of the session cookie.
pub const SESSION_COOKIE_NAME: &str = "drivescore_session";

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("Not authenticated")]
    Missing,
    #[error("Invalid session cookie")]
    Malformed,
    #[error("Invalid session credentials")]
    Incomplete,
}

/// Builds the session cookie for a freshly authenticated login.
pub fn session_cookie(info: &SessionInfo, secure: bool) -> Cookie<'static> {
    let value = serde_json::to_string(info).expect("session info serializes");
    Cookie::build((SESSION_COOKIE_NAME, value))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .build()
}

/// Cookie used to clear the session; path must match [`session_cookie`].
pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, "")).path("/").build()
}

/// Extracts and validates the session from the request's cookies.
pub fn session_from_jar(jar: &CookieJar) -> Result<SessionInfo, SessionError> {
    let cookie = jar.get(SESSION_COOKIE_NAME).ok_or(SessionError::Missing)?;
    let info: SessionInfo =
        serde_json::from_str(cookie.value()).map_err(|_| SessionError::Malformed)?;
    if !info.is_complete() {
        return Err(SessionError::Incomplete);
    }
    Ok(info)
}
