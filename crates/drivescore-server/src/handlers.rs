use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use axum_extra::extract::CookieJar;
use drivescore_core::{DriverRecord, SessionInfo};
use drivescore_geotab::{Credentials, authenticate, fetch_drivers};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::ApiError;
use crate::server::AppState;
use crate::session;

#[derive(Serialize)]
pub struct HealthResponse<'a> {
    status: &'a str,
}

pub async fn root() -> impl IntoResponse {
    let body = json!({
        "service": "Drivescore Server",
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    });
    (StatusCode::OK, Json(body))
}

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthResponse { status: "ok" }))
}

pub async fn readyz() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthResponse { status: "ready" }))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub database: Option<String>,
}

/// Authenticates against the remote API and stores the resulting session in
/// an HttpOnly cookie. Fields omitted from the request fall back to the
/// configured service account.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<Value>), ApiError> {
    let settings = &state.config.geotab;
    let username = req.username.or_else(|| settings.username.clone());
    let password = req.password.or_else(|| settings.password.clone());
    let database = req.database.or_else(|| settings.database.clone());

    let (Some(username), Some(password), Some(database)) = (username, password, database) else {
        return Err(ApiError::bad_request("Missing credentials"));
    };

    let auth = authenticate(&state.geotab, &username, &password, &database)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "login failed");
            ApiError::from(e)
        })?;

    let info = SessionInfo {
        session_id: auth.credentials.session_id,
        user_name: auth.credentials.user_name,
        database: auth.credentials.database,
        server: auth.server,
    };
    let jar = jar.add(session::session_cookie(
        &info,
        state.config.session.secure_cookies,
    ));

    Ok((jar, Json(json!({ "success": true }))))
}

/// Serves the driver list through the cache; cache misses delegate to the
/// remote API using the session from the cookie.
pub async fn drivers(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Json<Vec<DriverRecord>>, ApiError> {
    let info = session::session_from_jar(&jar)?;
    let credentials = Credentials {
        user_name: info.user_name.clone(),
        session_id: info.session_id.clone(),
        database: info.database.clone(),
    };

    let data = state
        .drivers
        .get_with(|| fetch_drivers(&state.geotab, &credentials, &info.server))
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "failed to retrieve driver data");
            ApiError::from(e)
        })?;

    Ok(Json(data.to_vec()))
}

pub async fn logout(jar: CookieJar) -> (CookieJar, Json<Value>) {
    let jar = jar.remove(session::removal_cookie());
    (jar, Json(json!({ "success": true })))
}
