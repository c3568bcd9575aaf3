//! Retrieval and normalization of driver-tagged user records.

use drivescore_core::{DriverRecord, RiskScores};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::auth::Credentials;
use crate::client::GeotabClient;
use crate::error::{GeotabError, Result};

/// Raw user record as returned by the remote `Get` call. Only the fields the
/// dashboard consumes are decoded; everything else is ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawUser {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
    #[serde(default)]
    user_name: Option<String>,
    #[serde(default)]
    active_from: Option<Value>,
    #[serde(default)]
    speeding_risk: Option<f64>,
    #[serde(default)]
    acceleration_risk: Option<f64>,
    #[serde(default)]
    braking_risk: Option<f64>,
    #[serde(default)]
    cornering_risk: Option<f64>,
}

/// Fetches all users flagged as drivers and currently active, normalized
/// into [`DriverRecord`]s.
///
/// Credentials are validated before any network traffic: a missing session
/// id, username, or database fails with [`GeotabError::Validation`] without
/// touching the wire. Transport and API errors propagate unchanged; there is
/// no retry here.
pub async fn fetch_drivers(
    client: &GeotabClient,
    credentials: &Credentials,
    server: &str,
) -> Result<Vec<DriverRecord>> {
    validate_credentials(credentials)?;

    let params = json!({
        "typeName": "User",
        "search": { "isDriver": true, "activeFrom": { "--gt": 0 } },
        "credentials": credentials,
    });

    let result = client.call(server, "Get", params).await?;
    let raw: Vec<RawUser> =
        serde_json::from_value(result).map_err(|e| GeotabError::Decode(e.to_string()))?;

    let drivers: Vec<DriverRecord> = raw.into_iter().filter_map(into_driver_record).collect();
    tracing::info!(count = drivers.len(), "retrieved driver records");
    Ok(drivers)
}

fn validate_credentials(credentials: &Credentials) -> Result<()> {
    if credentials.session_id.is_empty() {
        return Err(GeotabError::validation("sessionId is missing"));
    }
    if credentials.user_name.is_empty() {
        return Err(GeotabError::validation("userName is missing"));
    }
    if credentials.database.is_empty() {
        return Err(GeotabError::validation("database is missing"));
    }
    Ok(())
}

/// Records without an id cannot be keyed by the dashboard and are dropped.
fn into_driver_record(raw: RawUser) -> Option<DriverRecord> {
    let id = raw.id.as_deref()?.trim();
    if id.is_empty() {
        return None;
    }

    Some(DriverRecord {
        id: id.to_string(),
        name: resolve_name(&raw),
        is_active: is_truthy(raw.active_from.as_ref()),
        risk: RiskScores {
            speeding: raw.speeding_risk,
            acceleration: raw.acceleration_risk,
            braking: raw.braking_risk,
            cornering: raw.cornering_risk,
        },
    })
}

/// Fallback chain: explicit display name, then "first last", then the login
/// username. Each candidate is trimmed before the next is considered.
fn resolve_name(raw: &RawUser) -> String {
    if let Some(name) = raw.name.as_deref() {
        let name = name.trim();
        if !name.is_empty() {
            return name.to_string();
        }
    }

    let full = format!(
        "{} {}",
        raw.first_name.as_deref().unwrap_or(""),
        raw.last_name.as_deref().unwrap_or(""),
    );
    let full = full.trim();
    if !full.is_empty() {
        return full.to_string();
    }

    raw.user_name.as_deref().unwrap_or("").trim().to_string()
}

/// The active-since marker may arrive as a timestamp number or string;
/// either way, a zero or empty value means not active.
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}
