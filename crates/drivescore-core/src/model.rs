//! Normalized driver records as served to the dashboard frontend.
//!
//! Records are derived from raw fleet-management user objects. Risk scores
//! are kept as `Option<f64>`: an absent score is distinct from a zero score
//! and serializes as JSON `null` so the frontend can render "N/A".

use serde::{Deserialize, Serialize};

/// A driver with normalized identity and risk metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverRecord {
    /// Remote record id, always non-empty.
    pub id: String,
    /// Display name resolved via fallback chain (display name, then
    /// first + last name, then login username).
    pub name: String,
    /// Whether the driver has an active-since timestamp set.
    pub is_active: bool,
    /// Per-category risk ratings.
    pub risk: RiskScores,
}

/// Risk ratings per driving behavior category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskScores {
    pub speeding: Option<f64>,
    pub acceleration: Option<f64>,
    pub braking: Option<f64>,
    pub cornering: Option<f64>,
}
