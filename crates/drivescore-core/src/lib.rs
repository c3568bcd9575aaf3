//! Core domain types shared by the Drivescore API client, server, and CLI.

pub mod model;
pub mod session;

pub use model::{DriverRecord, RiskScores};
pub use session::SessionInfo;
