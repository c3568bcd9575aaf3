//! Client for the Geotab fleet-management JSON-RPC API.
//!
//! The API exposes a single HTTPS endpoint per server (`/apiv1`) that accepts
//! JSON-RPC 2.0 calls. A session starts with an `Authenticate` call against a
//! default server; the response may redirect the session to a different
//! physical server, which then must be used for every subsequent call.
//!
//! This crate covers exactly that integration surface: the transport
//! ([`GeotabClient`]), the authenticator ([`authenticate`]), and retrieval of
//! driver-tagged user records ([`fetch_drivers`]). Caching sits above this
//! crate, in the hosting process.

pub mod auth;
pub mod client;
pub mod drivers;
pub mod error;

pub use auth::{AuthSession, Credentials, THIS_SERVER, authenticate};
pub use client::{DEFAULT_SERVER, GeotabClient, GeotabConfig};
pub use drivers::fetch_drivers;
pub use error::{GeotabError, Result};
