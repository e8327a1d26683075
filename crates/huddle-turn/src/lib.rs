//! TURN credential brokering for the Huddle platform.
//!
//! WebRTC peers need STUN servers to discover their reachable address and
//! TURN servers to relay traffic when a direct path cannot be established.
//! The upstream issuer mints short-lived TURN credentials on demand; this
//! crate hides the long-lived issuer API token from clients, performs the
//! single bounded-time call per request, and reshapes the issuer's reply
//! into the `{stun, turn}` URL groups the frontend consumes.
//!
//! No credential is ever cached or retried: each inbound request maps to
//! exactly one upstream attempt, and the outcome is returned as-is.

pub mod client;
pub mod config;
pub mod credentials;
pub mod error;

pub use client::{TurnClient, UpstreamResponse};
pub use config::{TurnConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_MS};
pub use credentials::{classify, CredentialBundle};
pub use error::TurnError;
