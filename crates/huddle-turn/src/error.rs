use thiserror::Error;

/// Failure modes of one credential brokering attempt.
///
/// Exactly one variant is produced per failed request; the server maps each
/// variant to a stable client-facing status and error code.
#[derive(Debug, Error)]
pub enum TurnError {
    /// `KEY_ID` or `API_TOKEN` is not set. No upstream call is attempted.
    #[error("missing TURN configuration: KEY_ID and API_TOKEN are required")]
    ConfigMissing,

    /// The upstream issuer did not answer within the configured deadline.
    #[error("TURN upstream timed out")]
    Timeout,

    /// The upstream issuer answered with a non-2xx status. `body` carries
    /// best-effort diagnostics decoded from the reply, or `None` when the
    /// reply could not be decoded at all.
    #[error("TURN upstream returned status {status}")]
    Upstream {
        status: u16,
        body: Option<serde_json::Value>,
    },

    /// Transport failure or an upstream payload with an unexpected shape.
    #[error("failed to fetch TURN credentials: {0}")]
    Fetch(String),
}
