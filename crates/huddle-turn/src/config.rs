//! Broker configuration resolved from the process environment.

use crate::error::TurnError;
use std::fmt;
use std::time::Duration;

/// Default upstream issuer when `BASE_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "https://rtc.live.cloudflare.com";

/// Default upstream deadline when `TIMEOUT_MS` is not set or unusable.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Resolved broker configuration for one credential request.
///
/// Resolution is a pure read of the environment: resolving twice against an
/// unchanged environment yields the same configuration, and nothing is ever
/// mutated after construction.
#[derive(Clone)]
pub struct TurnConfig {
    /// Issuer key identifier, interpolated into the upstream URL path.
    pub key_id: String,
    /// Long-lived issuer API token. Never exposed to clients or logs.
    pub api_token: String,
    /// Requested credential lifetime in seconds.
    pub ttl: u64,
    /// Upstream issuer base URL.
    pub base_url: String,
    /// Deadline for the whole upstream exchange.
    pub timeout: Duration,
}

impl fmt::Debug for TurnConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TurnConfig")
            .field("key_id", &self.key_id)
            .field("api_token", &"[REDACTED]")
            .field("ttl", &self.ttl)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl TurnConfig {
    /// Resolves the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`TurnError::ConfigMissing`] when `KEY_ID` or `API_TOKEN` is
    /// absent or empty.
    pub fn resolve() -> Result<Self, TurnError> {
        Self::resolve_from(|name| std::env::var(name).ok())
    }

    /// Resolves the configuration through an arbitrary variable lookup.
    ///
    /// This is the seam tests use to avoid mutating process-global
    /// environment state.
    pub fn resolve_from<F>(lookup: F) -> Result<Self, TurnError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let key_id = lookup("KEY_ID").filter(|v| !v.is_empty());
        let api_token = lookup("API_TOKEN").filter(|v| !v.is_empty());
        let (Some(key_id), Some(api_token)) = (key_id, api_token) else {
            return Err(TurnError::ConfigMissing);
        };

        Ok(Self {
            key_id,
            api_token,
            ttl: parse_ttl(lookup("TTL").as_deref()),
            base_url: lookup("BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout: Duration::from_millis(parse_timeout_ms(lookup("TIMEOUT_MS").as_deref())),
        })
    }
}

/// Parses `TTL`: non-numeric or negative values silently fall back to 0,
/// fractional values are floored.
fn parse_ttl(value: Option<&str>) -> u64 {
    let parsed = parse_number(value);
    if !parsed.is_finite() || parsed < 0.0 {
        return 0;
    }
    parsed.floor() as u64
}

/// Parses `TIMEOUT_MS`: non-numeric, zero, or negative values silently fall
/// back to the default, fractional values are floored.
fn parse_timeout_ms(value: Option<&str>) -> u64 {
    let parsed = parse_number(value);
    if !parsed.is_finite() || parsed <= 0.0 {
        return DEFAULT_TIMEOUT_MS;
    }
    parsed.floor() as u64
}

fn parse_number(value: Option<&str>) -> f64 {
    value
        .and_then(|v| v.trim().parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}
