//! One-shot upstream call to the credential issuer.

use crate::config::TurnConfig;
use crate::error::TurnError;
use reqwest::header;
use serde_json::json;

/// Raw upstream reply, captured in full within the request deadline.
///
/// Both 2xx and non-2xx replies land here; classifying them is the job of
/// [`crate::credentials::classify`].
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: u16,
    pub content_type: String,
    /// Response body. `None` when the body of an error reply could not be
    /// read; diagnostics are best-effort and never fail the exchange.
    pub body: Option<Vec<u8>>,
}

/// HTTP client for the upstream issuer. Cheap to clone; the inner
/// `reqwest::Client` is shared across all requests.
#[derive(Debug, Clone, Default)]
pub struct TurnClient {
    http: reqwest::Client,
}

impl TurnClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues the single credential-generation call.
    ///
    /// The whole exchange — connect, request, and body read — runs under the
    /// configured deadline. The deadline elapsing surfaces as
    /// [`TurnError::Timeout`], distinct from any other transport failure
    /// ([`TurnError::Fetch`]). The timer is owned by the timeout future and
    /// dropped with it on every exit path.
    pub async fn fetch_credentials(
        &self,
        config: &TurnConfig,
    ) -> Result<UpstreamResponse, TurnError> {
        match tokio::time::timeout(config.timeout, self.issue(config)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(TurnError::Timeout),
        }
    }

    async fn issue(&self, config: &TurnConfig) -> Result<UpstreamResponse, TurnError> {
        let url = format!(
            "{}/v1/turn/keys/{}/credentials/generate-ice-servers",
            config.base_url, config.key_id
        );

        let response = self
            .http
            .post(&url)
            .header(
                header::AUTHORIZATION,
                format!("Bearer {}", config.api_token),
            )
            .header(header::CONTENT_TYPE, "application/json")
            .json(&json!({ "ttl": config.ttl }))
            .send()
            .await
            .map_err(|e| {
                tracing::debug!(error = %e, "TURN credential fetch failed");
                TurnError::Fetch(e.to_string())
            })?;

        let status = response.status().as_u16();
        let ok = response.status().is_success();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        let body = match response.bytes().await {
            Ok(bytes) => Some(bytes.to_vec()),
            // A 2xx reply whose body cannot be read is a broken exchange;
            // for error replies the body is only diagnostics.
            Err(e) if ok => return Err(TurnError::Fetch(e.to_string())),
            Err(_) => None,
        };

        Ok(UpstreamResponse {
            status,
            content_type,
            body,
        })
    }
}
