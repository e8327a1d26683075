//! Public TURN credential endpoint.
//!
//! `GET /api/turn/credentials` brokers one short-lived credential set per
//! request: broker configuration is re-resolved from the environment, one
//! bounded-time call goes to the upstream issuer, and the reply is reshaped
//! into `{stun, turn}` URL groups. Failures are translated into the stable
//! error contract below; nothing is retried or cached.

use axum::{
    extract::Extension,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use huddle_turn::{classify, CredentialBundle, TurnConfig, TurnError};
use serde_json::json;
use std::sync::Arc;

use crate::AppState;

/// Handler for `GET /api/turn/credentials`.
pub async fn credentials_handler(Extension(state): Extension<Arc<AppState>>) -> Response {
    let mut response = match generate(&state).await {
        Ok(bundle) => (StatusCode::OK, Json(bundle)).into_response(),
        Err(e) => TurnApiError(e).into_response(),
    };

    // Issued credentials are short-lived; no reply from this endpoint may
    // be cached, success or failure alike.
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));

    response
}

/// Runs the broker pipeline for one request: resolve, fetch, classify.
/// One upstream attempt regardless of outcome.
async fn generate(state: &AppState) -> Result<CredentialBundle, TurnError> {
    let config = TurnConfig::resolve()?;
    let response = state.turn_client.fetch_credentials(&config).await?;
    classify(response)
}

/// Broker failure translated to the client-facing error contract.
pub struct TurnApiError(pub TurnError);

impl IntoResponse for TurnApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self.0 {
            TurnError::ConfigMissing => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "error": "Missing TURN configuration",
                    "code": "TURN_CONFIG_MISSING",
                }),
            ),
            TurnError::Timeout => (
                StatusCode::GATEWAY_TIMEOUT,
                json!({
                    "error": "TURN upstream timeout",
                    "code": "TURN_UPSTREAM_TIMEOUT",
                }),
            ),
            TurnError::Upstream { status, body } => {
                tracing::error!(status, upstream = ?body, "TURN upstream error");
                (
                    StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                    json!({
                        "error": "Unable to fetch TURN credentials",
                        "code": "TURN_UPSTREAM_ERROR",
                        "status": status,
                        "upstream": body,
                    }),
                )
            }
            TurnError::Fetch(reason) => {
                tracing::error!(error = %reason, "TURN endpoint failure");
                (
                    StatusCode::BAD_GATEWAY,
                    json!({
                        "error": "Unable to fetch TURN credentials",
                        "code": "TURN_FETCH_FAILED",
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn error_json(error: TurnError) -> (StatusCode, serde_json::Value) {
        let response = TurnApiError(error).into_response();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn config_missing_maps_to_500() {
        let (status, json) = error_json(TurnError::ConfigMissing).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["code"], "TURN_CONFIG_MISSING");
    }

    #[tokio::test]
    async fn timeout_maps_to_504_without_diagnostics() {
        let (status, json) = error_json(TurnError::Timeout).await;
        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(json["code"], "TURN_UPSTREAM_TIMEOUT");
        assert!(json.get("upstream").is_none());
    }

    #[tokio::test]
    async fn upstream_error_echoes_status_and_body() {
        let (status, json) = error_json(TurnError::Upstream {
            status: 403,
            body: Some(json!({ "message": "bad token" })),
        })
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(json["code"], "TURN_UPSTREAM_ERROR");
        assert_eq!(json["status"], 403);
        assert_eq!(json["upstream"]["message"], "bad token");
    }

    #[tokio::test]
    async fn upstream_error_without_body_reports_null() {
        let (status, json) = error_json(TurnError::Upstream {
            status: 500,
            body: None,
        })
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(json["upstream"].is_null());
    }

    #[tokio::test]
    async fn fetch_failure_maps_to_502() {
        let (status, json) = error_json(TurnError::Fetch("connection refused".to_string())).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(json["code"], "TURN_FETCH_FAILED");
    }
}
