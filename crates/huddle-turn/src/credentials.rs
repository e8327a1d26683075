//! Classification of the upstream reply and partitioning of server URLs.
//!
//! The issuer reports ICE servers whose `urls` field may be a single string
//! or a list; the shape is normalized once at this boundary so nothing
//! downstream re-examines it. URLs are then split into the two groups
//! clients consume: `stun:` for address discovery and `turn:`/`turns:` for
//! traffic relaying. A URL matching neither prefix is dropped silently —
//! the split is a filter, not a validation.

use crate::client::UpstreamResponse;
use crate::error::TurnError;
use serde::Serialize;
use serde_json::Value;

/// Client-facing result of one successful credential request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CredentialBundle {
    /// Parsed ICE server URLs, grouped by role, in upstream order.
    IceUrls { stun: Vec<String>, turn: Vec<String> },
    /// Opaque passthrough for non-JSON success bodies.
    Raw { data: String },
}

/// Classifies a raw upstream reply into a credential bundle or a failure.
///
/// Success is any 2xx status; the payload kind is decided by the
/// content-type header alone, never by trial decoding. Error replies carry
/// best-effort diagnostics: an undecodable body degrades to `None` rather
/// than failing the classification itself.
pub fn classify(response: UpstreamResponse) -> Result<CredentialBundle, TurnError> {
    let is_json = response.content_type.contains("application/json");

    if !(200..300).contains(&response.status) {
        return Err(TurnError::Upstream {
            status: response.status,
            body: diagnostic_body(is_json, response.body.as_deref()),
        });
    }

    let body = response
        .body
        .ok_or_else(|| TurnError::Fetch("upstream response body could not be read".to_string()))?;

    if !is_json {
        return Ok(CredentialBundle::Raw {
            data: String::from_utf8_lossy(&body).into_owned(),
        });
    }

    let payload: Value = serde_json::from_slice(&body)
        .map_err(|e| TurnError::Fetch(format!("unexpected upstream payload: {e}")))?;

    // `iceServers` missing or not a list degrades to an empty list; the
    // request still succeeds with two empty groups.
    let servers = payload
        .get("iceServers")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[]);

    let (stun, turn) = partition_urls(servers);
    Ok(CredentialBundle::IceUrls { stun, turn })
}

/// Splits the URLs of all ICE server descriptors into STUN and TURN groups,
/// preserving encounter order across descriptors.
fn partition_urls(servers: &[Value]) -> (Vec<String>, Vec<String>) {
    let mut stun = Vec::new();
    let mut turn = Vec::new();

    for url in servers.iter().flat_map(normalize_urls) {
        if url.starts_with("stun:") {
            stun.push(url);
        } else if url.starts_with("turn:") || url.starts_with("turns:") {
            turn.push(url);
        }
    }

    (stun, turn)
}

/// Normalizes a descriptor's `urls` field into a flat list of strings: a
/// bare string becomes a one-element list, a list keeps its string elements
/// in order, any other shape becomes empty.
fn normalize_urls(server: &Value) -> Vec<String> {
    match server.get("urls") {
        Some(Value::String(url)) => vec![url.clone()],
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_owned)
            .collect(),
        _ => Vec::new(),
    }
}

/// Decodes an error reply's body for diagnostics, by content-type only.
fn diagnostic_body(is_json: bool, body: Option<&[u8]>) -> Option<Value> {
    let body = body?;
    if is_json {
        serde_json::from_slice(body).ok()
    } else {
        std::str::from_utf8(body)
            .ok()
            .map(|text| Value::String(text.to_owned()))
    }
}
