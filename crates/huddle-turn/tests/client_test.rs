use huddle_turn::{classify, CredentialBundle, TurnClient, TurnConfig, TurnError};
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(base_url: &str, timeout: Duration) -> TurnConfig {
    TurnConfig {
        key_id: "test-key".to_string(),
        api_token: "test-token".to_string(),
        ttl: 600,
        base_url: base_url.to_string(),
        timeout,
    }
}

#[tokio::test]
async fn posts_bearer_auth_and_ttl_to_the_issuer() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/turn/keys/test-key/credentials/generate-ice-servers"))
        .and(header("Authorization", "Bearer test-token"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(serde_json::json!({ "ttl": 600 })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "iceServers": [{ "urls": ["stun:a.example:3478", "turn:b.example:3478?transport=udp"] }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = TurnClient::new();
    let response = client
        .fetch_credentials(&config(&mock_server.uri(), Duration::from_secs(5)))
        .await
        .unwrap();

    assert_eq!(response.status, 201);
    let bundle = classify(response).unwrap();
    assert_eq!(
        bundle,
        CredentialBundle::IceUrls {
            stun: vec!["stun:a.example:3478".to_string()],
            turn: vec!["turn:b.example:3478?transport=udp".to_string()],
        }
    );
}

#[tokio::test]
async fn non_2xx_reply_is_captured_not_raised() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(serde_json::json!({ "message": "bad token" })),
        )
        .mount(&mock_server)
        .await;

    let client = TurnClient::new();
    let response = client
        .fetch_credentials(&config(&mock_server.uri(), Duration::from_secs(5)))
        .await
        .unwrap();

    assert_eq!(response.status, 403);
    match classify(response) {
        Err(TurnError::Upstream { status: 403, body }) => {
            assert_eq!(body, Some(serde_json::json!({ "message": "bad token" })));
        }
        other => panic!("expected Upstream, got {other:?}"),
    }
}

#[tokio::test]
async fn slow_upstream_surfaces_as_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "iceServers": [] }))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&mock_server)
        .await;

    let client = TurnClient::new();
    let result = client
        .fetch_credentials(&config(&mock_server.uri(), Duration::from_millis(50)))
        .await;

    assert!(matches!(result, Err(TurnError::Timeout)));
}

#[tokio::test]
async fn unreachable_upstream_is_a_fetch_failure_not_a_timeout() {
    // Nothing listens on the discard port; connections are refused outright.
    let client = TurnClient::new();
    let result = client
        .fetch_credentials(&config("http://127.0.0.1:1", Duration::from_secs(5)))
        .await;

    assert!(matches!(result, Err(TurnError::Fetch(_))));
}
