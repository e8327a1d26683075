//! Huddle server library logic.

pub mod api_turn;
pub mod api_users;
pub mod config;

use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    routing::get,
    Extension, Json, Router,
};
use huddle_turn::TurnClient;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Application state shared across all request handlers.
#[derive(Clone, Default)]
pub struct AppState {
    /// HTTP client for the upstream TURN credential issuer. Shared so all
    /// requests reuse one connection pool.
    pub turn_client: TurnClient,
}

/// Health check handler.
///
/// Returns `200 OK` with server status and version. Used by load balancers,
/// monitoring, and CI to verify the server is running.
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Builds the CORS layer from `CLIENT_ORIGIN` (comma-separated origin list).
///
/// With no configured origin, cross-origin requests stay disallowed.
fn cors_layer() -> CorsLayer {
    let origins: Vec<HeaderValue> = std::env::var("CLIENT_ORIGIN")
        .ok()
        .map(|raw| {
            raw.split(',')
                .filter_map(|origin| origin.trim().parse().ok())
                .collect()
        })
        .unwrap_or_default();

    if origins.is_empty() {
        return CorsLayer::new();
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-requested-with"),
        ])
        .allow_credentials(true)
        .max_age(Duration::from_secs(86_400))
}

/// Builds the application router with all routes.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/api/users",
            get(api_users::list_users_handler).post(api_users::create_user_handler),
        )
        .route(
            "/api/users/{id}",
            get(api_users::get_user_handler).put(api_users::update_user_handler),
        )
        .route(
            "/api/turn/credentials",
            get(api_turn::credentials_handler),
        )
        .layer(cors_layer())
        .layer(Extension(Arc::new(state)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn health_check_returns_ok() {
        let app = app(AppState::default());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn user_routes_answer_with_placeholders() {
        let app = app(AppState::default());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/users/42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], "User details");
    }
}
