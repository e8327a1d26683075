//! Placeholder user endpoints.
//!
//! Account management is delegated to the authentication subsystem; these
//! routes only pin down the URL surface the frontend expects until real
//! handlers land.

use axum::{extract::Path, Json};
use serde_json::{json, Value};

/// Handler for `GET /api/users`.
pub async fn list_users_handler() -> Json<Value> {
    Json(json!({ "message": "List of users" }))
}

/// Handler for `GET /api/users/{id}`.
pub async fn get_user_handler(Path(_id): Path<String>) -> Json<Value> {
    Json(json!({ "message": "User details" }))
}

/// Handler for `POST /api/users`.
pub async fn create_user_handler() -> Json<Value> {
    Json(json!({ "message": "User created" }))
}

/// Handler for `PUT /api/users/{id}`.
pub async fn update_user_handler(Path(_id): Path<String>) -> Json<Value> {
    Json(json!({ "message": "User updated" }))
}
