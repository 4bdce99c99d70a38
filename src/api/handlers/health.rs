/*
 * Responsibility
 * - GET /health (liveness; no auth, no store round trip)
 */
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use crate::api::response;
use crate::middleware::cors::CorsHeaders;

pub async fn health() -> impl IntoResponse {
    response::json(StatusCode::OK, &json!({"status": "ok"}), CorsHeaders::Full)
}
