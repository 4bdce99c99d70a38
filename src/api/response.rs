/*
 * Responsibility
 * - JSON bodies for every path, always UTF-8 with an explicit charset
 * - `{"data": ...}` envelope for success
 */
use axum::{
    body::Body,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::middleware::cors::{self, CorsHeaders};

/// Successful response: `200 {"data": <T>}`.
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self { data }
    }
}

#[derive(Serialize)]
struct DataEnvelope<'a, T: Serialize> {
    data: &'a T,
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        json(
            StatusCode::OK,
            &DataEnvelope { data: &self.data },
            CorsHeaders::Full,
        )
    }
}

pub fn json<T: Serialize>(status: StatusCode, body: &T, kind: CorsHeaders) -> Response {
    match serde_json::to_vec(body) {
        Ok(bytes) => (status, cors::headers(kind), Body::from(bytes)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to serialize response body");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                cors::headers(CorsHeaders::OriginOnly),
                Body::from(r#"{"error":"Failed to serialize response body"}"#),
            )
                .into_response()
        }
    }
}
