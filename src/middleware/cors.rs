//! CORS policy for browser clients.
//!
//! Responsibility:
//! - Answer every `OPTIONS` request before anything else runs (no auth, no body read).
//! - Provide the header sets JSON responses carry.
//!
//! Policy:
//! - Wildcard origin, WITHOUT credentials.
//! - `Access-Control-Allow-Headers` lists what clients send (authorization, apikey, ...).
//!   The catch-all 500 path only carries Content-Type + Allow-Origin.

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, HeaderValue, Method, Request, StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
};

pub const JSON_UTF8: &str = "application/json; charset=utf-8";
pub const ALLOWED_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorsHeaders {
    Full,
    OriginOnly,
}

pub fn headers(kind: CorsHeaders) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(JSON_UTF8));
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    if kind == CorsHeaders::Full {
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        );
    }
    headers
}

/// Apply the preflight short-circuit to the given Router.
pub fn apply(router: Router) -> Router {
    router.layer(middleware::from_fn(preflight))
}

async fn preflight(req: Request<Body>, next: Next) -> Response {
    if req.method() == Method::OPTIONS {
        return (StatusCode::OK, headers(CorsHeaders::Full)).into_response();
    }
    next.run(req).await
}
