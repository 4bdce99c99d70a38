//! Bearer credential → Principal → request extensions.
//!
//! The raw `Authorization` header (possibly absent) goes to the configured
//! `IdentityVerifier`; any failure ends the request with 401 before the body is read.

use axum::{
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::Next,
    response::Response,
};

use crate::error::AppError;
use crate::state::AppState;

pub async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let authorization = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    let principal = match state.identity.verify(authorization.as_deref()).await {
        Ok(principal) => principal,
        Err(err) => {
            tracing::warn!(
                error = %err,
                backend = state.identity.backend_name(),
                "credential verification failed"
            );
            return Err(err.into());
        }
    };

    // middleware → extractor
    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}
