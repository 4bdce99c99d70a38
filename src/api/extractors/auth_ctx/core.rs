use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::services::auth::Principal;

/// Extractor for the authenticated caller.
///
/// Relies on `access_middleware` having inserted a `Principal`; when it is missing
/// (route not behind the middleware) the request is treated as unauthenticated.
pub struct AuthCtx(pub Principal);

impl<S> FromRequestParts<S> for AuthCtx
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .map(AuthCtx)
            .ok_or(AppError::Unauthorized)
    }
}
