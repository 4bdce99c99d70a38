/*
 * Responsibility
 * - Resolve a bearer credential to the caller (Principal)
 * - Hide which identity backend answers (Supabase auth server / local JWT)
 */
use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

pub mod access_jwt;
pub mod factory;
pub mod supabase;

pub use access_jwt::JwtVerifier;
pub use factory::build_identity_verifier;
pub use supabase::SupabaseAuthVerifier;

/// Role Postgres row-level policies see when the identity provider did not name one.
pub const DEFAULT_ROLE: &str = "authenticated";

/// The authenticated caller.
///
/// `access_token` is kept so every store call can be made with the caller's own
/// credential, never with a shared privileged one.
#[derive(Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: Uuid,
    pub role: String,
    pub email: Option<String>,
    pub access_token: String,
}

impl std::fmt::Debug for Principal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print the bearer token
        f.debug_struct("Principal")
            .field("id", &self.id)
            .field("role", &self.role)
            .field("email", &self.email)
            .finish()
    }
}

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("missing bearer credential")]
    MissingCredential,
    #[error("credential rejected: {0}")]
    Rejected(String),
    #[error("invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),
    #[error("invalid subject: {0}")]
    InvalidSubject(String),
    #[error("invalid auth endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
    #[error("auth request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Resolves the raw `Authorization` header value to a [`Principal`].
///
/// The header is handed over untouched (possibly absent): rejecting a missing or
/// malformed credential is the verifier's job.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    // Backend name (for logging).
    fn backend_name(&self) -> &'static str;

    async fn verify(&self, authorization: Option<&str>) -> Result<Principal, IdentityError>;
}

/// Extracts the token from `Bearer <token>` (scheme is case-insensitive).
pub fn bearer_token(authorization: Option<&str>) -> Result<&str, IdentityError> {
    let value = authorization.ok_or(IdentityError::MissingCredential)?.trim();

    let (scheme, token) = value
        .split_once(' ')
        .ok_or(IdentityError::MissingCredential)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(IdentityError::MissingCredential);
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(IdentityError::MissingCredential);
    }
    Ok(token)
}
