use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use uuid::Uuid;

use super::{DEFAULT_ROLE, IdentityError, IdentityVerifier, Principal, bearer_token};

/// Access token claims issued by the Supabase auth server.
///
/// `exp` / `aud` are checked by `jsonwebtoken::Validation` and not kept here.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessTokenClaims {
    pub sub: String,

    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// HS256 access-token verifier using the project's JWT secret.
///
/// - Key material is intentionally not printable via Debug.
/// - No network round trip: a revoked but unexpired token is still accepted.
#[derive(Clone)]
pub struct JwtVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtVerifier {
    pub fn new(secret: &str, audience: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[audience]);
        validation.set_required_spec_claims(&["exp", "sub", "aud"]);

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    // Verify and decode a JWT access token.
    pub fn decode(&self, token: &str) -> Result<AccessTokenClaims, IdentityError> {
        let data =
            jsonwebtoken::decode::<AccessTokenClaims>(token, &self.decoding_key, &self.validation)?;

        Ok(data.claims)
    }
}

#[async_trait]
impl IdentityVerifier for JwtVerifier {
    fn backend_name(&self) -> &'static str {
        "jwt"
    }

    async fn verify(&self, authorization: Option<&str>) -> Result<Principal, IdentityError> {
        let token = bearer_token(authorization)?;
        let claims = self.decode(token)?;

        // Subject is the auth user id (UUID)
        let id = Uuid::parse_str(&claims.sub)
            .map_err(|_| IdentityError::InvalidSubject(claims.sub.clone()))?;

        Ok(Principal {
            id,
            role: claims
                .role
                .filter(|r| !r.is_empty())
                .unwrap_or_else(|| DEFAULT_ROLE.to_string()),
            email: claims.email,
            access_token: token.to_string(),
        })
    }
}
