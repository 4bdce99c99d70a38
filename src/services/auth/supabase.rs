use async_trait::async_trait;
use serde::Deserialize;
use url::Url;
use uuid::Uuid;

use super::{DEFAULT_ROLE, IdentityError, IdentityVerifier, Principal, bearer_token};

/// Asks the Supabase auth server who owns the bearer token (`GET /auth/v1/user`).
///
/// The token is forwarded as-is together with the project's anon key, so the auth
/// server stays the single authority on revocation and expiry.
#[derive(Clone)]
pub struct SupabaseAuthVerifier {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
}

impl std::fmt::Debug for SupabaseAuthVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseAuthVerifier")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct AuthUser {
    id: Uuid,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    role: Option<String>,
}

impl SupabaseAuthVerifier {
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        anon_key: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            anon_key: anon_key.into(),
        }
    }

    fn user_endpoint(&self) -> Result<Url, IdentityError> {
        Ok(Url::parse(&format!("{}/auth/v1/user", self.base_url))?)
    }
}

#[async_trait]
impl IdentityVerifier for SupabaseAuthVerifier {
    fn backend_name(&self) -> &'static str {
        "supabase-auth"
    }

    async fn verify(&self, authorization: Option<&str>) -> Result<Principal, IdentityError> {
        // No session, no round trip.
        let token = bearer_token(authorization)?;

        let res = self
            .http
            .get(self.user_endpoint()?)
            .header("apikey", &self.anon_key)
            .bearer_auth(token)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let detail = res.text().await.unwrap_or_default();
            return Err(IdentityError::Rejected(format!("{status}: {detail}")));
        }

        let user: AuthUser = res.json().await?;

        Ok(Principal {
            id: user.id,
            role: user
                .role
                .filter(|r| !r.is_empty())
                .unwrap_or_else(|| DEFAULT_ROLE.to_string()),
            email: user.email,
            access_token: token.to_string(),
        })
    }
}
