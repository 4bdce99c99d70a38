/// Factory: build the `IdentityVerifier` selected by application `Config`.
use std::sync::Arc;

use crate::config::{Config, IdentityBackend};
use crate::services::auth::{IdentityVerifier, JwtVerifier, SupabaseAuthVerifier};

pub fn build_identity_verifier(
    config: &Config,
    http: reqwest::Client,
) -> Arc<dyn IdentityVerifier> {
    match &config.identity {
        IdentityBackend::SupabaseAuth => Arc::new(SupabaseAuthVerifier::new(
            http,
            config.supabase_url.clone(),
            config.supabase_anon_key.clone(),
        )),
        IdentityBackend::Jwt { secret, audience } => Arc::new(JwtVerifier::new(secret, audience)),
    }
}
