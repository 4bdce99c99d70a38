/*
 * Responsibility
 * - Shared context handed to the router (AppState)
 *   - identity: who is calling / store: where entries live
 * - Clone is cheap (Arc inside); nothing in here is mutable per request
 */
use std::sync::Arc;

use crate::repos::RecordStore;
use crate::services::auth::IdentityVerifier;

#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<dyn IdentityVerifier>,
    pub store: Arc<dyn RecordStore>,
}

impl AppState {
    pub fn new(identity: Arc<dyn IdentityVerifier>, store: Arc<dyn RecordStore>) -> Self {
        Self { identity, store }
    }
}
