/*
 * Responsibility
 * - URL structure: GET /health, everything else → create_journal_entry
 * - The entry handler is path/method agnostic (deployed behind a function gateway
 *   that owns the path), so it is mounted as the fallback
 * - Bearer auth wraps only the entry handler
 */
use axum::{Router, handler::Handler, middleware, routing::get};

use crate::api::handlers::{health::health, journal_entries::create_journal_entry};
use crate::middleware::auth::access::access_middleware;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .fallback(create_journal_entry.layer(middleware::from_fn_with_state(
            state,
            access_middleware,
        )))
}
