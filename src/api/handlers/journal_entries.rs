/*
 * Responsibility
 * - Create today's journal entry for the authenticated caller
 * - Order: (preflight, auth: middleware) → body → validate → natural-key pre-check → insert
 * - Every outcome is a JSON response; nothing escapes as a panic or a bare status
 *
 * Notes
 * - The pre-check is a fast path only. Two concurrent requests can both pass it; the
 *   store's unique (user_id, date) constraint decides, and that also answers 409.
 */
use axum::{body::Body, extract::State};

use crate::{
    api::{
        dto::journal_entries::CreateJournalEntryRequest, extractors::AuthCtx,
        response::ApiResponse,
    },
    error::AppError,
    repos::JournalEntryRow,
    state::AppState,
};

pub async fn create_journal_entry(
    State(state): State<AppState>,
    AuthCtx(principal): AuthCtx,
    body: Body,
) -> Result<ApiResponse<JournalEntryRow>, AppError> {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .map_err(AppError::body_read)?;

    let req: CreateJournalEntryRequest =
        serde_json::from_slice(&bytes).map_err(|e| AppError::InvalidBody(e.to_string()))?;
    let entry = req.validate(principal.id)?;

    let existing = state
        .store
        .count_existing(&principal, entry.user_id, &entry.date)
        .await?;
    if existing > 0 {
        tracing::debug!(user_id = %entry.user_id, date = %entry.date, "entry already exists");
        return Err(AppError::Conflict);
    }

    let row = state.store.insert(&principal, &entry).await?;

    tracing::info!(
        user_id = %entry.user_id,
        entry_id = %row.id(),
        date = %entry.date,
        store = state.store.backend_name(),
        "journal entry created"
    );

    Ok(ApiResponse::success(row))
}
