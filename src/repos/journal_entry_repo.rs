/*
 * Responsibility
 * - journal_entries row types
 * - RecordStore: the two operations the handler needs (natural-key lookup, insert)
 * - every call carries the caller's Principal so the store enforces row-level access
 */
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::repos::error::RepoResult;
use crate::services::auth::Principal;

/// A stored journal entry exactly as the store returned it.
///
/// Columns are not interpreted: an integer id, a defaulted `created_at` or any
/// column added by a trigger goes back to the client untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JournalEntryRow(pub Map<String, Value>);

impl JournalEntryRow {
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.0.get(column)
    }

    /// The store-assigned id, `null` if the row came back without one.
    pub fn id(&self) -> &Value {
        self.get("id").unwrap_or(&Value::Null)
    }
}

/// Validated insert payload. `user_id` always comes from the authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewJournalEntry {
    pub user_id: Uuid,
    pub title: String,
    pub body: String,
    pub mood: i32,
    pub date: String,
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    // Backend name (for logging).
    fn backend_name(&self) -> &'static str;

    /// Number of entries matching `user_id = user_id AND date = date`.
    async fn count_existing(
        &self,
        principal: &Principal,
        user_id: Uuid,
        date: &str,
    ) -> RepoResult<usize>;

    /// Inserts `entry` and returns the stored row.
    ///
    /// A duplicate `(user_id, date)` surfaces as `RepoError::Conflict`.
    async fn insert(
        &self,
        principal: &Principal,
        entry: &NewJournalEntry,
    ) -> RepoResult<JournalEntryRow>;
}
