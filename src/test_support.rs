//! In-memory collaborators and helpers shared by unit tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::Router;
use serde_json::{Map, Value, json};
use uuid::Uuid;

use crate::repos::error::{RepoError, RepoResult};
use crate::repos::{JournalEntryRow, NewJournalEntry, RecordStore};
use crate::services::auth::{
    DEFAULT_ROLE, IdentityError, IdentityVerifier, Principal, bearer_token,
};

/// Serves `router` on an ephemeral local port; returns its base URL.
pub async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

pub fn principal(token: &str) -> Principal {
    Principal {
        id: Uuid::new_v4(),
        role: DEFAULT_ROLE.to_string(),
        email: None,
        access_token: token.to_string(),
    }
}

/// Accepts a fixed set of tokens.
#[derive(Default)]
pub struct StaticVerifier {
    known: HashMap<String, Principal>,
    pub calls: AtomicUsize,
}

impl StaticVerifier {
    pub fn with(principals: &[&Principal]) -> Self {
        Self {
            known: principals
                .iter()
                .map(|p| (p.access_token.clone(), (*p).clone()))
                .collect(),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl IdentityVerifier for StaticVerifier {
    fn backend_name(&self) -> &'static str {
        "static"
    }

    async fn verify(&self, authorization: Option<&str>) -> Result<Principal, IdentityError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let token = bearer_token(authorization)?;
        self.known
            .get(token)
            .cloned()
            .ok_or_else(|| IdentityError::Rejected("invalid JWT".into()))
    }
}

/// `journal_entries` with a unique `(user_id, date)` constraint, plus knobs to
/// make it misbehave.
#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<NewJournalEntry>>,
    // (operation, access token used)
    pub calls: Mutex<Vec<(&'static str, String)>>,
    // Pre-check sees nothing, as if a concurrent insert had not landed yet.
    pub hide_existing: AtomicBool,
    pub reject_insert: Mutex<Option<String>>,
    pub unavailable: AtomicBool,
    // Serial integer ids instead of UUIDs.
    pub serial_ids: AtomicBool,
    // Columns the table fills in on its own (defaults, triggers).
    pub extra_columns: Mutex<Map<String, Value>>,
}

impl MemoryStore {
    pub fn rows(&self) -> Vec<NewJournalEntry> {
        self.rows.lock().unwrap().clone()
    }

    pub fn calls(&self) -> Vec<(&'static str, String)> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, op: &'static str, principal: &Principal) -> RepoResult<()> {
        self.calls
            .lock()
            .unwrap()
            .push((op, principal.access_token.clone()));
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(RepoError::Db(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn count_existing(
        &self,
        principal: &Principal,
        user_id: Uuid,
        date: &str,
    ) -> RepoResult<usize> {
        self.record("find", principal)?;
        if self.hide_existing.load(Ordering::SeqCst) {
            return Ok(0);
        }
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.user_id == user_id && r.date == date)
            .count())
    }

    async fn insert(
        &self,
        principal: &Principal,
        entry: &NewJournalEntry,
    ) -> RepoResult<JournalEntryRow> {
        self.record("insert", principal)?;
        if let Some(message) = self.reject_insert.lock().unwrap().clone() {
            return Err(RepoError::Rejected(message));
        }

        let mut rows = self.rows.lock().unwrap();
        if rows
            .iter()
            .any(|r| r.user_id == entry.user_id && r.date == entry.date)
        {
            return Err(RepoError::Conflict);
        }

        rows.push(entry.clone());

        let id = if self.serial_ids.load(Ordering::SeqCst) {
            json!(rows.len())
        } else {
            json!(Uuid::new_v4())
        };
        let Value::Object(mut row) = json!({
            "id": id,
            "user_id": entry.user_id,
            "title": entry.title,
            "body": entry.body,
            "mood": entry.mood,
            "date": entry.date,
            "created_at": chrono::Utc::now().to_rfc3339(),
        }) else {
            unreachable!("object literal");
        };
        row.extend(self.extra_columns.lock().unwrap().clone());
        Ok(JournalEntryRow(row))
    }
}
