/*
 * Responsibility
 * - RecordStore over the Supabase REST gateway (PostgREST, `{SUPABASE_URL}/rest/v1/{table}`)
 * - Calls go out with the project's anon key plus the caller's bearer token,
 *   so row-level security runs as the caller
 * - PostgREST error bodies `{code, message, ...}` → RepoError
 */
use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, header};
use serde::Deserialize;
use url::Url;
use uuid::Uuid;

use crate::repos::error::{RepoError, RepoResult, UNIQUE_VIOLATION};
use crate::repos::journal_entry_repo::{JournalEntryRow, NewJournalEntry, RecordStore};
use crate::services::auth::Principal;

// Ask PostgREST for exactly one object instead of an array.
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

#[derive(Clone)]
pub struct PostgrestStore {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
    table: String,
}

impl std::fmt::Debug for PostgrestStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgrestStore")
            .field("base_url", &self.base_url)
            .field("table", &self.table)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct PostgrestError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl PostgrestStore {
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        anon_key: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            anon_key: anon_key.into(),
            table: table.into(),
        }
    }

    fn table_url(&self) -> RepoResult<Url> {
        Ok(Url::parse(&format!(
            "{}/rest/v1/{}",
            self.base_url, self.table
        ))?)
    }

    fn as_caller(&self, req: RequestBuilder, principal: &Principal) -> RequestBuilder {
        req.header("apikey", &self.anon_key)
            .bearer_auth(&principal.access_token)
    }
}

async fn error_for_status(res: Response) -> RepoResult<Response> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }

    let text = res.text().await?;
    match serde_json::from_str::<PostgrestError>(&text) {
        Ok(err) if err.code.as_deref() == Some(UNIQUE_VIOLATION) => Err(RepoError::Conflict),
        Ok(PostgrestError {
            message: Some(message),
            ..
        }) => Err(RepoError::Rejected(message)),
        _ if text.trim().is_empty() => Err(RepoError::Rejected(status.to_string())),
        _ => Err(RepoError::Rejected(text)),
    }
}

#[async_trait]
impl RecordStore for PostgrestStore {
    fn backend_name(&self) -> &'static str {
        "postgrest"
    }

    async fn count_existing(
        &self,
        principal: &Principal,
        user_id: Uuid,
        date: &str,
    ) -> RepoResult<usize> {
        let mut url = self.table_url()?;
        url.query_pairs_mut()
            .append_pair("select", "id")
            .append_pair("user_id", &format!("eq.{user_id}"))
            .append_pair("date", &format!("eq.{date}"));

        let res = self
            .as_caller(self.http.get(url), principal)
            .send()
            .await?;
        // Only the number of rows matters; ids may be any column type.
        let rows: Vec<serde_json::Value> = error_for_status(res)
            .await?
            .json()
            .await
            .map_err(|e| RepoError::Decode(e.to_string()))?;

        Ok(rows.len())
    }

    async fn insert(
        &self,
        principal: &Principal,
        entry: &NewJournalEntry,
    ) -> RepoResult<JournalEntryRow> {
        let res = self
            .as_caller(self.http.post(self.table_url()?), principal)
            .header("Prefer", "return=representation")
            .header(header::ACCEPT, SINGLE_OBJECT)
            .json(entry)
            .send()
            .await?;

        error_for_status(res)
            .await?
            .json()
            .await
            .map_err(|e| RepoError::Decode(e.to_string()))
    }
}
