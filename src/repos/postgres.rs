/*
 * Responsibility
 * - RecordStore over a direct Postgres connection (sqlx PgPool)
 * - Each call runs in its own transaction scoped to the caller the same way the
 *   REST gateway does it (role + request.jwt.claims), so RLS policies still apply
 * - Table name comes from Config (validated identifier)
 */
use async_trait::async_trait;
use serde_json::json;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::repos::error::{RepoError, RepoResult};
use crate::repos::journal_entry_repo::{JournalEntryRow, NewJournalEntry, RecordStore};
use crate::services::auth::Principal;

#[derive(Clone, Debug)]
pub struct PostgresStore {
    pool: PgPool,
    count_sql: String,
    insert_sql: String,
}

impl PostgresStore {
    pub fn new(pool: PgPool, table: &str) -> Self {
        let count_sql = format!(
            r#"
            SELECT count(*)
            FROM {table}
            WHERE user_id = $1 AND date = $2::date
            "#
        );
        // Whole row as JSON, whatever columns the table has.
        let insert_sql = format!(
            r#"
            WITH inserted AS (
                INSERT INTO {table} (user_id, title, body, mood, date)
                VALUES ($1, $2, $3, $4, $5::date)
                RETURNING *
            )
            SELECT to_jsonb(inserted) FROM inserted
            "#
        );

        Self {
            pool,
            count_sql,
            insert_sql,
        }
    }

    async fn begin_as(&self, principal: &Principal) -> RepoResult<Transaction<'_, Postgres>> {
        let mut tx = self.pool.begin().await.map_err(RepoError::from_sqlx)?;

        // Transaction-local, gone at commit/rollback.
        sqlx::query(
            r#"
            SELECT
                set_config('role', $1, true),
                set_config('request.jwt.claims', $2, true),
                set_config('request.jwt.claim.sub', $3, true)
            "#,
        )
        .bind(&principal.role)
        .bind(claims_json(principal))
        .bind(principal.id.to_string())
        .execute(&mut *tx)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(tx)
    }
}

// What `auth.uid()` / `auth.jwt()` read inside policies.
fn claims_json(principal: &Principal) -> String {
    let mut claims = json!({
        "sub": principal.id,
        "role": principal.role,
    });
    if let Some(email) = &principal.email {
        claims["email"] = json!(email);
    }
    claims.to_string()
}

#[async_trait]
impl RecordStore for PostgresStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn count_existing(
        &self,
        principal: &Principal,
        user_id: Uuid,
        date: &str,
    ) -> RepoResult<usize> {
        let mut tx = self.begin_as(principal).await?;

        let count = sqlx::query_scalar::<_, i64>(&self.count_sql)
            .bind(user_id)
            .bind(date)
            .fetch_one(&mut *tx)
            .await
            .map_err(RepoError::from_sqlx)?;

        tx.commit().await.map_err(RepoError::from_sqlx)?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    async fn insert(
        &self,
        principal: &Principal,
        entry: &NewJournalEntry,
    ) -> RepoResult<JournalEntryRow> {
        let mut tx = self.begin_as(principal).await?;

        let Json(row) = sqlx::query_scalar::<_, Json<JournalEntryRow>>(&self.insert_sql)
            .bind(entry.user_id)
            .bind(&entry.title)
            .bind(&entry.body)
            .bind(entry.mood)
            .bind(&entry.date)
            .fetch_one(&mut *tx)
            .await
            .map_err(RepoError::from_sqlx)?;

        tx.commit().await.map_err(RepoError::from_sqlx)?;
        Ok(row)
    }
}
