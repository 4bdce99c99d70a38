/*
 * Responsibility
 * - Persistence for journal entries behind the RecordStore trait
 * - postgrest: Supabase REST gateway / postgres: direct sqlx pool
 */
pub mod error;
pub mod journal_entry_repo;
pub mod postgres;
pub mod postgrest;

pub use journal_entry_repo::{JournalEntryRow, NewJournalEntry, RecordStore};
pub use postgres::PostgresStore;
pub use postgrest::PostgrestStore;
