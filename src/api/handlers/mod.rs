pub mod health;
pub mod journal_entries;
