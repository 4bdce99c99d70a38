pub mod journal_entries;
