/*
 * Responsibility
 * - What a store failure means to the layers above
 *   (duplicate natural key / rejected by the store / store unreachable or garbled)
 */
use thiserror::Error;

/// SQLSTATE for `unique_violation`.
pub const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("entry already exists")]
    Conflict,
    // The store answered and refused the operation; message is the store's own.
    #[error("{0}")]
    Rejected(String),
    #[error("db error: {0}")]
    Db(sqlx::Error),
    #[error("store request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid store endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
    #[error("unexpected store response: {0}")]
    Decode(String),
}

impl RepoError {
    pub fn from_sqlx(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(dbe) = &e {
            if dbe.code().as_deref() == Some(UNIQUE_VIOLATION) {
                return RepoError::Conflict;
            }
            return RepoError::Rejected(dbe.message().to_string());
        }
        RepoError::Db(e)
    }
}

pub type RepoResult<T> = Result<T, RepoError>;
