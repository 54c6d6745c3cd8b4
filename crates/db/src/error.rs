//! Repository-level failures.

use cinerate_core::types::DbId;

/// PostgreSQL SQLSTATE for `foreign_key_violation`.
pub const FOREIGN_KEY_VIOLATION: &str = "23503";

/// PostgreSQL SQLSTATE for `check_violation`.
pub const CHECK_VIOLATION: &str = "23514";

/// Failure of a repository write that validates references first.
///
/// The reference variants are raised before anything is written, so a
/// caller seeing them knows the unit of work holds no partial changes.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("director {0} does not exist")]
    InvalidDirector(DbId),

    #[error("one or more genre ids do not exist")]
    InvalidGenres,

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// `true` if the error is a database constraint failure with the given SQLSTATE.
pub fn has_sqlstate(err: &sqlx::Error, code: &str) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some(code),
        _ => false,
    }
}

pub fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    has_sqlstate(err, FOREIGN_KEY_VIOLATION)
}

pub fn is_check_violation(err: &sqlx::Error) -> bool {
    has_sqlstate(err, CHECK_VIOLATION)
}
