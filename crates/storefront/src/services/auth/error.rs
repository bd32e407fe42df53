//! Authentication error types.

use thiserror::Error;

use mercantile_core::ValidationErrors;

use crate::db::RepositoryError;

/// Errors that can occur during account operations.
///
/// A failed credential check is not an error: it is `Ok(None)` from
/// [`super::AuthService::authenticate_with_credentials`].
#[derive(Debug, Error)]
pub enum AuthError {
    /// The submitted form has field violations.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// User not found.
    #[error("user not found")]
    UserNotFound,

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}
