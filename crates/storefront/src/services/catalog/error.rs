//! Catalog error types.

use thiserror::Error;

use mercantile_core::ValidationErrors;

use crate::db::RepositoryError;

/// Errors that can occur during catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The submitted category or product has field violations.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}
