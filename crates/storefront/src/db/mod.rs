//! Storage for storefront accounts and catalog.
//!
//! Services depend on the [`UserStore`] and [`CatalogStore`] traits, never on
//! a concrete backend. Two backends exist:
//!
//! - [`MemoryStore`] - process-local, used by tests and tooling
//! - [`UserRepository`] / [`CatalogRepository`] - `PostgreSQL` via `sqlx`
//!
//! # Database: `mercantile_storefront`
//!
//! ## Tables
//!
//! - `storefront.user` - Accounts; unique index on `email_normalized`
//! - `storefront.category` - Product categories
//! - `storefront.product` - Products, each referencing a category
//!
//! # Migrations
//!
//! Migrations are stored in `crates/storefront/migrations/` and run via:
//! ```bash
//! cargo run -p mercantile-cli -- migrate
//! ```

pub mod catalog;
pub mod memory;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use mercantile_core::{CategoryId, UserId};

use crate::models::{Category, NewProduct, Product, User, UserProfile};

pub use catalog::CatalogRepository;
pub use memory::MemoryStore;
pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Account storage.
///
/// Email arguments named `normalized_email` must already be in canonical
/// form (see [`mercantile_core::Email::normalize`]); implementations compare
/// them against the normalized form of the stored email.
pub trait UserStore: Sync {
    /// Find the account whose email matches case-insensitively, together
    /// with its password hash.
    fn find_by_email(
        &self,
        normalized_email: &str,
    ) -> impl Future<Output = Result<Option<(User, String)>, RepositoryError>> + Send;

    /// Whether any account other than `except` uses this email.
    fn email_taken(
        &self,
        normalized_email: &str,
        except: Option<UserId>,
    ) -> impl Future<Output = Result<bool, RepositoryError>> + Send;

    /// Get a user by their ID.
    fn get_by_id(
        &self,
        id: UserId,
    ) -> impl Future<Output = Result<Option<User>, RepositoryError>> + Send;

    /// Insert a new account.
    ///
    /// Returns `RepositoryError::Conflict` if the email is already used.
    fn create(
        &self,
        profile: &UserProfile,
        password_hash: &str,
    ) -> impl Future<Output = Result<User, RepositoryError>> + Send;

    /// Overwrite an account's profile, and its hash when one is given.
    ///
    /// Returns `RepositoryError::NotFound` for an unknown id and
    /// `RepositoryError::Conflict` if the new email is already used.
    fn update(
        &self,
        id: UserId,
        profile: &UserProfile,
        password_hash: Option<&str>,
    ) -> impl Future<Output = Result<User, RepositoryError>> + Send;
}

/// Category and product storage.
pub trait CatalogStore: Sync {
    /// Insert a category.
    fn create_category(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Category, RepositoryError>> + Send;

    /// Get a category by its ID.
    fn get_category(
        &self,
        id: CategoryId,
    ) -> impl Future<Output = Result<Option<Category>, RepositoryError>> + Send;

    /// Insert a product.
    ///
    /// Returns `RepositoryError::Conflict` if the category vanished.
    fn create_product(
        &self,
        product: &NewProduct,
    ) -> impl Future<Output = Result<Product, RepositoryError>> + Send;

    /// All products of a category, oldest first.
    fn products_in_category(
        &self,
        id: CategoryId,
    ) -> impl Future<Output = Result<Vec<Product>, RepositoryError>> + Send;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Map a unique or foreign-key violation to `RepositoryError::Conflict`.
fn conflict_or_database(e: sqlx::Error, message: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && (db_err.is_unique_violation() || db_err.is_foreign_key_violation())
    {
        return RepositoryError::Conflict(message.to_owned());
    }
    RepositoryError::Database(e)
}
