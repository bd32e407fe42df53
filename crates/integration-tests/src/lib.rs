//! Integration tests for Mercantile.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p mercantile-integration-tests
//! ```
//!
//! Most tests drive the storefront services against [`MemoryStore`], so no
//! database is needed. The `postgres` tests are ignored by default; run them
//! with `-- --ignored` against a database named by `STOREFRONT_DATABASE_URL`.
//!
//! # Test Categories
//!
//! - `accounts` - Registration, uniqueness and credential authentication
//! - `catalog` - Category and product validation
//! - `postgres` - SQL repositories (lookup, uniqueness, constraints)

use mercantile_storefront::config::HashingConfig;
use mercantile_storefront::db::MemoryStore;
use mercantile_storefront::services::PasswordHasher;

/// A fresh store and a hasher with the cheapest Argon2 parameters.
pub struct TestContext {
    pub store: MemoryStore,
    pub hasher: PasswordHasher,
}

impl TestContext {
    /// Build an empty context.
    ///
    /// # Panics
    ///
    /// Panics if `argon2` rejects the test parameters.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        let hasher = PasswordHasher::new(&HashingConfig {
            memory_kib: 8,
            iterations: 1,
            parallelism: 1,
        })
        .expect("minimal argon2 parameters are valid");

        Self {
            store: MemoryStore::new(),
            hasher,
        }
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
